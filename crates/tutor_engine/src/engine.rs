use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use tutor_logging::{tutor_debug, tutor_info, tutor_warn};

use crate::{ChatTurn, CompletionService, EngineEvent, JobExecutor, JobId, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    Complete {
        request_id: RequestId,
        turns: Vec<ChatTurn>,
        credential: String,
    },
    CannedReply {
        request_id: RequestId,
        delay: Duration,
    },
    RunJob {
        job_id: JobId,
        code: String,
    },
}

/// The services effects are executed against, chosen at composition time.
#[derive(Clone)]
pub struct EngineServices {
    pub completions: Arc<dyn CompletionService>,
    pub executor: Arc<dyn JobExecutor>,
}

/// Runs one command to completion. Every command yields exactly one event.
pub async fn dispatch(services: &EngineServices, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::Complete {
            request_id,
            turns,
            credential,
        } => {
            let result = services.completions.complete(&turns, &credential).await;
            match &result {
                Ok(reply) => tutor_info!(
                    "completion {} finished reply_len={}",
                    request_id,
                    reply.len()
                ),
                Err(err) => tutor_warn!("completion {} failed ({}): {}", request_id, err.kind, err),
            }
            EngineEvent::CompletionFinished { request_id, result }
        }
        EngineCommand::CannedReply { request_id, delay } => {
            tokio::time::sleep(delay).await;
            tutor_debug!("canned reply {} due", request_id);
            EngineEvent::CannedReplyDue { request_id }
        }
        EngineCommand::RunJob { job_id, code } => {
            let result = services.executor.execute(job_id, &code).await;
            EngineEvent::JobCompleted { job_id, result }
        }
    }
}

/// Owns a tokio runtime on a background thread. Commands run concurrently;
/// events come back in completion order.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(services: EngineServices) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Runtime::new()?;
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let (event_tx, event_rx) = mpsc::channel();

        thread::Builder::new()
            .name("tutor-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let services = services.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        let event = dispatch(&services, command).await;
                        let _ = event_tx.send(event);
                    });
                }
                tutor_debug!("engine command channel closed");
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            tutor_warn!("engine thread is gone; command dropped");
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}
