use std::time::Duration;

use chrono::{DateTime, Utc};
use tutor_core::{ChatError, Effect, HistoryEntry, HistoryRole, Msg, Notice};
use tutor_engine::{
    ChatTurn, Clipboard, CompletionError, CompletionFailureKind, EngineCommand, EngineEvent,
    EngineHandle, TurnRole,
};
use tutor_logging::{tutor_debug, tutor_info, tutor_warn};

/// What running a batch of effects produced synchronously.
#[derive(Debug, Default)]
pub(crate) struct EffectOutcome {
    /// Messages to feed straight back into `update`.
    pub follow_up: Vec<Msg>,
    pub notices: Vec<Notice>,
}

pub(crate) struct EffectRunner {
    engine: EngineHandle,
    clipboard: Box<dyn Clipboard>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, clipboard: Box<dyn Clipboard>) -> Self {
        Self { engine, clipboard }
    }

    pub fn run(&mut self, effects: Vec<Effect>) -> EffectOutcome {
        let mut outcome = EffectOutcome::default();
        for effect in effects {
            match effect {
                Effect::RequestCompletion {
                    request_id,
                    history,
                    credential,
                } => {
                    tutor_info!(
                        "RequestCompletion request_id={} turns={}",
                        request_id,
                        history.len()
                    );
                    self.engine.send(EngineCommand::Complete {
                        request_id,
                        turns: to_turns(history),
                        credential,
                    });
                }
                Effect::ScheduleCannedReply { request_id, delay } => {
                    tutor_info!(
                        "ScheduleCannedReply request_id={} delay_ms={}",
                        request_id,
                        delay.as_millis()
                    );
                    self.engine
                        .send(EngineCommand::CannedReply { request_id, delay });
                }
                Effect::StartJob { job_id, code } => {
                    tutor_info!("StartJob job_id={} code_len={}", job_id, code.len());
                    self.engine.send(EngineCommand::RunJob { job_id, code });
                }
                Effect::CopyToClipboard { text } => {
                    let result = self
                        .clipboard
                        .set_text(&text)
                        .map_err(|err| err.to_string());
                    if let Err(reason) = &result {
                        tutor_warn!("Clipboard write failed: {}", reason);
                    }
                    outcome.follow_up.push(Msg::CopyFinished(result));
                }
                Effect::Notify(notice) => {
                    tutor_debug!("Notice {:?}: {}", notice.level, notice.title);
                    outcome.notices.push(notice);
                }
            }
        }
        outcome
    }

    pub fn try_event(&self) -> Option<Msg> {
        self.engine
            .try_recv()
            .map(|event| event_to_msg(event, Utc::now()))
    }

    pub fn wait_event(&self, timeout: Duration) -> Option<Msg> {
        self.engine
            .recv_timeout(timeout)
            .map(|event| event_to_msg(event, Utc::now()))
    }
}

fn to_turns(history: Vec<HistoryEntry>) -> Vec<ChatTurn> {
    history
        .into_iter()
        .map(|entry| ChatTurn {
            role: match entry.role {
                HistoryRole::User => TurnRole::User,
                HistoryRole::Assistant => TurnRole::Assistant,
            },
            content: entry.content,
        })
        .collect()
}

pub(crate) fn event_to_msg(event: EngineEvent, at: DateTime<Utc>) -> Msg {
    match event {
        EngineEvent::CompletionFinished { request_id, result } => Msg::ReplyArrived {
            request_id,
            at,
            result: result.map_err(to_chat_error),
        },
        EngineEvent::CannedReplyDue { request_id } => Msg::CannedReplyDue { request_id, at },
        EngineEvent::JobCompleted { job_id, result } => {
            if let Err(failure) = &result {
                tutor_warn!("Job {} failed: {}", job_id, failure);
            }
            Msg::JobFinished {
                job_id,
                result: result.map_err(|failure| failure.reason),
            }
        }
    }
}

fn to_chat_error(err: CompletionError) -> ChatError {
    match err.kind {
        CompletionFailureKind::Malformed => ChatError::MalformedResponse(err.message),
        CompletionFailureKind::HttpStatus(code) => {
            ChatError::NetworkFailure(format!("{} (http {code})", err.message))
        }
        CompletionFailureKind::Network => ChatError::NetworkFailure(err.message),
    }
}
