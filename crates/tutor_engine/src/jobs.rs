use tutor_logging::{tutor_info, tutor_warn};

use crate::{JobFailure, JobId, RenderSettings};

#[async_trait::async_trait]
pub trait JobExecutor: Send + Sync {
    /// Renders `code` and returns a locator for the result.
    async fn execute(&self, job_id: JobId, code: &str) -> Result<String, JobFailure>;
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SimulatedOutcome {
    #[default]
    Succeed,
    Fail {
        reason: String,
    },
}

/// Stand-in for the video renderer: waits a fixed delay, then reports the
/// configured outcome. No retries and no cancellation.
#[derive(Debug, Clone, Default)]
pub struct SimulatedRenderer {
    settings: RenderSettings,
}

impl SimulatedRenderer {
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    pub fn locator(&self, job_id: JobId) -> String {
        format!(
            "{}/{job_id}.mp4",
            self.settings.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait::async_trait]
impl JobExecutor for SimulatedRenderer {
    async fn execute(&self, job_id: JobId, code: &str) -> Result<String, JobFailure> {
        tutor_info!(
            "render job {} started code_len={} delay_ms={}",
            job_id,
            code.len(),
            self.settings.delay.as_millis()
        );
        tokio::time::sleep(self.settings.delay).await;

        match &self.settings.outcome {
            SimulatedOutcome::Succeed => {
                let locator = self.locator(job_id);
                tutor_info!("render job {} ready at {}", job_id, locator);
                Ok(locator)
            }
            SimulatedOutcome::Fail { reason } => {
                tutor_warn!("render job {} failed: {}", job_id, reason);
                Err(JobFailure::new(reason.clone()))
            }
        }
    }
}
