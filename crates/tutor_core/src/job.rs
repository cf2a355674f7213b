pub type JobId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobState {
    Processing,
    Ready { result_ref: String },
    Failed { reason: String },
}

impl JobState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobState::Processing)
    }
}

/// A simulated render of the code block in one assistant message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: JobId,
    /// Index into the message store. Fixed for the life of the job.
    pub source_message: usize,
    pub state: JobState,
}

impl Job {
    pub(crate) fn processing(id: JobId, source_message: usize) -> Self {
        Self {
            id,
            source_message,
            state: JobState::Processing,
        }
    }

    pub fn result_ref(&self) -> Option<&str> {
        match &self.state {
            JobState::Ready { result_ref } => Some(result_ref),
            _ => None,
        }
    }
}
