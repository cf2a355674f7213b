use std::fmt;

pub type RequestId = u64;
pub type JobId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRole {
    User,
    Assistant,
}

impl TurnRole {
    pub fn as_str(self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
        }
    }
}

/// One prior message as sent to the completion service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: TurnRole,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    CompletionFinished {
        request_id: RequestId,
        result: Result<String, CompletionError>,
    },
    CannedReplyDue {
        request_id: RequestId,
    },
    /// `Ok` carries the result locator of the rendered video.
    JobCompleted {
        job_id: JobId,
        result: Result<String, JobFailure>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CompletionError {
    pub kind: CompletionFailureKind,
    pub message: String,
}

impl CompletionError {
    pub fn new(kind: CompletionFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionFailureKind {
    HttpStatus(u16),
    Network,
    /// The body was not the expected JSON or carried no completion text.
    Malformed,
}

impl fmt::Display for CompletionFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionFailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            CompletionFailureKind::Network => write!(f, "network error"),
            CompletionFailureKind::Malformed => write!(f, "malformed response"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct JobFailure {
    pub reason: String,
}

impl JobFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}
