/// Failures the conversation controller recovers from. None of them are fatal.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("message is empty")]
    EmptyInput,
    #[error("an API key is required before sending messages")]
    MissingCredential,
    #[error("request failed: {0}")]
    NetworkFailure(String),
    #[error("unexpected response: {0}")]
    MalformedResponse(String),
}
