use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the chat input box.
    InputChanged(String),
    /// User entered the completion-service API key. Blank clears it.
    CredentialEntered(String),
    /// User switched between canned and live replies.
    ModeSelected(crate::ReplyMode),
    /// User submitted the current input.
    Submitted { at: DateTime<Utc> },
    /// Completion service answered (or failed) for a request.
    ReplyArrived {
        request_id: crate::RequestId,
        at: DateTime<Utc>,
        result: Result<String, crate::ChatError>,
    },
    /// The canned-reply timer for a request elapsed.
    CannedReplyDue {
        request_id: crate::RequestId,
        at: DateTime<Utc>,
    },
    /// User clicked "run" on the code block of a message.
    RunCodeRequested { message_index: usize, code: String },
    /// Job runner finished; `Ok` carries the result locator.
    JobFinished {
        job_id: crate::JobId,
        result: Result<String, String>,
    },
    /// User clicked "copy" on a block.
    CopyRequested(String),
    /// The platform finished writing to the clipboard.
    CopyFinished(Result<(), String>),
    /// User clicked "clear chat".
    ClearRequested,
    /// User submitted an equation to the landing-page solver.
    EquationSubmitted(String),
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
