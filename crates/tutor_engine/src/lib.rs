//! Tutor engine: completion calls, simulated renders and other effect execution.
mod clipboard;
mod completion;
mod engine;
mod jobs;
mod settings;
mod types;

#[cfg(feature = "system-clipboard")]
pub use clipboard::SystemClipboard;
pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard};
pub use completion::{
    CompletionRequestBody, CompletionService, ReqwestCompletionService, WireMessage,
};
pub use engine::{dispatch, EngineCommand, EngineHandle, EngineServices};
pub use jobs::{JobExecutor, SimulatedOutcome, SimulatedRenderer};
pub use settings::{CompletionSettings, RenderSettings, DEFAULT_SYSTEM_PROMPT};
pub use types::{
    ChatTurn, CompletionError, CompletionFailureKind, EngineEvent, JobFailure, JobId, RequestId,
    TurnRole,
};
