//! Tutor core: pure conversation state machine and view-model helpers.
mod canned;
mod effect;
mod error;
mod format;
mod job;
mod message;
mod msg;
mod sections;
mod solver;
mod state;
mod update;
mod view_model;

pub use canned::{canned_reply, FALLBACK_REPLY, STARTER_PROMPTS, WELCOME_TRANSCRIPT};
pub use effect::{Effect, HistoryEntry, HistoryRole, Notice, NoticeLevel};
pub use error::ChatError;
pub use format::{format_inline, format_lines, DisplayNode, FormattedLines, Span};
pub use job::{Job, JobId, JobState};
pub use message::{Message, MessageStore, Sender};
pub use msg::Msg;
pub use sections::{extract_sections, BlockKind, ExtractedBlock, Sections};
pub use solver::{solve_equation, UNSOLVED_EQUATION};
pub use state::{ChatConfig, ChatState, ReplyMode, RequestId};
pub use update::update;
pub use view_model::{ChatViewModel, JobRowView, MessageRowView};
