use chrono::{DateTime, Utc};

use crate::{
    extract_sections, format_lines, DisplayNode, Job, JobId, JobState, Message, ReplyMode,
    Sender, Span,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatViewModel {
    pub messages: Vec<MessageRowView>,
    pub typing: bool,
    pub input: String,
    /// False while a reply is outstanding; resubmission is blocked.
    pub input_enabled: bool,
    pub mode: ReplyMode,
    pub has_credential: bool,
    pub jobs: Vec<JobRowView>,
    pub solution: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRowView {
    pub index: usize,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    pub nodes: Vec<DisplayNode>,
    pub script: Option<String>,
    pub code: Option<String>,
    /// Most recent render of this message's code block.
    pub job: Option<JobRowView>,
}

impl MessageRowView {
    pub(crate) fn new(index: usize, message: &Message, job: Option<JobRowView>) -> Self {
        match message.sender {
            Sender::Assistant => {
                let sections = extract_sections(&message.content);
                Self {
                    index,
                    sender: message.sender,
                    timestamp: message.timestamp,
                    nodes: format_lines(sections.explanation.trim()).collect(),
                    script: sections.script().map(str::to_string),
                    code: sections.code().map(str::to_string),
                    job,
                }
            }
            // User text is shown as typed.
            Sender::User => Self {
                index,
                sender: message.sender,
                timestamp: message.timestamp,
                nodes: message
                    .content
                    .lines()
                    .map(|line| DisplayNode::Paragraph(vec![Span::Text(line.to_string())]))
                    .collect(),
                script: None,
                code: None,
                job,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRowView {
    pub job_id: JobId,
    pub source_message: usize,
    pub state: JobState,
}

impl From<&Job> for JobRowView {
    fn from(job: &Job) -> Self {
        Self {
            job_id: job.id,
            source_message: job.source_message,
            state: job.state.clone(),
        }
    }
}
