use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::view_model::{ChatViewModel, JobRowView, MessageRowView};
use crate::{Job, JobId, JobState, Message, MessageStore, WELCOME_TRANSCRIPT};

pub type RequestId = u64;

/// Where assistant replies come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplyMode {
    /// Canned tutor replies after a fixed delay. No credential needed.
    #[default]
    Canned,
    /// One chat-completion request per submission.
    Live,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    pub mode: ReplyMode,
    pub canned_reply_delay: Duration,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            mode: ReplyMode::Canned,
            canned_reply_delay: Duration::from_millis(2000),
        }
    }
}

/// Session-only API key. Kept out of `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct Credential(String);

impl Credential {
    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(..)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatState {
    config: ChatConfig,
    messages: MessageStore,
    input: String,
    credential: Option<Credential>,
    pending_reply: Option<RequestId>,
    next_request_id: RequestId,
    jobs: BTreeMap<JobId, Job>,
    next_job_id: JobId,
    solution: Option<String>,
    dirty: bool,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ChatConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Seeds the greeting transcript shown when the chat page opens.
    pub fn with_welcome(mut self, at: DateTime<Utc>) -> Self {
        for (sender, content) in WELCOME_TRANSCRIPT {
            let message = Message {
                sender,
                content: content.to_string(),
                timestamp: at,
            };
            self.messages.push(message);
        }
        self
    }

    pub fn view(&self) -> ChatViewModel {
        let messages = self
            .messages
            .iter()
            .enumerate()
            .map(|(index, message)| {
                let latest_job = self
                    .jobs
                    .values()
                    .rev()
                    .find(|job| job.source_message == index)
                    .map(JobRowView::from);
                MessageRowView::new(index, message, latest_job)
            })
            .collect();

        ChatViewModel {
            messages,
            typing: self.is_typing(),
            input: self.input.clone(),
            input_enabled: !self.is_typing(),
            mode: self.config.mode,
            has_credential: self.credential.is_some(),
            jobs: self.jobs.values().map(JobRowView::from).collect(),
            solution: self.solution.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    pub fn messages(&self) -> &MessageStore {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_typing(&self) -> bool {
        self.pending_reply.is_some()
    }

    pub fn pending_reply(&self) -> Option<RequestId> {
        self.pending_reply
    }

    pub fn job(&self, job_id: JobId) -> Option<&Job> {
        self.jobs.get(&job_id)
    }

    pub fn jobs(&self) -> impl Iterator<Item = &Job> {
        self.jobs.values()
    }

    /// The job currently holding the single render slot, if any.
    pub fn active_job(&self) -> Option<&Job> {
        self.jobs
            .values()
            .find(|job| job.state == JobState::Processing)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_input(&mut self, input: String) {
        if self.input != input {
            self.input = input;
            self.mark_dirty();
        }
    }

    pub(crate) fn take_input(&mut self) -> String {
        self.mark_dirty();
        std::mem::take(&mut self.input)
    }

    pub(crate) fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub(crate) fn set_credential(&mut self, credential: Option<String>) {
        self.credential = credential.map(Credential);
        self.mark_dirty();
    }

    pub(crate) fn set_mode(&mut self, mode: ReplyMode) {
        if self.config.mode != mode {
            self.config.mode = mode;
            self.mark_dirty();
        }
    }

    pub(crate) fn messages_mut(&mut self) -> &mut MessageStore {
        self.mark_dirty();
        &mut self.messages
    }

    pub(crate) fn begin_reply(&mut self) -> RequestId {
        self.next_request_id += 1;
        self.pending_reply = Some(self.next_request_id);
        self.mark_dirty();
        self.next_request_id
    }

    /// Clears the typing indicator if `request_id` is the outstanding request.
    pub(crate) fn finish_reply(&mut self, request_id: RequestId) -> bool {
        if self.pending_reply != Some(request_id) {
            return false;
        }
        self.pending_reply = None;
        self.mark_dirty();
        true
    }

    pub(crate) fn start_job(&mut self, source_message: usize) -> JobId {
        self.next_job_id += 1;
        let job_id = self.next_job_id;
        self.jobs
            .insert(job_id, Job::processing(job_id, source_message));
        self.mark_dirty();
        job_id
    }

    /// Moves a processing job to its terminal state. Returns false if the job
    /// is unknown or already settled.
    pub(crate) fn settle_job(&mut self, job_id: JobId, state: JobState) -> bool {
        match self.jobs.get_mut(&job_id) {
            Some(job) if job.state == JobState::Processing => {
                job.state = state;
                self.mark_dirty();
                true
            }
            _ => false,
        }
    }

    pub(crate) fn clear_conversation(&mut self) {
        self.messages.clear();
        self.jobs.clear();
        self.mark_dirty();
    }

    pub(crate) fn set_solution(&mut self, solution: String) {
        self.solution = Some(solution);
        self.mark_dirty();
    }
}
