use chrono::{DateTime, Utc};

use crate::{
    canned_reply, solve_equation, ChatError, ChatState, Effect, HistoryEntry, HistoryRole,
    JobState, Message, Msg, Notice, ReplyMode, RequestId, Sender, FALLBACK_REPLY,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: ChatState, msg: Msg) -> (ChatState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::CredentialEntered(raw) => {
            let credential = raw.trim();
            if credential.is_empty() {
                state.set_credential(None);
                vec![Effect::Notify(Notice::info(
                    "API key cleared",
                    "Live replies are disabled until a key is entered.",
                ))]
            } else {
                state.set_credential(Some(credential.to_string()));
                vec![Effect::Notify(Notice::success(
                    "API key saved",
                    "The key is kept in memory for this session only.",
                ))]
            }
        }
        Msg::ModeSelected(mode) => {
            state.set_mode(mode);
            Vec::new()
        }
        Msg::Submitted { at } => submit(&mut state, at),
        Msg::ReplyArrived {
            request_id,
            at,
            result,
        } => receive_reply(&mut state, request_id, at, result),
        Msg::CannedReplyDue { request_id, at } => {
            receive_reply(&mut state, request_id, at, Ok(canned_reply(request_id).to_string()))
        }
        Msg::RunCodeRequested {
            message_index,
            code,
        } => run_embedded_code(&mut state, message_index, code),
        Msg::JobFinished { job_id, result } => {
            let (next, notice) = match result {
                Ok(result_ref) => (
                    JobState::Ready { result_ref },
                    Notice::success("Video ready", "Your animation finished rendering."),
                ),
                Err(reason) => (
                    JobState::Failed {
                        reason: reason.clone(),
                    },
                    Notice::error("Video generation failed", reason),
                ),
            };
            // Late or duplicate completions must not notify twice.
            if state.settle_job(job_id, next) {
                vec![Effect::Notify(notice)]
            } else {
                Vec::new()
            }
        }
        Msg::CopyRequested(text) => {
            if text.is_empty() {
                vec![Effect::Notify(Notice::error(
                    "Nothing to copy",
                    "That message has no animation code.",
                ))]
            } else {
                vec![Effect::CopyToClipboard { text }]
            }
        }
        Msg::CopyFinished(result) => match result {
            Ok(()) => vec![Effect::Notify(Notice::success(
                "Copied",
                "Code copied to clipboard.",
            ))],
            Err(reason) => vec![Effect::Notify(Notice::error("Copy failed", reason))],
        },
        Msg::ClearRequested => {
            if state.is_typing() || state.active_job().is_some() {
                vec![Effect::Notify(Notice::info(
                    "Please wait",
                    "The chat can be cleared once the current reply or video is finished.",
                ))]
            } else {
                state.clear_conversation();
                Vec::new()
            }
        }
        Msg::EquationSubmitted(equation) => {
            if !equation.trim().is_empty() {
                state.set_solution(solve_equation(&equation).to_string());
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn submit(state: &mut ChatState, at: DateTime<Utc>) -> Vec<Effect> {
    // Only one reply may be outstanding. The typed text stays in the input.
    if state.is_typing() {
        return vec![Effect::Notify(Notice::info(
            "Tutor is still typing",
            "Please wait for the current reply before sending another question.",
        ))];
    }
    if state.input().trim().is_empty() {
        return vec![rejection(ChatError::EmptyInput)];
    }
    let mode = state.config().mode;
    let credential = match (mode, state.credential()) {
        (ReplyMode::Live, None) => return vec![rejection(ChatError::MissingCredential)],
        (ReplyMode::Live, Some(credential)) => Some(credential.expose().to_string()),
        (ReplyMode::Canned, _) => None,
    };

    let text = state.take_input();
    if let Err(err) = state.messages_mut().append(Message::user(text, at)) {
        return vec![rejection(err)];
    }
    let request_id = state.begin_reply();

    match credential {
        Some(credential) => vec![Effect::RequestCompletion {
            request_id,
            history: history(state),
            credential,
        }],
        None => vec![Effect::ScheduleCannedReply {
            request_id,
            delay: state.config().canned_reply_delay,
        }],
    }
}

fn receive_reply(
    state: &mut ChatState,
    request_id: RequestId,
    at: DateTime<Utc>,
    result: Result<String, ChatError>,
) -> Vec<Effect> {
    if !state.finish_reply(request_id) {
        return Vec::new();
    }
    match result {
        Ok(content) => {
            state.messages_mut().push(Message::assistant(content, at));
            Vec::new()
        }
        Err(err) => {
            state
                .messages_mut()
                .push(Message::assistant(FALLBACK_REPLY, at));
            vec![Effect::Notify(Notice::error(
                "Couldn't reach the tutor",
                err.to_string(),
            ))]
        }
    }
}

fn run_embedded_code(state: &mut ChatState, message_index: usize, code: String) -> Vec<Effect> {
    if state.active_job().is_some() {
        return vec![Effect::Notify(Notice::info(
            "Video in progress",
            "Wait for the current video to finish before starting another.",
        ))];
    }
    if state.messages().get(message_index).is_none() {
        return vec![Effect::Notify(Notice::error(
            "Nothing to run",
            format!("There is no message #{message_index}."),
        ))];
    }
    if code.trim().is_empty() {
        return vec![Effect::Notify(Notice::error(
            "Nothing to run",
            "That message has no animation code.",
        ))];
    }

    let job_id = state.start_job(message_index);
    vec![
        Effect::StartJob { job_id, code },
        Effect::Notify(Notice::info(
            "Generating video",
            "Your animation is being rendered. This can take a moment.",
        )),
    ]
}

fn history(state: &ChatState) -> Vec<HistoryEntry> {
    state
        .messages()
        .iter()
        .map(|message| HistoryEntry {
            role: match message.sender {
                Sender::User => HistoryRole::User,
                Sender::Assistant => HistoryRole::Assistant,
            },
            content: message.content.clone(),
        })
        .collect()
}

fn rejection(err: ChatError) -> Effect {
    let title = match err {
        ChatError::EmptyInput => "Nothing to send",
        ChatError::MissingCredential => "API key required",
        ChatError::NetworkFailure(_) | ChatError::MalformedResponse(_) => "Request failed",
    };
    Effect::Notify(Notice::error(title, err.to_string()))
}
