use std::collections::BTreeMap;

use tutor_core::{
    ChatViewModel, DisplayNode, JobId, JobRowView, JobState, MessageRowView, Notice, NoticeLevel,
    ReplyMode, Sender, Span,
};

const BOLD: &str = "\x1b[1m";
const ITALIC: &str = "\x1b[3m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy)]
pub(crate) struct Style {
    pub ansi: bool,
}

impl Style {
    fn wrap(self, code: &str, text: &str) -> String {
        if self.ansi {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

/// Turns successive view models into the lines that changed since the last call.
pub(crate) struct Renderer {
    style: Style,
    printed_messages: usize,
    job_states: BTreeMap<JobId, JobState>,
    typing: bool,
    solution: Option<String>,
}

impl Renderer {
    pub fn new(style: Style) -> Self {
        Self {
            style,
            printed_messages: 0,
            job_states: BTreeMap::new(),
            typing: false,
            solution: None,
        }
    }

    pub fn render(&mut self, view: &ChatViewModel) -> Vec<String> {
        let mut out = Vec::new();

        if view.messages.len() < self.printed_messages {
            out.push(self.style.wrap(DIM, "(conversation cleared)"));
            self.printed_messages = 0;
            self.job_states.clear();
        }
        for row in &view.messages[self.printed_messages..] {
            out.push(render_row(row, self.style));
        }
        self.printed_messages = view.messages.len();

        if view.typing && !self.typing {
            out.push(self.style.wrap(DIM, "tutor is typing..."));
        }
        self.typing = view.typing;

        for job in &view.jobs {
            if self.job_states.get(&job.job_id) != Some(&job.state) {
                out.push(render_job(job, self.style));
                self.job_states.insert(job.job_id, job.state.clone());
            }
        }

        if view.solution != self.solution {
            if let Some(solution) = &view.solution {
                out.push(format!("Solution: {solution}"));
            }
            self.solution = view.solution.clone();
        }

        out
    }
}

pub(crate) fn render_status(view: &ChatViewModel) -> String {
    let mode = match view.mode {
        ReplyMode::Canned => "canned replies",
        ReplyMode::Live if view.has_credential => "live replies",
        ReplyMode::Live => "live replies (no API key yet, use /key)",
    };
    format!("Mode: {mode}")
}

pub(crate) fn render_row(row: &MessageRowView, style: Style) -> String {
    let who = match row.sender {
        Sender::User => "You",
        Sender::Assistant => "Tutor",
    };
    let mut lines = vec![style.wrap(
        BOLD,
        &format!("#{} {} [{}]", row.index, who, row.timestamp.format("%H:%M")),
    )];
    lines.extend(row.nodes.iter().map(|node| format!("  {}", render_node(node, style))));

    if let Some(script) = &row.script {
        lines.push(style.wrap(DIM, "  Script:"));
        lines.extend(script.lines().map(|line| format!("    {line}")));
    }
    if let Some(code) = &row.code {
        lines.push(style.wrap(
            DIM,
            &format!(
                "  Animation code (/run {0} to render, /copy {0} to copy):",
                row.index
            ),
        ));
        lines.extend(code.lines().map(|line| format!("    {line}")));
    }
    lines.join("\n")
}

fn render_node(node: &DisplayNode, style: Style) -> String {
    match node {
        DisplayNode::Heading { text, .. } => style.wrap(BOLD, text),
        DisplayNode::ListItem { label, spans } => format!("{label} {}", render_spans(spans, style)),
        DisplayNode::Spacer => String::new(),
        DisplayNode::Paragraph(spans) => render_spans(spans, style),
    }
}

fn render_spans(spans: &[Span], style: Style) -> String {
    spans
        .iter()
        .map(|span| match span {
            Span::Text(text) => text.clone(),
            Span::Strong(text) => style.wrap(BOLD, text),
            Span::Emphasis(text) => style.wrap(ITALIC, text),
            Span::Math {
                tex,
                display: false,
            } => format!("${tex}$"),
            Span::Math { tex, display: true } => format!("$${tex}$$"),
        })
        .collect()
}

pub(crate) fn render_job(job: &JobRowView, style: Style) -> String {
    match &job.state {
        JobState::Processing => format!(
            "Video #{} for message #{}: rendering...",
            job.job_id, job.source_message
        ),
        JobState::Ready { result_ref } => style.wrap(
            GREEN,
            &format!(
                "Video #{} for message #{}: ready at {result_ref}",
                job.job_id, job.source_message
            ),
        ),
        JobState::Failed { reason } => style.wrap(
            RED,
            &format!(
                "Video #{} for message #{}: failed ({reason})",
                job.job_id, job.source_message
            ),
        ),
    }
}

pub(crate) fn render_notice(notice: &Notice, style: Style) -> String {
    let text = format!("[{}] {}", notice.title, notice.body);
    match notice.level {
        NoticeLevel::Info => style.wrap(DIM, &text),
        NoticeLevel::Success => style.wrap(GREEN, &text),
        NoticeLevel::Error => style.wrap(RED, &text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use tutor_core::{update, ChatState, Msg};

    const PLAIN: Style = Style { ansi: false };

    fn seeded() -> ChatState {
        let at = DateTime::from_timestamp(1_760_000_000, 0).unwrap();
        ChatState::new().with_welcome(at)
    }

    fn ask(state: ChatState, text: &str, request_id: u64) -> ChatState {
        let at = DateTime::from_timestamp(1_760_000_000, 0).unwrap();
        let (state, _) = update(state, Msg::InputChanged(text.to_string()));
        let (state, _) = update(state, Msg::Submitted { at });
        let (state, _) = update(state, Msg::CannedReplyDue { request_id, at });
        state
    }

    #[test]
    fn markdown_reply_is_rendered_without_markers() {
        let state = ask(seeded(), "derivatives?", 1);
        let state = ask(state, "power rule?", 2);
        assert_eq!(state.messages().len(), 7);

        let row = state.view().messages[6].clone();
        let text = render_row(&row, PLAIN);
        assert!(text.starts_with("#6 Tutor"));
        assert!(text.contains("\n  The power rule\n"));
        assert!(text.contains("  1. Bring the exponent down as a coefficient."));
        assert!(text.contains("$$\\frac{d}{dx} x^n = n x^{n-1}$$"));
        assert!(text.contains("/run 6 to render"));
        assert!(text.contains("  For any real exponent n, the derivative of x^n is n·x^(n-1):"));
        assert!(!text.contains("##"));
        assert!(!text.contains("{manim}"));
        assert!(!text.contains("{script}"));
    }

    #[test]
    fn code_blocks_get_run_and_copy_hints() {
        let at = DateTime::from_timestamp(1_760_000_000, 0).unwrap();
        let row = MessageRowView {
            index: 7,
            sender: Sender::Assistant,
            timestamp: at,
            nodes: vec![
                DisplayNode::Heading {
                    level: 2,
                    text: "Title".to_string(),
                },
                DisplayNode::ListItem {
                    label: "1.".to_string(),
                    spans: vec![
                        Span::Text("see ".to_string()),
                        Span::Math {
                            tex: "x^2".to_string(),
                            display: false,
                        },
                    ],
                },
            ],
            script: Some("narrate".to_string()),
            code: Some("class A(Scene):\n    pass".to_string()),
            job: None,
        };
        let text = render_row(&row, PLAIN);
        assert!(text.contains("  Title\n  1. see $x^2$"));
        assert!(text.contains("/run 7 to render, /copy 7 to copy"));
        assert!(text.contains("    class A(Scene):\n        pass"));
        assert!(text.contains("    narrate"));
    }

    #[test]
    fn renderer_only_emits_changes() {
        let mut renderer = Renderer::new(PLAIN);
        let state = seeded();
        assert_eq!(renderer.render(&state.view()).len(), 3);
        assert!(renderer.render(&state.view()).is_empty());

        let (state, _) = update(
            state,
            Msg::RunCodeRequested {
                message_index: 2,
                code: "scene".to_string(),
            },
        );
        let lines = renderer.render(&state.view());
        assert_eq!(lines, vec!["Video #1 for message #2: rendering...".to_string()]);

        let (state, _) = update(
            state,
            Msg::JobFinished {
                job_id: 1,
                result: Ok("mem://1.mp4".to_string()),
            },
        );
        let lines = renderer.render(&state.view());
        assert_eq!(
            lines,
            vec!["Video #1 for message #2: ready at mem://1.mp4".to_string()]
        );

        let (state, _) = update(state, Msg::ClearRequested);
        assert_eq!(
            renderer.render(&state.view()),
            vec!["(conversation cleared)".to_string()]
        );
    }

    #[test]
    fn notices_include_title_and_body() {
        let notice = Notice::error("Copy failed", "no display");
        assert_eq!(render_notice(&notice, PLAIN), "[Copy failed] no display");
    }
}
