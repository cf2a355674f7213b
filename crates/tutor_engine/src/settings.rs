use std::time::Duration;

use crate::SimulatedOutcome;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a patient math tutor. Explain concepts step by \
step using markdown headings, numbered lists, **bold** for key terms and \\( \\) or \\[ \\] for \
math. When a visual would help, add a narration script between {script} and {/script} and a \
Manim scene between {manim} and {/manim}.";

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSettings {
    pub endpoint: String,
    pub model: String,
    pub system_prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o".to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            temperature: 0.7,
            max_tokens: 2000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSettings {
    pub delay: Duration,
    /// Result locators are `{base_url}/{job_id}.mp4`.
    pub base_url: String,
    pub outcome: SimulatedOutcome,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(3000),
            base_url: "https://videos.mathtutor.local/renders".to_string(),
            outcome: SimulatedOutcome::Succeed,
        }
    }
}
