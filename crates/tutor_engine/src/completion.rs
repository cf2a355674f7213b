use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tutor_logging::{tutor_debug, tutor_warn};

use crate::{ChatTurn, CompletionError, CompletionFailureKind, CompletionSettings};

#[async_trait::async_trait]
pub trait CompletionService: Send + Sync {
    /// Sends the whole conversation and returns the assistant's reply text.
    async fn complete(&self, turns: &[ChatTurn], credential: &str)
        -> Result<String, CompletionError>;
}

/// JSON body of a chat-completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequestBody {
    pub model: String,
    pub messages: Vec<WireMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: String,
    pub content: String,
}

impl CompletionRequestBody {
    /// System instruction first, then the conversation in order.
    pub fn new(settings: &CompletionSettings, turns: &[ChatTurn]) -> Self {
        let mut messages = Vec::with_capacity(turns.len() + 1);
        messages.push(WireMessage {
            role: "system".to_string(),
            content: settings.system_prompt.clone(),
        });
        messages.extend(turns.iter().map(|turn| WireMessage {
            role: turn.role.as_str().to_string(),
            content: turn.content.clone(),
        }));
        Self {
            model: settings.model.clone(),
            messages,
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Chat-completion client for OpenAI-compatible endpoints.
///
/// No request timeout is configured: a slow service surfaces only when the
/// connection fails.
#[derive(Debug, Clone)]
pub struct ReqwestCompletionService {
    client: reqwest::Client,
    settings: CompletionSettings,
}

impl ReqwestCompletionService {
    pub fn new(settings: CompletionSettings) -> Result<Self, CompletionError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|err| CompletionError::new(CompletionFailureKind::Network, err.to_string()))?;
        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &CompletionSettings {
        &self.settings
    }
}

#[async_trait::async_trait]
impl CompletionService for ReqwestCompletionService {
    async fn complete(
        &self,
        turns: &[ChatTurn],
        credential: &str,
    ) -> Result<String, CompletionError> {
        let body = CompletionRequestBody::new(&self.settings, turns);
        let payload = serde_json::to_vec(&body)
            .map_err(|err| CompletionError::new(CompletionFailureKind::Malformed, err.to_string()))?;
        tutor_debug!(
            "POST {} model={} turns={} bytes={}",
            self.settings.endpoint,
            body.model,
            turns.len(),
            payload.len()
        );

        let response = self
            .client
            .post(self.settings.endpoint.as_str())
            .header(AUTHORIZATION, format!("Bearer {credential}"))
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let text = response.text().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .ok()
                .and_then(|envelope| envelope.error.message)
                .unwrap_or_else(|| status.to_string());
            tutor_warn!("completion request failed: {} {}", status, message);
            return Err(CompletionError::new(
                CompletionFailureKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        let parsed: CompletionResponse = serde_json::from_str(&text)
            .map_err(|err| CompletionError::new(CompletionFailureKind::Malformed, err.to_string()))?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| {
                CompletionError::new(
                    CompletionFailureKind::Malformed,
                    "response contained no completion text",
                )
            })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> CompletionError {
    CompletionError::new(CompletionFailureKind::Network, err.to_string())
}
