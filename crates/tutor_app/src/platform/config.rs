use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tutor_core::{ChatConfig, ReplyMode};
use tutor_engine::{CompletionSettings, RenderSettings, SimulatedOutcome};
use tutor_logging::LogDestination;

pub(crate) const CONFIG_FILENAME: &str = "tutor.ron";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum ModeSetting {
    Canned,
    Live,
}

impl From<ModeSetting> for ReplyMode {
    fn from(mode: ModeSetting) -> Self {
        match mode {
            ModeSetting::Canned => ReplyMode::Canned,
            ModeSetting::Live => ReplyMode::Live,
        }
    }
}

/// Settings read from `tutor.ron`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub mode: ModeSetting,
    pub endpoint: String,
    pub model: String,
    pub system_prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub reply_delay_ms: u64,
    pub render_delay_ms: u64,
    pub render_base_url: String,
    pub log_destination: LogDestination,
    pub color: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let chat = ChatConfig::default();
        let completion = CompletionSettings::default();
        let render = RenderSettings::default();
        Self {
            mode: ModeSetting::Canned,
            endpoint: completion.endpoint,
            model: completion.model,
            system_prompt: completion.system_prompt,
            temperature: completion.temperature,
            max_tokens: completion.max_tokens,
            reply_delay_ms: chat.canned_reply_delay.as_millis() as u64,
            render_delay_ms: render.delay.as_millis() as u64,
            render_base_url: render.base_url,
            log_destination: LogDestination::File,
            color: true,
        }
    }
}

impl AppConfig {
    pub fn chat_config(&self) -> ChatConfig {
        ChatConfig {
            mode: self.mode.into(),
            canned_reply_delay: Duration::from_millis(self.reply_delay_ms),
        }
    }

    pub fn completion_settings(&self) -> CompletionSettings {
        CompletionSettings {
            endpoint: self.endpoint.clone(),
            model: self.model.clone(),
            system_prompt: self.system_prompt.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            delay: Duration::from_millis(self.render_delay_ms),
            base_url: self.render_base_url.clone(),
            outcome: SimulatedOutcome::Succeed,
        }
    }
}

/// Where the active configuration came from. Logged once the logger is up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ConfigSource {
    Defaults,
    File(PathBuf),
    Invalid { path: PathBuf, reason: String },
}

/// Reads `{dir}/tutor.ron`. A missing file means defaults; an unreadable or
/// invalid one also falls back to defaults and reports why.
pub(crate) fn load_config(dir: &Path) -> (AppConfig, ConfigSource) {
    let path = dir.join(CONFIG_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return (AppConfig::default(), ConfigSource::Defaults);
        }
        Err(err) => {
            return (
                AppConfig::default(),
                ConfigSource::Invalid {
                    path,
                    reason: err.to_string(),
                },
            );
        }
    };

    match ron::from_str::<AppConfig>(&content) {
        Ok(config) => (config, ConfigSource::File(path)),
        Err(err) => (
            AppConfig::default(),
            ConfigSource::Invalid {
                path,
                reason: err.to_string(),
            },
        ),
    }
}
