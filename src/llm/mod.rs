pub mod chat;

use crate::config::RelayConfig;

pub const DEFAULT_CHAT_MODEL: &str = "deepseek-chat";
pub const DEFAULT_MAX_TOKENS: u32 = 2048;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Parameters for the upstream completion call. Model and sampling values
/// are fixed; only the credentials come from the environment.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub completion_model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl LlmConfig {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            completion_model: DEFAULT_CHAT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl From<&RelayConfig> for LlmConfig {
    fn from(config: &RelayConfig) -> Self {
        Self::new(config.api_key.clone(), config.base_url.as_str())
    }
}
