pub mod deepseek;

use async_trait::async_trait;
use std::error::Error as StdError;
use std::sync::Arc;
use thiserror::Error;
use super::LlmConfig;
use self::deepseek::DeepSeekChatClient;
use crate::models::chat::ChatMessage;

#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub response: String,
    /// Full upstream payload, kept for diagnostics.
    pub raw: serde_json::Value,
}

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("Upstream returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Malformed upstream response: {0}")]
    Decode(String),
    #[error("Upstream response contained no choices")]
    EmptyChoices,
}

#[async_trait]
pub trait ChatClient: Send + Sync {
    /// One completion round-trip. No retries.
    async fn complete(
        &self,
        messages: &[ChatMessage]
    ) -> Result<CompletionResponse, UpstreamError>;

    fn get_model(&self) -> String;
    fn get_base_url(&self) -> String;
}

pub fn new_client(
    config: &LlmConfig
) -> Result<Arc<dyn ChatClient>, Box<dyn StdError + Send + Sync>> {
    let client = DeepSeekChatClient::from_config(config)?;
    Ok(Arc::new(client))
}
