use async_trait::async_trait;
use log::debug;
use reqwest::{Client as HttpClient, header::{HeaderMap, HeaderValue, CONTENT_TYPE, AUTHORIZATION}};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error as StdError;

use super::{ChatClient, CompletionResponse, UpstreamError};
use crate::llm::LlmConfig;
use crate::models::chat::ChatMessage;

/// Client for an OpenAI-compatible `chat/completions` endpoint (DeepSeek by default).
pub struct DeepSeekChatClient {
    http: HttpClient,
    model: String,
    base_url: String,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct DeepSeekChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct DeepSeekResponse {
    choices: Vec<DeepSeekChoice>,
}

#[derive(Deserialize)]
struct DeepSeekChoice {
    message: DeepSeekMessage,
}

#[derive(Deserialize)]
struct DeepSeekMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct DeepSeekErrorEnvelope {
    error: DeepSeekErrorBody,
}

#[derive(Deserialize)]
struct DeepSeekErrorBody {
    message: String,
}

impl DeepSeekChatClient {
    pub fn new(
        api_key: &str,
        base_url: &str,
        model: String,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<Self, Box<dyn StdError + Send + Sync>> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|e| format!("Invalid API key format: {}", e))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        // No request timeout: the upstream call may take as long as the provider needs.
        let http = HttpClient::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| Box::new(e) as Box<dyn StdError + Send + Sync>)?;

        Ok(Self {
            http,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_tokens,
            temperature,
        })
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, Box<dyn StdError + Send + Sync>> {
        Self::new(
            &config.api_key,
            &config.base_url,
            config.completion_model.clone(),
            config.max_tokens,
            config.temperature,
        )
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

/// Prefer the provider's own `error.message`; fall back to the raw body.
fn upstream_error_message(body: &str) -> String {
    match serde_json::from_str::<DeepSeekErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => body.trim().to_string(),
    }
}

fn extract_completion(raw: Value) -> Result<CompletionResponse, UpstreamError> {
    let parsed: DeepSeekResponse = serde_json::from_value(raw.clone())
        .map_err(|e| UpstreamError::Decode(e.to_string()))?;

    let choice = parsed.choices.into_iter().next().ok_or(UpstreamError::EmptyChoices)?;
    let content = choice
        .message
        .content
        .ok_or_else(|| UpstreamError::Decode("first choice has no message content".to_string()))?;

    Ok(CompletionResponse { response: content, raw })
}

#[async_trait]
impl ChatClient for DeepSeekChatClient {
    async fn complete(
        &self,
        messages: &[ChatMessage]
    ) -> Result<CompletionResponse, UpstreamError> {
        let url = self.completions_url();
        let req = DeepSeekChatRequest {
            model: &self.model,
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        debug!("POST {} with {} message(s)", url, messages.len());
        let resp = self.http.post(&url).json(&req).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message: upstream_error_message(&body),
            });
        }

        let raw: Value = serde_json::from_str(&body)
            .map_err(|e| UpstreamError::Decode(e.to_string()))?;
        extract_completion(raw)
    }

    fn get_model(&self) -> String {
        self.model.clone()
    }

    fn get_base_url(&self) -> String {
        self.base_url.clone()
    }
}
