use crate::cli::Args;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Process-wide relay settings. Built once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub api_key: String,
    pub base_url: Url,
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
}

impl RelayConfig {
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let api_key = required(args.api_key.as_deref(), "DEEPSEEK_API_KEY")?;
        let raw_url = required(args.base_url.as_deref(), "DEEPSEEK_BASE_URL")?;
        let base_url = Url::parse(&raw_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: raw_url.clone(),
            reason: e.to_string(),
        })?;

        let allowed_origins = args
            .allowed_origins
            .iter()
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        Ok(Self {
            api_key,
            base_url,
            host: args.host.clone(),
            port: args.port,
            allowed_origins,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// Empty values count as missing.
fn required(value: Option<&str>, name: &'static str) -> Result<String, ConfigError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ConfigError::MissingVar(name)),
    }
}
