use clap::Parser;

pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:3001,http://localhost:3002,http://localhost:3003,http://localhost:3004,http://localhost:3005,http://localhost:3006";

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Upstream Completion API Args ---
    /// API key for the upstream chat completion provider
    #[arg(long, env = "DEEPSEEK_API_KEY")] // Checked in RelayConfig so startup can report which one is missing
    pub api_key: Option<String>,

    /// Base URL for the upstream provider (e.g., https://api.deepseek.com/v1)
    #[arg(long, env = "DEEPSEEK_BASE_URL")]
    pub base_url: Option<String>,

    // --- HTTP Listener Args ---
    /// Interface the HTTP listener binds to.
    #[arg(long, env = "RELAY_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port the HTTP listener binds to.
    #[arg(long, env = "RELAY_PORT", default_value = "8080")]
    pub port: u16,

    /// Browser origins allowed to call the relay with credentials, comma separated.
    #[arg(
        long,
        env = "CORS_ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = DEFAULT_ALLOWED_ORIGINS
    )]
    pub allowed_origins: Vec<String>,
}
