pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod server;

use cli::Args;
use config::RelayConfig;
use llm::LlmConfig;
use log::info;
use server::Server;
use std::error::Error;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    // Fails before anything is bound if credentials are missing.
    let config = RelayConfig::from_args(&args)?;

    info!("--- Relay Configuration ---");
    info!("API Key configured: Yes ({} chars)", config.api_key.len());
    info!("Base URL configured: {}", config.base_url);
    info!("Listen Address: {}", config.listen_addr());
    info!("Allowed Origins: {}", config.allowed_origins.join(", "));
    info!("---------------------------");

    let llm_config = LlmConfig::from(&config);
    let client = llm::chat::new_client(&llm_config)?;
    info!("Chat Model: {} via {}", client.get_model(), client.get_base_url());

    info!("Starting server on: {}", config.listen_addr());
    let server = Server::new(config, client);
    server.run().await?;

    Ok(())
}
