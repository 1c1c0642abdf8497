pub mod api;

use crate::config::RelayConfig;
use crate::llm::chat::ChatClient;
use std::error::Error;
use std::sync::Arc;

pub struct Server {
    config: RelayConfig,
    client: Arc<dyn ChatClient>,
}

impl Server {
    pub fn new(config: RelayConfig, client: Arc<dyn ChatClient>) -> Self {
        Self { config, client }
    }

    pub async fn run(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        api::start_http_server(&self.config, self.client.clone()).await
    }
}
