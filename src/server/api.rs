use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::llm::chat::ChatClient;
use crate::models::chat::{ChatRequest, ChatResponse};
use serde_json::Value;
use std::error::Error;
use std::sync::Arc;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderValue},
    routing::post,
    Json,
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use log::{info, error, warn};

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn ChatClient>,
}

/// Credentialed CORS for the configured origins. Methods and headers are
/// mirrored from the preflight, since `*` is not allowed with credentials.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(_) if o == "*" => {
                warn!("Ignoring wildcard CORS origin; list explicit origins when credentials are allowed");
                None
            }
            Ok(v) => Some(v),
            Err(e) => {
                warn!("Ignoring invalid CORS origin '{}': {}", o, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

pub fn build_router(state: AppState, allowed_origins: &[String]) -> Router {
    let layers = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_EXPOSE_HEADERS,
            HeaderValue::from_static("*"),
        ))
        .layer(cors_layer(allowed_origins));

    Router::new()
        .route("/api/chat", post(chat_handler))
        .layer(layers)
        .with_state(state)
}

pub async fn start_http_server(
    config: &RelayConfig,
    client: Arc<dyn ChatClient>,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let addr = config.listen_addr();
    let app = build_router(AppState { client }, &config.allowed_origins);

    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        error!("Failed to bind HTTP server to {}: {}. Try a different port.", addr, e);
        e
    })?;
    info!("HTTP server listening on: http://{}", listener.local_addr()?);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

pub async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ChatResponse>, RelayError> {
    let Json(body) = payload.map_err(|rejection| {
        warn!("Rejected chat request body: {}", rejection.body_text());
        RelayError::InvalidInput(rejection.body_text())
    })?;
    let req = ChatRequest::from_body(body);

    info!("Received messages: {}", req.messages);
    let messages = req.validate()?;

    match state.client.complete(&messages).await {
        Ok(completion) => {
            info!("API Response: {}", completion.raw);
            Ok(Json(ChatResponse { response: completion.response }))
        }
        Err(e) => {
            error!("Error during API call: {}", e);
            Err(RelayError::Upstream(e))
        }
    }
}
