use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::{Method, StatusCode};
use axum::routing::{get, post};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;

use crate::config::{Config, ServerConfig};
use crate::handlers;
use crate::llm::ProviderRegistry;
use crate::relay::ChatRelay;
use crate::response::DetailPolicy;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<ChatRelay>,
    pub detail_policy: DetailPolicy,
}

impl AppState {
    pub fn new(relay: ChatRelay, detail_policy: DetailPolicy) -> Self {
        Self {
            relay: Arc::new(relay),
            detail_policy,
        }
    }

    /// Wire real providers from the start-up configuration.
    pub fn from_config(config: &Config) -> Self {
        let providers =
            ProviderRegistry::from_credentials(reqwest::Client::new(), &config.credentials);
        let relay = ChatRelay::new(providers, config.relay.service.clone());
        Self::new(relay, config.relay.detail_policy())
    }
}

pub fn build_app(state: AppState, server: &ServerConfig) -> Router {
    let chat = Router::new()
        .route("/chat", post(handlers::chat))
        .layer(chat_cors());

    let app = Router::new()
        .route("/livez", get(handlers::livez))
        .route("/readyz", get(handlers::readyz));

    let app = match normalize_base_path(&server.base_path) {
        Some(base) => app.nest(&base, chat),
        None => app.merge(chat),
    };

    app.with_state(state).layer(TimeoutLayer::with_status_code(
        StatusCode::REQUEST_TIMEOUT,
        Duration::from_secs(server.request_timeout_seconds),
    ))
}

/// Any origin (mirrored so credentials stay allowed), POST only.
fn chat_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([Method::POST])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// `/api/` becomes `/api`; an empty or root path yields `None`.
fn normalize_base_path(path: &str) -> Option<String> {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(format!("/{trimmed}"))
    }
}
