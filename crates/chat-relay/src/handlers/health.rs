use axum::extract::State;
use axum::http::StatusCode;

use crate::server::AppState;

pub async fn livez() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

/// Ready once the configured service resolves to a provider with a credential.
pub async fn readyz(State(state): State<AppState>) -> (StatusCode, &'static str) {
    if state.relay.is_ready() {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "provider not configured")
    }
}
