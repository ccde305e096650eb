//! Chat relay HTTP handler.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::llm::Message;
use crate::relay::{RelayError, Turn};
use crate::server::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize)]
pub struct ChatPayload {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    history: Option<Vec<Message>>,
}

#[derive(Serialize)]
pub struct ChatReply {
    success: bool,
    response: String,
    history: Vec<Message>,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST {base_path}/chat
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatPayload>, JsonRejection>,
) -> Response {
    let turn = match payload {
        Ok(Json(payload)) => Turn {
            message: payload.message,
            history: payload.history.unwrap_or_default(),
        },
        Err(rejection) => {
            let err = RelayError::MalformedBody {
                reason: rejection.body_text(),
            };
            err.log();
            return err.render(state.detail_policy);
        }
    };

    match state.relay.relay(turn).await {
        Ok(exchange) => {
            let reply = ChatReply {
                success: true,
                response: exchange.reply,
                history: exchange.history,
            };
            (StatusCode::OK, Json(reply)).into_response()
        }
        Err(err) => {
            err.log();
            err.render(state.detail_policy)
        }
    }
}
