use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::connector::adapter::InMemorySessionStore;
use crate::domain::DomainError;

use super::container::Container;

/// Detail string for a missing or empty `message` parameter. Part of the
/// endpoint contract.
const MESSAGE_REQUIRED_DETAIL: &str = "Message parameter is required";

#[derive(Deserialize)]
struct ChatParams {
    message: Option<String>,
    session: Option<String>,
}

/// Build the HTTP surface: the chat endpoint plus a liveness probe.
pub fn router(container: Arc<Container>) -> Router {
    Router::new()
        .route("/api/chat", get(chat))
        .route("/health", get(health))
        .with_state(container)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

/// `GET /api/chat?message=...&session=...`
///
/// A missing `session` starts a fresh conversation under a generated ID,
/// echoed back so the caller can continue it on the next request.
async fn chat(
    State(container): State<Arc<Container>>,
    Query(params): Query<ChatParams>,
) -> Response {
    let message = params.message.unwrap_or_default();
    if message.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, MESSAGE_REQUIRED_DETAIL);
    }

    let session_id = params
        .session
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(InMemorySessionStore::new_session_id);

    let use_case = container.chat_turn_use_case();
    match use_case.handle(&session_id, &message).await {
        Ok(response) => {
            info!(
                "Chat turn complete: session={session_id}, {} record(s)",
                response.records().len()
            );
            Json(json!({
                "session": session_id,
                "response": response.text(),
                "results": response.records(),
                "query_url": response.issued_query(),
            }))
            .into_response()
        }
        Err(e) => {
            error!("Chat turn failed: {e}");
            match e {
                DomainError::InvalidInput(_) => {
                    error_response(StatusCode::BAD_REQUEST, MESSAGE_REQUIRED_DETAIL)
                }
                DomainError::LlmUnavailable(_) | DomainError::MalformedToolArguments(_) => {
                    error_response(StatusCode::BAD_GATEWAY, &e.to_string())
                }
            }
        }
    }
}

fn error_response(status: StatusCode, detail: &str) -> Response {
    (status, Json(json!({ "detail": detail }))).into_response()
}
