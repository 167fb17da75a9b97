//! HTTP routes.

use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, Sse};
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use cellagent_core::{ChatStreamRequest, WorkflowEvent};
use cellagent_workflow::GENERIC_FAILURE_MESSAGE;
use serde_json::{json, Value};
use tokio_stream::{Stream, StreamExt};
use tracing::{info, warn};

use crate::state::AppState;

/// Path of the streaming endpoint.
pub const STREAM_PATH: &str = "/api/chat/stream";

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(STREAM_PATH, post(chat_stream))
        .route("/health", get(health))
        .with_state(state)
}

/// Start a simulated workflow and stream its events.
///
/// Attachments and the web search flag are accepted but do not influence
/// the simulation.
async fn chat_stream(
    State(state): State<AppState>,
    Json(request): Json<ChatStreamRequest>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!(
        files = request.files.len(),
        web_search = request.web_search,
        "Chat stream requested"
    );

    let events = state
        .simulator()
        .stream(request.message)
        .map(|event| Ok(to_sse_event(&event)));
    Sse::new(events)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": cellagent_core::VERSION,
    }))
}

fn to_sse_event(event: &WorkflowEvent) -> Event {
    match serde_json::to_string(event) {
        Ok(json) => Event::default().data(json),
        Err(e) => {
            warn!("Failed to encode {} event: {}", event.event_type(), e);
            let fallback = json!({ "type": "error", "message": GENERIC_FAILURE_MESSAGE });
            Event::default().data(fallback.to_string())
        }
    }
}
