//! Chat Routes
//!
//! Endpoints:
//! - POST /api/v1/chat - Ask a question about the current document
//! - GET /api/v1/chat/messages - Full transcript, oldest first

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::chat::Message;
use crate::state::AppState;

/// Create the chat router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(ask))
        .route("/messages", get(list_messages))
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub query: String,
}

/// POST /api/v1/chat
///
/// Blank queries get `204 No Content` and leave the transcript alone.
async fn ask(State(state): State<AppState>, Json(request): Json<AskRequest>) -> Response {
    match state.session().ask(&request.query) {
        Some(turn) => Json(turn).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

#[derive(Debug, Serialize)]
pub struct MessagesResponse {
    pub count: usize,
    pub messages: Vec<Message>,
}

/// GET /api/v1/chat/messages
async fn list_messages(State(state): State<AppState>) -> Json<MessagesResponse> {
    let messages = state.session().messages();
    Json(MessagesResponse {
        count: messages.len(),
        messages,
    })
}
