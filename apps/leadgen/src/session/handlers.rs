//! Axum route handlers for the chat session API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::chat::ChatTurn;
use crate::session::store::SharedSession;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PostMessageRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct SessionCreatedResponse {
    pub session_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct SessionHistoryResponse {
    pub session_id: Uuid,
    pub turns: Vec<ChatTurn>,
}

pub(crate) async fn find_session(state: &AppState, id: Uuid) -> Result<SharedSession, AppError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionCreatedResponse>) {
    let session_id = state.sessions.create().await;
    tracing::info!(%session_id, "Session started");
    (StatusCode::CREATED, Json(SessionCreatedResponse { session_id }))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionHistoryResponse>, AppError> {
    let session = find_session(&state, id).await?;
    let turns = session.lock().await.turns().to_vec();
    Ok(Json(SessionHistoryResponse {
        session_id: id,
        turns,
    }))
}

/// DELETE /api/v1/sessions/:id
///
/// Ends the session. Its history is discarded.
pub async fn handle_end_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(id).await {
        tracing::info!(session_id = %id, "Session ended");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Session {id} not found")))
    }
}

/// POST /api/v1/sessions/:id/messages
///
/// Appends a user turn and the assistant's acknowledgement. Leads are only
/// generated on an explicit `/generate`.
pub async fn handle_post_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<PostMessageRequest>,
) -> Result<Json<SessionHistoryResponse>, AppError> {
    let content = request.content.trim();
    if content.is_empty() {
        return Err(AppError::Validation("content cannot be empty".to_string()));
    }

    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;
    session.append(ChatTurn::user(content));
    session.append(ChatTurn::assistant(format!(
        "Got it! I'll look for: **{content}**"
    )));

    Ok(Json(SessionHistoryResponse {
        session_id: id,
        turns: session.turns().to_vec(),
    }))
}
