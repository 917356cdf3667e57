pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::pipeline::handlers as pipeline_handlers;
use crate::session::handlers as session_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Chat sessions
        .route(
            "/api/v1/sessions",
            post(session_handlers::handle_create_session),
        )
        .route(
            "/api/v1/sessions/:id",
            get(session_handlers::handle_get_session).delete(session_handlers::handle_end_session),
        )
        .route(
            "/api/v1/sessions/:id/messages",
            post(session_handlers::handle_post_message),
        )
        // Lead pipeline
        .route(
            "/api/v1/sessions/:id/generate",
            post(pipeline_handlers::handle_generate),
        )
        .with_state(state)
}
