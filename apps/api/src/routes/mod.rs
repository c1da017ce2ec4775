pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Generation API
        .route("/api/v1/resumes/tailor", post(handlers::handle_tailor))
        .route("/api/v1/resumes/assess", post(handlers::handle_assess))
        .route("/api/v1/cover-letters", post(handlers::handle_cover_letter))
        .with_state(state)
}
