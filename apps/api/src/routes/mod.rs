pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::ai::handlers as ai;
use crate::parser::handlers as parser;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Parser API
        .route("/api/v1/resume/parse", post(parser::handle_parse))
        // AI API
        .route("/api/v1/industries", get(ai::handle_list_industries))
        .route("/api/v1/resume-ai", post(ai::handle_resume_ai))
        .route("/api/v1/resume-ai/stream", post(ai::handle_resume_ai_stream))
        .with_state(state)
}
