pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Matching API
        .route("/api/v1/job-match", post(handlers::handle_job_match))
        .route("/api/v1/skill-gap", post(handlers::handle_skill_gap))
        .route(
            "/api/v1/skill-gap/explain",
            post(handlers::handle_skill_gap_explain),
        )
        .route("/api/v1/learning-path", post(handlers::handle_learning_path))
        .route("/api/v1/compare", post(handlers::handle_compare))
        .route("/api/v1/roles", get(handlers::handle_list_roles))
        .with_state(state)
}
