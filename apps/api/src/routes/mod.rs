pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::documents::handlers as documents;
use crate::planning::handlers as planning;
use crate::skills::handlers as skills;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Skill gap analysis
        .route("/api/study/analyze", post(skills::handle_analyze))
        // Study plans
        .route("/api/study/plan", post(planning::handle_goal_plan))
        .route("/api/study/generate", post(planning::handle_topic_plan))
        .route("/api/study/history", get(planning::handle_history))
        .route(
            "/api/study/:id",
            get(planning::handle_get_plan).delete(planning::handle_delete_plan),
        )
        // Documents
        .route("/api/documents/extract", post(documents::handle_extract))
        .with_state(state)
}
