//! Axum route handlers for the study plan API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::study_plan::StudyPlanResponse;
use crate::planning::generator::{generate_goal_plan, generate_topic_plan};
use crate::planning::scheduler::DayPlan;
use crate::skills::analysis::{analyze_goal, GapAnalysisResult, GoalRequest};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TopicPlanRequest {
    pub topic: String,
    pub days: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct GoalPlanResponse {
    pub analysis: GapAnalysisResult,
    pub schedule: DayPlan,
    pub plan: StudyPlanResponse,
}

/// POST /api/study/plan
///
/// Runs the gap analysis, then schedules and stores a plan for it.
pub async fn handle_goal_plan(
    State(state): State<AppState>,
    Json(request): Json<GoalRequest>,
) -> Result<Json<GoalPlanResponse>, AppError> {
    let analysis = analyze_goal(&request, &state.taxonomy, state.enrichment()).await;
    let goal_plan = generate_goal_plan(
        request.goal_type,
        request.days,
        &analysis,
        state.generator(),
        state.store.as_ref(),
    )
    .await?;

    Ok(Json(GoalPlanResponse {
        analysis,
        schedule: goal_plan.schedule,
        plan: goal_plan.record,
    }))
}

/// POST /api/study/generate
pub async fn handle_topic_plan(
    State(state): State<AppState>,
    Json(request): Json<TopicPlanRequest>,
) -> Result<Json<StudyPlanResponse>, AppError> {
    let plan = generate_topic_plan(
        &request.topic,
        request.days,
        state.generator(),
        state.store.as_ref(),
    )
    .await?;
    Ok(Json(plan))
}

/// GET /api/study/history
pub async fn handle_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<StudyPlanResponse>>, AppError> {
    let plans = state.store.find_all().await?;
    Ok(Json(plans.into_iter().map(StudyPlanResponse::from).collect()))
}

/// GET /api/study/:id
pub async fn handle_get_plan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StudyPlanResponse>, AppError> {
    let plan = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Study plan {id} not found")))?;
    Ok(Json(plan.into()))
}

/// DELETE /api/study/:id
pub async fn handle_delete_plan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.store.delete_by_id(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Study plan {id} not found")))
    }
}
