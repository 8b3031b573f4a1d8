use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::skills::analysis::{analyze_goal, GapAnalysisResult, GoalRequest};
use crate::state::AppState;

/// POST /api/study/analyze
///
/// Always answers 200; degraded analyses are reported in the body.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<GoalRequest>,
) -> Result<Json<GapAnalysisResult>, AppError> {
    let result = analyze_goal(&request, &state.taxonomy, state.enrichment()).await;
    Ok(Json(result))
}
