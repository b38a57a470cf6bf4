//! Goal profile API routes

use crate::auth::Owner;
use crate::error::ApiError;
use crate::services::GoalsService;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use fitness_tracker_shared::{GoalProfile, GoalsResponse, UpsertGoalsRequest};

pub fn goal_routes() -> Router<AppState> {
    Router::new().route("/", get(get_goals).put(upsert_goals))
}

/// GET /api/v1/goals - `{"goals": null}` until goals are first set
async fn get_goals(
    State(state): State<AppState>,
    owner: Owner,
) -> Result<Json<GoalsResponse>, ApiError> {
    let goals = GoalsService::get(state.db(), owner.user_id).await?;
    Ok(Json(GoalsResponse { goals }))
}

/// PUT /api/v1/goals - Replace the goal profile
async fn upsert_goals(
    State(state): State<AppState>,
    owner: Owner,
    Json(req): Json<UpsertGoalsRequest>,
) -> Result<Json<GoalProfile>, ApiError> {
    let profile = GoalsService::upsert(state.db(), owner.user_id, req).await?;
    Ok(Json(profile))
}
