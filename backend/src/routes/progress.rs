//! Progress API routes

use crate::auth::Owner;
use crate::error::ApiError;
use crate::repositories::DateRange;
use crate::services::ProgressService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use fitness_tracker_shared::{ProgressSummaryResponse, TimelineQuery, TimelineResponse};

pub fn progress_routes() -> Router<AppState> {
    Router::new()
        .route("/timeline", get(get_timeline))
        .route("/summary", get(get_summary))
}

/// GET /api/v1/progress/timeline?from=&to= - Per-day activity, newest first
async fn get_timeline(
    State(state): State<AppState>,
    owner: Owner,
    Query(query): Query<TimelineQuery>,
) -> Result<Json<TimelineResponse>, ApiError> {
    let days =
        ProgressService::timeline(state.db(), owner.user_id, DateRange::new(query.from, query.to))
            .await?;
    Ok(Json(TimelineResponse { days }))
}

/// GET /api/v1/progress/summary - Weight change and weekly workouts
async fn get_summary(
    State(state): State<AppState>,
    owner: Owner,
) -> Result<Json<ProgressSummaryResponse>, ApiError> {
    let summary = ProgressService::summary(
        state.db(),
        owner.user_id,
        Utc::now(),
        state.config().timeline.weekly_window_days,
    )
    .await?;
    Ok(Json(summary))
}
