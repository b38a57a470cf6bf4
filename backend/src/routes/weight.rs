//! Weight API routes

use crate::auth::Owner;
use crate::error::ApiError;
use crate::repositories::DateRange;
use crate::services::WeightService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, post},
    Json, Router,
};
use fitness_tracker_shared::{LogWeightRequest, TimelineQuery, WeightEntry, WeightListResponse};
use uuid::Uuid;

pub fn weight_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(log_weight).get(list_weights))
        .route("/:id", delete(delete_weight))
}

/// POST /api/v1/weight - Log a weight entry
///
/// The value is stored in the unit it was sent in (kg when omitted).
async fn log_weight(
    State(state): State<AppState>,
    owner: Owner,
    Json(req): Json<LogWeightRequest>,
) -> Result<(StatusCode, Json<WeightEntry>), ApiError> {
    let entry = WeightService::log_weight(
        state.db(),
        owner.user_id,
        req,
        state.config().timeline.default_utc_offset_minutes,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/v1/weight?from=&to= - Weight history, newest first
async fn list_weights(
    State(state): State<AppState>,
    owner: Owner,
    Query(query): Query<TimelineQuery>,
) -> Result<Json<WeightListResponse>, ApiError> {
    let weights =
        WeightService::list(state.db(), owner.user_id, DateRange::new(query.from, query.to)).await?;
    Ok(Json(WeightListResponse { weights }))
}

/// DELETE /api/v1/weight/:id
async fn delete_weight(
    State(state): State<AppState>,
    owner: Owner,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    WeightService::delete(state.db(), owner.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
