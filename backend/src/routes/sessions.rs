//! Workout session API routes
//!
//! Sessions are created once when a workout is finished and never edited.

use crate::auth::Owner;
use crate::error::ApiError;
use crate::repositories::DateRange;
use crate::services::WorkoutService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use fitness_tracker_shared::{
    CreateSessionRequest, LatestSessionResponse, SessionListQuery, SessionListResponse,
    WorkoutSession,
};

pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(record_session).get(list_sessions))
        .route("/latest", get(latest_session))
}

/// POST /api/v1/sessions - Record a finished workout
async fn record_session(
    State(state): State<AppState>,
    owner: Owner,
    Json(req): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<WorkoutSession>), ApiError> {
    let session = WorkoutService::record_session(
        state.db(),
        owner.user_id,
        req,
        state.config().timeline.default_utc_offset_minutes,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(session)))
}

/// GET /api/v1/sessions?template_id= - Sessions, newest first
async fn list_sessions(
    State(state): State<AppState>,
    owner: Owner,
    Query(query): Query<SessionListQuery>,
) -> Result<Json<SessionListResponse>, ApiError> {
    let sessions =
        WorkoutService::list_sessions(state.db(), owner.user_id, query.template_id, DateRange::all())
            .await?;
    Ok(Json(SessionListResponse { sessions }))
}

/// GET /api/v1/sessions/latest?template_id= - Last session of a template
async fn latest_session(
    State(state): State<AppState>,
    owner: Owner,
    Query(query): Query<SessionListQuery>,
) -> Result<Json<LatestSessionResponse>, ApiError> {
    let template_id = query
        .template_id
        .ok_or_else(|| ApiError::BadRequest("template_id is required".to_string()))?;

    let session = WorkoutService::latest_session(state.db(), owner.user_id, template_id).await?;
    Ok(Json(LatestSessionResponse { session }))
}
