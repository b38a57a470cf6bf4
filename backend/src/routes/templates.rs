//! Workout template API routes

use crate::auth::Owner;
use crate::error::ApiError;
use crate::services::WorkoutService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use fitness_tracker_shared::{TemplateListResponse, TemplateRequest, WorkoutTemplate};
use uuid::Uuid;

pub fn template_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_template).get(list_templates))
        .route(
            "/:id",
            get(get_template).put(update_template).delete(delete_template),
        )
}

async fn create_template(
    State(state): State<AppState>,
    owner: Owner,
    Json(req): Json<TemplateRequest>,
) -> Result<(StatusCode, Json<WorkoutTemplate>), ApiError> {
    let template = WorkoutService::create_template(state.db(), owner.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(template)))
}

async fn list_templates(
    State(state): State<AppState>,
    owner: Owner,
) -> Result<Json<TemplateListResponse>, ApiError> {
    let templates = WorkoutService::list_templates(state.db(), owner.user_id).await?;
    Ok(Json(TemplateListResponse { templates }))
}

async fn get_template(
    State(state): State<AppState>,
    owner: Owner,
    Path(id): Path<Uuid>,
) -> Result<Json<WorkoutTemplate>, ApiError> {
    let template = WorkoutService::get_template(state.db(), owner.user_id, id).await?;
    Ok(Json(template))
}

async fn update_template(
    State(state): State<AppState>,
    owner: Owner,
    Path(id): Path<Uuid>,
    Json(req): Json<TemplateRequest>,
) -> Result<Json<WorkoutTemplate>, ApiError> {
    let template = WorkoutService::update_template(state.db(), owner.user_id, id, req).await?;
    Ok(Json(template))
}

async fn delete_template(
    State(state): State<AppState>,
    owner: Owner,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    WorkoutService::delete_template(state.db(), owner.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
