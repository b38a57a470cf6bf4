//! Nutrition API routes

use crate::auth::Owner;
use crate::error::ApiError;
use crate::repositories::DateRange;
use crate::services::NutritionService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, post},
    Json, Router,
};
use fitness_tracker_shared::{FoodListQuery, FoodListResponse, LogFoodRequest, NutritionEntry};
use uuid::Uuid;

pub fn nutrition_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(log_food).get(list_foods))
        .route("/:id", delete(delete_food))
}

/// POST /api/v1/nutrition - Log a food
async fn log_food(
    State(state): State<AppState>,
    owner: Owner,
    Json(req): Json<LogFoodRequest>,
) -> Result<(StatusCode, Json<NutritionEntry>), ApiError> {
    let entry = NutritionService::log_food(
        state.db(),
        owner.user_id,
        req,
        state.config().timeline.default_utc_offset_minutes,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/v1/nutrition?date= - Foods, optionally for one day
async fn list_foods(
    State(state): State<AppState>,
    owner: Owner,
    Query(query): Query<FoodListQuery>,
) -> Result<Json<FoodListResponse>, ApiError> {
    let range = query.date.map(DateRange::day).unwrap_or_else(DateRange::all);
    let foods = NutritionService::list(state.db(), owner.user_id, range).await?;
    Ok(Json(FoodListResponse { foods }))
}

/// DELETE /api/v1/nutrition/:id
async fn delete_food(
    State(state): State<AppState>,
    owner: Owner,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    NutritionService::delete(state.db(), owner.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
