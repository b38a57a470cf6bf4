//! Saved meal API routes

use crate::auth::Owner;
use crate::error::ApiError;
use crate::services::SavedMealService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, post},
    Json, Router,
};
use fitness_tracker_shared::{
    FoodListResponse, LogSavedMealRequest, SavedMeal, SavedMealListResponse, SavedMealRequest,
};
use uuid::Uuid;

pub fn saved_meal_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_saved_meal).get(list_saved_meals))
        .route("/:id", delete(delete_saved_meal))
        .route("/:id/log", post(log_saved_meal))
}

async fn create_saved_meal(
    State(state): State<AppState>,
    owner: Owner,
    Json(req): Json<SavedMealRequest>,
) -> Result<(StatusCode, Json<SavedMeal>), ApiError> {
    let meal = SavedMealService::create(state.db(), owner.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(meal)))
}

async fn list_saved_meals(
    State(state): State<AppState>,
    owner: Owner,
) -> Result<Json<SavedMealListResponse>, ApiError> {
    let saved_meals = SavedMealService::list(state.db(), owner.user_id).await?;
    Ok(Json(SavedMealListResponse { saved_meals }))
}

async fn delete_saved_meal(
    State(state): State<AppState>,
    owner: Owner,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    SavedMealService::delete(state.db(), owner.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/saved-meals/:id/log - Log each food of the meal
async fn log_saved_meal(
    State(state): State<AppState>,
    owner: Owner,
    Path(id): Path<Uuid>,
    Json(req): Json<LogSavedMealRequest>,
) -> Result<(StatusCode, Json<FoodListResponse>), ApiError> {
    let foods = SavedMealService::log(
        state.db(),
        owner.user_id,
        id,
        req,
        state.config().timeline.default_utc_offset_minutes,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(FoodListResponse { foods })))
}
