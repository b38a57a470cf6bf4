//! Food logging service

use super::{invalid_field, resolve_when};
use crate::error::ApiError;
use crate::repositories::{CreateNutritionEntry, DateRange, NutritionRepository};
use chrono::Utc;
use fitness_tracker_shared::validation::{validate_calories, validate_name, validate_protein};
use fitness_tracker_shared::{LogFoodRequest, NutritionEntry};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

/// Nutrition service for business logic
pub struct NutritionService;

impl NutritionService {
    pub async fn log_food(
        pool: &PgPool,
        user_id: Uuid,
        req: LogFoodRequest,
        default_offset_minutes: i32,
    ) -> Result<NutritionEntry, ApiError> {
        req.validate()?;
        validate_name(&req.name, "Food").map_err(invalid_field("name"))?;
        validate_calories(req.calories).map_err(invalid_field("calories"))?;
        validate_protein(req.protein_grams).map_err(invalid_field("protein_grams"))?;
        let (recorded_at, local_date) = resolve_when(&req.when, default_offset_minutes, Utc::now())?;

        let record = NutritionRepository::create(
            pool,
            CreateNutritionEntry {
                user_id,
                name: req.name.trim().to_string(),
                calories: req.calories,
                protein_grams: req.protein_grams,
                meal_slot: req.meal_slot.unwrap_or_default(),
                recorded_at,
                local_date,
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        debug!(%user_id, %local_date, "Food logged");
        NutritionEntry::try_from(record).map_err(ApiError::Internal)
    }

    pub async fn list(
        pool: &PgPool,
        user_id: Uuid,
        range: DateRange,
    ) -> Result<Vec<NutritionEntry>, ApiError> {
        NutritionRepository::list(pool, user_id, range)
            .await
            .map_err(ApiError::Internal)?
            .into_iter()
            .map(|r| NutritionEntry::try_from(r).map_err(ApiError::Internal))
            .collect()
    }

    pub async fn delete(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), ApiError> {
        let deleted = NutritionRepository::delete(pool, id, user_id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(ApiError::NotFound(format!("Nutrition entry {}", id)));
        }
        Ok(())
    }
}
