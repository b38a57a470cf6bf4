//! Saved meal service
//!
//! Logging a saved meal writes one nutrition entry per food in a single
//! transaction, all sharing the same `recorded_at` and `local_date`.

use super::{invalid_field, resolve_when};
use crate::error::ApiError;
use crate::repositories::{
    CreateNutritionEntry, CreateSavedMeal, NutritionRepository, SavedMealRepository,
};
use chrono::{DateTime, NaiveDate, Utc};
use fitness_tracker_shared::validation::{validate_name, validate_saved_meal_foods};
use fitness_tracker_shared::{
    LogSavedMealRequest, MealSlot, NutritionEntry, SavedMeal, SavedMealFood, SavedMealRequest,
};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

/// Saved meal service for business logic
pub struct SavedMealService;

impl SavedMealService {
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        req: SavedMealRequest,
    ) -> Result<SavedMeal, ApiError> {
        req.validate()?;
        validate_name(&req.name, "Meal").map_err(invalid_field("name"))?;
        validate_saved_meal_foods(&req.foods).map_err(invalid_field("foods"))?;

        let foods = req
            .foods
            .into_iter()
            .map(|food| SavedMealFood {
                name: food.name.trim().to_string(),
                ..food
            })
            .collect();

        let record = SavedMealRepository::create(
            pool,
            CreateSavedMeal {
                user_id,
                name: req.name.trim().to_string(),
                foods,
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        Ok(record.into())
    }

    pub async fn list(pool: &PgPool, user_id: Uuid) -> Result<Vec<SavedMeal>, ApiError> {
        let records = SavedMealRepository::list(pool, user_id)
            .await
            .map_err(ApiError::Internal)?;
        Ok(records.into_iter().map(SavedMeal::from).collect())
    }

    pub async fn delete(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), ApiError> {
        let deleted = SavedMealRepository::delete(pool, id, user_id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(ApiError::NotFound(format!("Saved meal {}", id)));
        }
        Ok(())
    }

    /// Log every food of a saved meal as its own nutrition entry
    pub async fn log(
        pool: &PgPool,
        user_id: Uuid,
        id: Uuid,
        req: LogSavedMealRequest,
        default_offset_minutes: i32,
    ) -> Result<Vec<NutritionEntry>, ApiError> {
        req.validate()?;
        let (recorded_at, local_date) = resolve_when(&req.when, default_offset_minutes, Utc::now())?;

        let meal: SavedMeal = SavedMealRepository::get_by_id(pool, id, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound(format!("Saved meal {}", id)))?
            .into();

        let entries = nutrition_entries(
            &meal,
            user_id,
            req.meal_slot.unwrap_or_default(),
            recorded_at,
            local_date,
        );

        let mut tx = pool
            .begin()
            .await
            .map_err(|e| ApiError::Internal(e.into()))?;
        let mut logged = Vec::with_capacity(entries.len());
        for entry in entries {
            let record = NutritionRepository::create(&mut *tx, entry)
                .await
                .map_err(ApiError::Internal)?;
            logged.push(NutritionEntry::try_from(record).map_err(ApiError::Internal)?);
        }
        tx.commit().await.map_err(|e| ApiError::Internal(e.into()))?;

        debug!(%user_id, saved_meal = %id, foods = logged.len(), %local_date, "Saved meal logged");
        Ok(logged)
    }
}

/// One nutrition insert per food of `meal`
fn nutrition_entries(
    meal: &SavedMeal,
    user_id: Uuid,
    meal_slot: MealSlot,
    recorded_at: DateTime<Utc>,
    local_date: NaiveDate,
) -> Vec<CreateNutritionEntry> {
    meal.foods
        .iter()
        .map(|food| CreateNutritionEntry {
            user_id,
            name: food.name.clone(),
            calories: food.calories,
            protein_grams: food.protein_grams,
            meal_slot,
            recorded_at,
            local_date,
        })
        .collect()
}
