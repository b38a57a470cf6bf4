//! Saved meal repository
//!
//! Foods are stored as a JSONB array; totals are recomputed on read.

use anyhow::Result;
use chrono::{DateTime, Utc};
use fitness_tracker_shared::{SavedMeal, SavedMealFood};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

/// Saved meal row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SavedMealRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub foods: Json<Vec<SavedMealFood>>,
    pub created_at: DateTime<Utc>,
}

impl From<SavedMealRecord> for SavedMeal {
    fn from(record: SavedMealRecord) -> Self {
        let foods = record.foods.0;
        let (total_calories, total_protein_grams) = SavedMeal::totals(&foods);
        SavedMeal {
            id: record.id,
            user_id: record.user_id,
            name: record.name,
            foods,
            total_calories,
            total_protein_grams,
            created_at: record.created_at,
        }
    }
}

/// Input for saving a meal
#[derive(Debug, Clone)]
pub struct CreateSavedMeal {
    pub user_id: Uuid,
    pub name: String,
    pub foods: Vec<SavedMealFood>,
}

/// Saved meal repository for database operations
pub struct SavedMealRepository;

impl SavedMealRepository {
    pub async fn create(pool: &PgPool, input: CreateSavedMeal) -> Result<SavedMealRecord> {
        let record = sqlx::query_as::<_, SavedMealRecord>(
            r#"
            INSERT INTO saved_meals (user_id, name, foods)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, name, foods, created_at
            "#,
        )
        .bind(input.user_id)
        .bind(&input.name)
        .bind(Json(&input.foods))
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// All saved meals of an owner, newest first
    pub async fn list(pool: &PgPool, user_id: Uuid) -> Result<Vec<SavedMealRecord>> {
        let records = sqlx::query_as::<_, SavedMealRecord>(
            r#"
            SELECT id, user_id, name, foods, created_at
            FROM saved_meals
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    pub async fn get_by_id(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<SavedMealRecord>> {
        let record = sqlx::query_as::<_, SavedMealRecord>(
            r#"
            SELECT id, user_id, name, foods, created_at
            FROM saved_meals
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Delete a saved meal; foods already logged from it stay
    pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM saved_meals
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_converts_to_model_with_totals() {
        let record = SavedMealRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Post-workout".to_string(),
            foods: Json(vec![
                SavedMealFood {
                    name: "Whey".to_string(),
                    calories: 120.0,
                    protein_grams: 24.0,
                },
                SavedMealFood {
                    name: "Banana".to_string(),
                    calories: 105.0,
                    protein_grams: 1.3,
                },
            ]),
            created_at: Utc::now(),
        };

        let meal = SavedMeal::from(record);
        assert_eq!(meal.foods.len(), 2);
        assert_eq!(meal.total_calories, 225.0);
        assert!((meal.total_protein_grams - 25.3).abs() < 1e-9);
    }
}
