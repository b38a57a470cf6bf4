//! Nutrition entry repository

use super::DateRange;
use crate::db::{decimal_to_f64, f64_to_decimal};
use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use fitness_tracker_shared::{MealSlot, NutritionEntry};
use rust_decimal::Decimal;
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

/// Nutrition entry row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct NutritionEntryRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub calories: Decimal,
    pub protein_grams: Decimal,
    pub meal_slot: String,
    pub recorded_at: DateTime<Utc>,
    pub local_date: NaiveDate,
}

impl TryFrom<NutritionEntryRecord> for NutritionEntry {
    type Error = anyhow::Error;

    fn try_from(record: NutritionEntryRecord) -> Result<Self> {
        Ok(NutritionEntry {
            id: record.id,
            user_id: record.user_id,
            name: record.name,
            calories: decimal_to_f64(record.calories),
            protein_grams: decimal_to_f64(record.protein_grams),
            meal_slot: record
                .meal_slot
                .parse::<MealSlot>()
                .map_err(|e| anyhow::anyhow!(e))?,
            recorded_at: record.recorded_at,
            local_date: record.local_date,
        })
    }
}

/// Input for logging a food
#[derive(Debug, Clone)]
pub struct CreateNutritionEntry {
    pub user_id: Uuid,
    pub name: String,
    pub calories: f64,
    pub protein_grams: f64,
    pub meal_slot: MealSlot,
    pub recorded_at: DateTime<Utc>,
    pub local_date: NaiveDate,
}

/// Nutrition repository for database operations
pub struct NutritionRepository;

impl NutritionRepository {
    /// Insert one entry; takes a pool or an open transaction
    pub async fn create<'e, E>(
        executor: E,
        input: CreateNutritionEntry,
    ) -> Result<NutritionEntryRecord>
    where
        E: PgExecutor<'e>,
    {
        let record = sqlx::query_as::<_, NutritionEntryRecord>(
            r#"
            INSERT INTO nutrition_entries
                (user_id, name, calories, protein_grams, meal_slot, recorded_at, local_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, name, calories, protein_grams, meal_slot, recorded_at, local_date
            "#,
        )
        .bind(input.user_id)
        .bind(&input.name)
        .bind(f64_to_decimal(input.calories)?)
        .bind(f64_to_decimal(input.protein_grams)?)
        .bind(input.meal_slot.as_str())
        .bind(input.recorded_at)
        .bind(input.local_date)
        .fetch_one(executor)
        .await?;

        Ok(record)
    }

    /// Entries in a date range, newest first
    pub async fn list(
        pool: &PgPool,
        user_id: Uuid,
        range: DateRange,
    ) -> Result<Vec<NutritionEntryRecord>> {
        let records = sqlx::query_as::<_, NutritionEntryRecord>(
            r#"
            SELECT id, user_id, name, calories, protein_grams, meal_slot, recorded_at, local_date
            FROM nutrition_entries
            WHERE user_id = $1
              AND ($2::date IS NULL OR local_date >= $2)
              AND ($3::date IS NULL OR local_date <= $3)
            ORDER BY recorded_at DESC, created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(range.from)
        .bind(range.to)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM nutrition_entries
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
