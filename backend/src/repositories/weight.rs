//! Weight entry repository

use super::DateRange;
use crate::db::{decimal_to_f64, f64_to_decimal};
use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use fitness_tracker_shared::{WeightEntry, WeightUnit};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Weight entry row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WeightEntryRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub weight_value: Decimal,
    pub unit: String,
    pub recorded_at: DateTime<Utc>,
    pub local_date: NaiveDate,
}

impl TryFrom<WeightEntryRecord> for WeightEntry {
    type Error = anyhow::Error;

    fn try_from(record: WeightEntryRecord) -> Result<Self> {
        Ok(WeightEntry {
            id: record.id,
            user_id: record.user_id,
            weight_value: decimal_to_f64(record.weight_value),
            unit: record
                .unit
                .parse::<WeightUnit>()
                .map_err(|e| anyhow::anyhow!(e))?,
            recorded_at: record.recorded_at,
            local_date: record.local_date,
        })
    }
}

/// Input for creating a weight entry
#[derive(Debug, Clone)]
pub struct CreateWeightEntry {
    pub user_id: Uuid,
    pub weight_value: f64,
    pub unit: WeightUnit,
    pub recorded_at: DateTime<Utc>,
    pub local_date: NaiveDate,
}

/// Weight repository for database operations
pub struct WeightRepository;

impl WeightRepository {
    pub async fn create(pool: &PgPool, input: CreateWeightEntry) -> Result<WeightEntryRecord> {
        let record = sqlx::query_as::<_, WeightEntryRecord>(
            r#"
            INSERT INTO weight_entries (user_id, weight_value, unit, recorded_at, local_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, weight_value, unit, recorded_at, local_date
            "#,
        )
        .bind(input.user_id)
        .bind(f64_to_decimal(input.weight_value)?)
        .bind(input.unit.abbreviation())
        .bind(input.recorded_at)
        .bind(input.local_date)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Entries in a date range, newest first
    pub async fn list(
        pool: &PgPool,
        user_id: Uuid,
        range: DateRange,
    ) -> Result<Vec<WeightEntryRecord>> {
        let records = sqlx::query_as::<_, WeightEntryRecord>(
            r#"
            SELECT id, user_id, weight_value, unit, recorded_at, local_date
            FROM weight_entries
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

    /// Delete an entry; `false` when it does not exist for this owner
    pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM weight_entries
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
    use rust_decimal::prelude::FromPrimitive;

    #[test]
    fn test_record_converts_to_model() {
        let record = WeightEntryRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            weight_value: Decimal::from_f64(176.4).unwrap(),
            unit: "lbs".to_string(),
            recorded_at: Utc::now(),
            local_date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
        };

        let entry = WeightEntry::try_from(record).unwrap();
        assert_eq!(entry.unit, WeightUnit::Lbs);
        assert!((entry.weight_value - 176.4).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_unit_is_an_error() {
        let record = WeightEntryRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            weight_value: Decimal::from(80),
            unit: "furlong".to_string(),
            recorded_at: Utc::now(),
            local_date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
        };

        assert!(WeightEntry::try_from(record).is_err());
    }
}
