//! Weight logging service

use super::{invalid_field, resolve_when};
use crate::error::ApiError;
use crate::repositories::{CreateWeightEntry, DateRange, WeightRepository};
use chrono::Utc;
use fitness_tracker_shared::validation::validate_weight;
use fitness_tracker_shared::{LogWeightRequest, WeightEntry, WeightUnit};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

/// Parse a request unit, defaulting to kg
pub fn parse_weight_unit(unit: Option<&str>) -> Result<WeightUnit, ApiError> {
    match unit {
        None => Ok(WeightUnit::Kg),
        Some(s) if s.trim().is_empty() => Ok(WeightUnit::Kg),
        Some(s) => s.parse::<WeightUnit>().map_err(invalid_field("unit")),
    }
}

/// Weight service for business logic
pub struct WeightService;

impl WeightService {
    /// Log a weight entry in the unit it was entered in
    pub async fn log_weight(
        pool: &PgPool,
        user_id: Uuid,
        req: LogWeightRequest,
        default_offset_minutes: i32,
    ) -> Result<WeightEntry, ApiError> {
        req.validate()?;
        let unit = parse_weight_unit(req.unit.as_deref())?;
        validate_weight(req.weight, unit).map_err(invalid_field("weight"))?;
        let (recorded_at, local_date) = resolve_when(&req.when, default_offset_minutes, Utc::now())?;

        let record = WeightRepository::create(
            pool,
            CreateWeightEntry {
                user_id,
                weight_value: req.weight,
                unit,
                recorded_at,
                local_date,
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        debug!(%user_id, %local_date, "Weight entry logged");
        WeightEntry::try_from(record).map_err(ApiError::Internal)
    }

    /// Weight history, newest first
    pub async fn list(
        pool: &PgPool,
        user_id: Uuid,
        range: DateRange,
    ) -> Result<Vec<WeightEntry>, ApiError> {
        WeightRepository::list(pool, user_id, range)
            .await
            .map_err(ApiError::Internal)?
            .into_iter()
            .map(|r| WeightEntry::try_from(r).map_err(ApiError::Internal))
            .collect()
    }

    pub async fn delete(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), ApiError> {
        let deleted = WeightRepository::delete(pool, id, user_id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(ApiError::NotFound(format!("Weight entry {}", id)));
        }
        Ok(())
    }
}
