//! Business logic services
//!
//! Services validate requests, resolve calendar dates and coordinate the
//! repositories. They speak shared model types; row types stay in
//! `crate::repositories`.

pub mod goals;
pub mod nutrition;
pub mod progress;
pub mod saved_meals;
pub mod weight;
pub mod workouts;

pub use goals::GoalsService;
pub use nutrition::NutritionService;
pub use progress::ProgressService;
pub use saved_meals::SavedMealService;
pub use weight::WeightService;
pub use workouts::WorkoutService;

use crate::error::ApiError;
use chrono::{DateTime, NaiveDate, Utc};
use fitness_tracker_shared::calendar::{resolve_local_date, utc_offset};
use fitness_tracker_shared::validation::validate_utc_offset;
use fitness_tracker_shared::RecordedWhen;

/// Map a validation message onto the field it concerns
pub(crate) fn invalid_field(field: &'static str) -> impl FnOnce(String) -> ApiError {
    move |message| ApiError::InvalidField {
        field: field.to_string(),
        message,
    }
}

/// Resolve the timestamp and canonical `local_date` of a new record
///
/// Missing timestamps default to `now`; a missing offset falls back to
/// `default_offset_minutes`.
pub fn resolve_when(
    when: &RecordedWhen,
    default_offset_minutes: i32,
    now: DateTime<Utc>,
) -> Result<(DateTime<Utc>, NaiveDate), ApiError> {
    let minutes = when.utc_offset_minutes.unwrap_or(default_offset_minutes);
    validate_utc_offset(minutes).map_err(invalid_field("utc_offset_minutes"))?;
    let offset = utc_offset(minutes)
        .ok_or_else(|| ApiError::Validation(format!("Invalid UTC offset: {}", minutes)))?;

    let recorded_at = when.recorded_at.unwrap_or(now);
    Ok((recorded_at, resolve_local_date(when.local_date, recorded_at, offset)))
}
