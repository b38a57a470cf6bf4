//! Progress timeline and summary
//!
//! Both endpoints fetch their inputs concurrently and compute only after
//! every fetch succeeded; a single failure fails the whole request.

use crate::error::ApiError;
use crate::repositories::{DateRange, SessionRepository};
use crate::services::{GoalsService, NutritionService, WeightService, WorkoutService};
use chrono::{DateTime, Duration, Utc};
use fitness_tracker_shared::{
    aggregate, weight_progress, workout_frequency, DailyActivity, ProgressSummaryResponse,
    WorkoutSession,
};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

/// Reject inverted ranges
pub fn check_range(range: DateRange) -> Result<DateRange, ApiError> {
    match (range.from, range.to) {
        (Some(from), Some(to)) if from > to => Err(ApiError::BadRequest(format!(
            "Invalid date range: {} is after {}",
            from, to
        ))),
        _ => Ok(range),
    }
}

/// Progress service for business logic
pub struct ProgressService;

impl ProgressService {
    /// Per-day activity for the owner, newest day first
    pub async fn timeline(
        pool: &PgPool,
        user_id: Uuid,
        range: DateRange,
    ) -> Result<Vec<DailyActivity>, ApiError> {
        let range = check_range(range)?;

        let (weights, sessions, nutrition, goals) = tokio::try_join!(
            WeightService::list(pool, user_id, range),
            WorkoutService::list_sessions(pool, user_id, None, range),
            NutritionService::list(pool, user_id, range),
            GoalsService::get(pool, user_id),
        )?;

        debug!(
            %user_id,
            weights = weights.len(),
            sessions = sessions.len(),
            nutrition = nutrition.len(),
            "Aggregating timeline"
        );
        Ok(aggregate(&weights, &sessions, &nutrition, goals.as_ref()))
    }

    /// Weight change since the first entry and workouts in the trailing window
    pub async fn summary(
        pool: &PgPool,
        user_id: Uuid,
        now: DateTime<Utc>,
        window_days: u32,
    ) -> Result<ProgressSummaryResponse, ApiError> {
        let since = now - Duration::days(i64::from(window_days));

        let (weights, recent, goals) = tokio::try_join!(
            WeightService::list(pool, user_id, DateRange::all()),
            Self::sessions_since(pool, user_id, since),
            GoalsService::get(pool, user_id),
        )?;

        Ok(ProgressSummaryResponse {
            weight: weight_progress(&weights),
            workouts: workout_frequency(&recent, goals.as_ref(), now, window_days),
        })
    }

    async fn sessions_since(
        pool: &PgPool,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<WorkoutSession>, ApiError> {
        let records = SessionRepository::recorded_since(pool, user_id, since)
            .await
            .map_err(ApiError::Internal)?;
        Ok(records.into_iter().map(Into::into).collect())
    }
}
