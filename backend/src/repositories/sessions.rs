//! Workout session repository
//!
//! Sessions are insert-only. `template_id` is a weak reference and may
//! point at a template that has since been deleted.

use super::DateRange;
use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use fitness_tracker_shared::{ExerciseRecord, WorkoutSession};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

/// Workout session row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WorkoutSessionRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub template_id: Option<Uuid>,
    pub template_name: String,
    pub exercises: Json<Vec<ExerciseRecord>>,
    pub elapsed_seconds: i64,
    pub recorded_at: DateTime<Utc>,
    pub local_date: NaiveDate,
}

impl From<WorkoutSessionRecord> for WorkoutSession {
    fn from(record: WorkoutSessionRecord) -> Self {
        WorkoutSession {
            id: record.id,
            user_id: record.user_id,
            template_id: record.template_id,
            template_name: record.template_name,
            exercises: record.exercises.0,
            // column is CHECK (>= 0)
            elapsed_seconds: u64::try_from(record.elapsed_seconds).unwrap_or_default(),
            recorded_at: record.recorded_at,
            local_date: record.local_date,
        }
    }
}

/// Input for recording a finished workout
#[derive(Debug, Clone)]
pub struct CreateWorkoutSession {
    pub user_id: Uuid,
    pub template_id: Option<Uuid>,
    pub template_name: String,
    pub exercises: Vec<ExerciseRecord>,
    pub elapsed_seconds: u64,
    pub recorded_at: DateTime<Utc>,
    pub local_date: NaiveDate,
}

const SESSION_COLUMNS: &str =
    "id, user_id, template_id, template_name, exercises, elapsed_seconds, recorded_at, local_date";

/// Session repository for database operations
pub struct SessionRepository;

impl SessionRepository {
    pub async fn create(pool: &PgPool, input: CreateWorkoutSession) -> Result<WorkoutSessionRecord> {
        let elapsed = i64::try_from(input.elapsed_seconds)
            .map_err(|_| anyhow::anyhow!("elapsed_seconds out of range"))?;

        let record = sqlx::query_as::<_, WorkoutSessionRecord>(&format!(
            r#"
            INSERT INTO workout_sessions
                (user_id, template_id, template_name, exercises, elapsed_seconds, recorded_at, local_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            SESSION_COLUMNS
        ))
        .bind(input.user_id)
        .bind(input.template_id)
        .bind(&input.template_name)
        .bind(Json(&input.exercises))
        .bind(elapsed)
        .bind(input.recorded_at)
        .bind(input.local_date)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Sessions in a date range, newest first, optionally for one template
    pub async fn list(
        pool: &PgPool,
        user_id: Uuid,
        template_id: Option<Uuid>,
        range: DateRange,
    ) -> Result<Vec<WorkoutSessionRecord>> {
        let records = sqlx::query_as::<_, WorkoutSessionRecord>(&format!(
            r#"
            SELECT {}
            FROM workout_sessions
            WHERE user_id = $1
              AND ($2::uuid IS NULL OR template_id = $2)
              AND ($3::date IS NULL OR local_date >= $3)
              AND ($4::date IS NULL OR local_date <= $4)
            ORDER BY recorded_at DESC, created_at DESC
            "#,
            SESSION_COLUMNS
        ))
        .bind(user_id)
        .bind(template_id)
        .bind(range.from)
        .bind(range.to)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Most recent session for a template (last-session recall)
    pub async fn latest_for_template(
        pool: &PgPool,
        user_id: Uuid,
        template_id: Uuid,
    ) -> Result<Option<WorkoutSessionRecord>> {
        let record = sqlx::query_as::<_, WorkoutSessionRecord>(&format!(
            r#"
            SELECT {}
            FROM workout_sessions
            WHERE user_id = $1 AND template_id = $2
            ORDER BY recorded_at DESC, created_at DESC
            LIMIT 1
            "#,
            SESSION_COLUMNS
        ))
        .bind(user_id)
        .bind(template_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Sessions recorded at or after `since`
    pub async fn recorded_since(
        pool: &PgPool,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<WorkoutSessionRecord>> {
        let records = sqlx::query_as::<_, WorkoutSessionRecord>(&format!(
            r#"
            SELECT {}
            FROM workout_sessions
            WHERE user_id = $1 AND recorded_at >= $2
            ORDER BY recorded_at DESC
            "#,
            SESSION_COLUMNS
        ))
        .bind(user_id)
        .bind(since)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }
}
