//! Workout template repository
//!
//! Exercises are stored as a JSONB array in the template row.

use anyhow::Result;
use chrono::{DateTime, Utc};
use fitness_tracker_shared::{TemplateExercise, WorkoutTemplate};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

/// Workout template row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WorkoutTemplateRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub exercises: Json<Vec<TemplateExercise>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<WorkoutTemplateRecord> for WorkoutTemplate {
    fn from(record: WorkoutTemplateRecord) -> Self {
        WorkoutTemplate {
            id: record.id,
            user_id: record.user_id,
            name: record.name,
            exercises: record.exercises.0,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Input for creating or replacing a template
#[derive(Debug, Clone)]
pub struct UpsertTemplate {
    pub user_id: Uuid,
    pub name: String,
    pub exercises: Vec<TemplateExercise>,
}

/// Template repository for database operations
pub struct TemplateRepository;

impl TemplateRepository {
    pub async fn create(pool: &PgPool, input: UpsertTemplate) -> Result<WorkoutTemplateRecord> {
        let record = sqlx::query_as::<_, WorkoutTemplateRecord>(
            r#"
            INSERT INTO workout_templates (user_id, name, exercises)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, name, exercises, created_at, updated_at
            "#,
        )
        .bind(input.user_id)
        .bind(&input.name)
        .bind(Json(&input.exercises))
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// All templates of an owner, newest first
    pub async fn list(pool: &PgPool, user_id: Uuid) -> Result<Vec<WorkoutTemplateRecord>> {
        let records = sqlx::query_as::<_, WorkoutTemplateRecord>(
            r#"
            SELECT id, user_id, name, exercises, created_at, updated_at
            FROM workout_templates
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
    ) -> Result<Option<WorkoutTemplateRecord>> {
        let record = sqlx::query_as::<_, WorkoutTemplateRecord>(
            r#"
            SELECT id, user_id, name, exercises, created_at, updated_at
            FROM workout_templates
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Replace name and exercises; `None` when the template does not exist
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        input: UpsertTemplate,
    ) -> Result<Option<WorkoutTemplateRecord>> {
        let record = sqlx::query_as::<_, WorkoutTemplateRecord>(
            r#"
            UPDATE workout_templates
            SET name = $3, exercises = $4, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, name, exercises, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(input.user_id)
        .bind(&input.name)
        .bind(Json(&input.exercises))
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Delete a template; recorded sessions keep their snapshot
    pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM workout_templates
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
