//! Workout templates and finished sessions

use super::{invalid_field, resolve_when};
use crate::error::ApiError;
use crate::repositories::{
    CreateWorkoutSession, DateRange, SessionRepository, TemplateRepository, UpsertTemplate,
};
use chrono::Utc;
use fitness_tracker_shared::validation::{
    validate_name, validate_session_exercises, validate_template_exercises,
};
use fitness_tracker_shared::{
    CreateSessionRequest, TemplateExercise, TemplateRequest, WorkoutSession, WorkoutTemplate,
};
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

fn normalize_exercises(exercises: Vec<TemplateExercise>) -> Vec<TemplateExercise> {
    exercises
        .into_iter()
        .map(|mut e| {
            e.name = e.name.trim().to_string();
            e
        })
        .collect()
}

fn template_input(user_id: Uuid, req: TemplateRequest) -> Result<UpsertTemplate, ApiError> {
    req.validate()?;
    validate_name(&req.name, "Template").map_err(invalid_field("name"))?;
    validate_template_exercises(&req.exercises).map_err(invalid_field("exercises"))?;

    Ok(UpsertTemplate {
        user_id,
        name: req.name.trim().to_string(),
        exercises: normalize_exercises(req.exercises),
    })
}

/// Workout service for business logic
pub struct WorkoutService;

impl WorkoutService {
    pub async fn create_template(
        pool: &PgPool,
        user_id: Uuid,
        req: TemplateRequest,
    ) -> Result<WorkoutTemplate, ApiError> {
        let input = template_input(user_id, req)?;
        let record = TemplateRepository::create(pool, input)
            .await
            .map_err(ApiError::Internal)?;

        info!(%user_id, template_id = %record.id, "Workout template created");
        Ok(record.into())
    }

    pub async fn list_templates(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<WorkoutTemplate>, ApiError> {
        let records = TemplateRepository::list(pool, user_id)
            .await
            .map_err(ApiError::Internal)?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    pub async fn get_template(
        pool: &PgPool,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<WorkoutTemplate, ApiError> {
        TemplateRepository::get_by_id(pool, id, user_id)
            .await
            .map_err(ApiError::Internal)?
            .map(Into::into)
            .ok_or_else(|| ApiError::NotFound(format!("Workout template {}", id)))
    }

    /// Replace a template's name and exercises
    ///
    /// Drafts already started from the old version keep their snapshot.
    pub async fn update_template(
        pool: &PgPool,
        user_id: Uuid,
        id: Uuid,
        req: TemplateRequest,
    ) -> Result<WorkoutTemplate, ApiError> {
        let input = template_input(user_id, req)?;
        TemplateRepository::update(pool, id, input)
            .await
            .map_err(ApiError::Internal)?
            .map(Into::into)
            .ok_or_else(|| ApiError::NotFound(format!("Workout template {}", id)))
    }

    pub async fn delete_template(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), ApiError> {
        let deleted = TemplateRepository::delete(pool, id, user_id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(ApiError::NotFound(format!("Workout template {}", id)));
        }
        info!(%user_id, template_id = %id, "Workout template deleted");
        Ok(())
    }

    /// Record a finished workout
    ///
    /// The template id is not checked; it may refer to a deleted template.
    pub async fn record_session(
        pool: &PgPool,
        user_id: Uuid,
        req: CreateSessionRequest,
        default_offset_minutes: i32,
    ) -> Result<WorkoutSession, ApiError> {
        req.validate()?;
        validate_name(&req.template_name, "Template").map_err(invalid_field("template_name"))?;
        validate_session_exercises(&req.exercises).map_err(invalid_field("exercises"))?;
        let (recorded_at, local_date) = resolve_when(&req.when, default_offset_minutes, Utc::now())?;

        let record = SessionRepository::create(
            pool,
            CreateWorkoutSession {
                user_id,
                template_id: req.template_id,
                template_name: req.template_name.trim().to_string(),
                exercises: req.exercises,
                elapsed_seconds: req.elapsed_seconds,
                recorded_at,
                local_date,
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        info!(
            %user_id,
            session_id = %record.id,
            elapsed_seconds = record.elapsed_seconds,
            "Workout session recorded"
        );
        Ok(record.into())
    }

    /// Sessions newest first, optionally for a single template
    pub async fn list_sessions(
        pool: &PgPool,
        user_id: Uuid,
        template_id: Option<Uuid>,
        range: DateRange,
    ) -> Result<Vec<WorkoutSession>, ApiError> {
        let records = SessionRepository::list(pool, user_id, template_id, range)
            .await
            .map_err(ApiError::Internal)?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    /// Most recent session for a template, if any
    pub async fn latest_session(
        pool: &PgPool,
        user_id: Uuid,
        template_id: Uuid,
    ) -> Result<Option<WorkoutSession>, ApiError> {
        let record = SessionRepository::latest_for_template(pool, user_id, template_id)
            .await
            .map_err(ApiError::Internal)?;

        debug!(%user_id, %template_id, found = record.is_some(), "Last session lookup");
        Ok(record.map(Into::into))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_input_trims_names() {
        let req: TemplateRequest = serde_json::from_str(
            r#"{"name": "  Pull Day ", "exercises": [{"name": " Row ", "sets": [{"weight": 60, "reps": 8}]}]}"#,
        )
        .unwrap();
        let user_id = Uuid::new_v4();
        let input = template_input(user_id, req).unwrap();

        assert_eq!(input.name, "Pull Day");
        assert_eq!(input.exercises[0].name, "Row");
        assert_eq!(input.exercises[0].prefilled_sets[0].weight, "60");
    }

    #[test]
    fn test_template_input_rejects_blank_exercise() {
        let req: TemplateRequest =
            serde_json::from_str(r#"{"name": "Legs", "exercises": [{"name": "   "}]}"#).unwrap();

        match template_input(Uuid::new_v4(), req) {
            Err(ApiError::InvalidField { field, .. }) => assert_eq!(field, "exercises"),
            other => panic!("unexpected result: {:?}", other.map(|i| i.name)),
        }
    }
}
