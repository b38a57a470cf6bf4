//! Goal profile service

use crate::error::ApiError;
use crate::repositories::{GoalsRepository, UpsertGoalProfile};
use fitness_tracker_shared::{GoalProfile, GoalTarget, UpsertGoalsRequest};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// Build the stored profile from a request
///
/// Missing, zero or negative targets become `Unset`.
fn profile_input(user_id: Uuid, req: UpsertGoalsRequest) -> UpsertGoalProfile {
    UpsertGoalProfile {
        user_id,
        daily_calorie_target: GoalTarget::from_option(req.daily_calorie_target),
        daily_protein_target: GoalTarget::from_option(req.daily_protein_target),
        weekly_workout_target: GoalTarget::from_option(req.weekly_workout_target),
        current_weight: req.current_weight.filter(|w| *w > 0.0),
        target_weight: req.target_weight.filter(|w| *w > 0.0),
        weight_goal_direction: req.weight_goal_direction.unwrap_or_default(),
        deadline: req.deadline,
    }
}

/// Goals service for business logic
pub struct GoalsService;

impl GoalsService {
    /// The owner's goal profile; `None` when never set
    pub async fn get(pool: &PgPool, user_id: Uuid) -> Result<Option<GoalProfile>, ApiError> {
        GoalsRepository::get_by_user(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .map(GoalProfile::try_from)
            .transpose()
            .map_err(ApiError::Internal)
    }

    pub async fn upsert(
        pool: &PgPool,
        user_id: Uuid,
        req: UpsertGoalsRequest,
    ) -> Result<GoalProfile, ApiError> {
        req.validate()?;

        let record = GoalsRepository::upsert(pool, profile_input(user_id, req))
            .await
            .map_err(ApiError::Internal)?;

        info!(%user_id, "Goal profile updated");
        GoalProfile::try_from(record).map_err(ApiError::Internal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitness_tracker_shared::WeightGoalDirection;

    #[test]
    fn test_profile_input_keeps_unset_distinct_from_zero() {
        let req = UpsertGoalsRequest {
            daily_calorie_target: Some(2100.0),
            daily_protein_target: Some(0.0),
            weekly_workout_target: None,
            ..Default::default()
        };
        let input = profile_input(Uuid::new_v4(), req);

        assert_eq!(input.daily_calorie_target, GoalTarget::Target(2100.0));
        assert_eq!(input.daily_protein_target, GoalTarget::Unset);
        assert_eq!(input.weekly_workout_target, GoalTarget::Unset);
        assert_eq!(input.weight_goal_direction, WeightGoalDirection::Maintain);
    }
}
