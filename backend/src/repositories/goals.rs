//! Goal profile repository (one row per owner)

use crate::db::{decimal_to_f64, f64_to_decimal};
use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use fitness_tracker_shared::{GoalProfile, GoalTarget, WeightGoalDirection};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Goal profile row; NULL targets are unset goals
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GoalProfileRecord {
    pub user_id: Uuid,
    pub daily_calorie_target: Option<Decimal>,
    pub daily_protein_target: Option<Decimal>,
    pub weekly_workout_target: Option<Decimal>,
    pub current_weight: Option<Decimal>,
    pub target_weight: Option<Decimal>,
    pub weight_goal_direction: String,
    pub deadline: Option<NaiveDate>,
    pub updated_at: DateTime<Utc>,
}

fn target(value: Option<Decimal>) -> GoalTarget {
    GoalTarget::from_option(value.map(decimal_to_f64))
}

impl TryFrom<GoalProfileRecord> for GoalProfile {
    type Error = anyhow::Error;

    fn try_from(record: GoalProfileRecord) -> Result<Self> {
        Ok(GoalProfile {
            user_id: record.user_id,
            daily_calorie_target: target(record.daily_calorie_target),
            daily_protein_target: target(record.daily_protein_target),
            weekly_workout_target: target(record.weekly_workout_target),
            current_weight: record.current_weight.map(decimal_to_f64),
            target_weight: record.target_weight.map(decimal_to_f64),
            weight_goal_direction: record
                .weight_goal_direction
                .parse::<WeightGoalDirection>()
                .map_err(|e| anyhow::anyhow!(e))?,
            deadline: record.deadline,
            updated_at: record.updated_at,
        })
    }
}

/// Input for the goal upsert
///
/// Unset targets are written as NULL, never as zero.
#[derive(Debug, Clone)]
pub struct UpsertGoalProfile {
    pub user_id: Uuid,
    pub daily_calorie_target: GoalTarget,
    pub daily_protein_target: GoalTarget,
    pub weekly_workout_target: GoalTarget,
    pub current_weight: Option<f64>,
    pub target_weight: Option<f64>,
    pub weight_goal_direction: WeightGoalDirection,
    pub deadline: Option<NaiveDate>,
}

fn optional_decimal(value: Option<f64>) -> Result<Option<Decimal>> {
    value.map(f64_to_decimal).transpose()
}

/// Goals repository for database operations
pub struct GoalsRepository;

impl GoalsRepository {
    pub async fn get_by_user(pool: &PgPool, user_id: Uuid) -> Result<Option<GoalProfileRecord>> {
        let record = sqlx::query_as::<_, GoalProfileRecord>(
            r#"
            SELECT user_id, daily_calorie_target, daily_protein_target, weekly_workout_target,
                   current_weight, target_weight, weight_goal_direction, deadline, updated_at
            FROM goal_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Create or replace the owner's goal profile
    pub async fn upsert(pool: &PgPool, input: UpsertGoalProfile) -> Result<GoalProfileRecord> {
        let record = sqlx::query_as::<_, GoalProfileRecord>(
            r#"
            INSERT INTO goal_profiles (
                user_id, daily_calorie_target, daily_protein_target, weekly_workout_target,
                current_weight, target_weight, weight_goal_direction, deadline
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (user_id) DO UPDATE SET
                daily_calorie_target = EXCLUDED.daily_calorie_target,
                daily_protein_target = EXCLUDED.daily_protein_target,
                weekly_workout_target = EXCLUDED.weekly_workout_target,
                current_weight = EXCLUDED.current_weight,
                target_weight = EXCLUDED.target_weight,
                weight_goal_direction = EXCLUDED.weight_goal_direction,
                deadline = EXCLUDED.deadline,
                updated_at = NOW()
            RETURNING user_id, daily_calorie_target, daily_protein_target, weekly_workout_target,
                      current_weight, target_weight, weight_goal_direction, deadline, updated_at
            "#,
        )
        .bind(input.user_id)
        .bind(optional_decimal(input.daily_calorie_target.value())?)
        .bind(optional_decimal(input.daily_protein_target.value())?)
        .bind(optional_decimal(input.weekly_workout_target.value())?)
        .bind(optional_decimal(input.current_weight)?)
        .bind(optional_decimal(input.target_weight)?)
        .bind(input.weight_goal_direction.as_str())
        .bind(input.deadline)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(calories: Option<Decimal>) -> GoalProfileRecord {
        GoalProfileRecord {
            user_id: Uuid::new_v4(),
            daily_calorie_target: calories,
            daily_protein_target: None,
            weekly_workout_target: Some(Decimal::from(3)),
            current_weight: None,
            target_weight: None,
            weight_goal_direction: "lose".to_string(),
            deadline: None,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_null_and_zero_targets_read_back_unset() {
        let profile = GoalProfile::try_from(record(None)).unwrap();
        assert_eq!(profile.daily_calorie_target, GoalTarget::Unset);
        assert_eq!(profile.daily_protein_target, GoalTarget::Unset);
        assert_eq!(profile.weekly_workout_target, GoalTarget::Target(3.0));
        assert_eq!(profile.weight_goal_direction, WeightGoalDirection::Lose);

        let zero = GoalProfile::try_from(record(Some(Decimal::ZERO))).unwrap();
        assert_eq!(zero.daily_calorie_target, GoalTarget::Unset);
    }
}
