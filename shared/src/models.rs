//! Data models for the Fitness Tracker

use crate::types::RecordedWhen;
use crate::units::WeightUnit;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

// ============================================================================
// Goals
// ============================================================================

/// A numeric goal that may not have been set
///
/// An unset goal is distinct from a goal of zero; a missing target is never
/// coerced to `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum GoalTarget {
    #[default]
    Unset,
    Target(f64),
}

impl GoalTarget {
    /// Interpret an optional stored number; non-positive or non-finite values are unset
    pub fn from_option(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() && v > 0.0 => GoalTarget::Target(v),
            _ => GoalTarget::Unset,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            GoalTarget::Unset => None,
            GoalTarget::Target(v) => Some(*v),
        }
    }

    pub fn is_set(&self) -> bool {
        matches!(self, GoalTarget::Target(_))
    }

    /// Whether `actual` reaches the target; `None` when there is no goal
    pub fn is_met(&self, actual: f64) -> Option<bool> {
        self.value().map(|target| actual >= target)
    }
}

/// Direction of the user's body-weight goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightGoalDirection {
    Lose,
    Gain,
    #[default]
    Maintain,
}

impl WeightGoalDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightGoalDirection::Lose => "lose",
            WeightGoalDirection::Gain => "gain",
            WeightGoalDirection::Maintain => "maintain",
        }
    }
}

impl std::str::FromStr for WeightGoalDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lose" => Ok(WeightGoalDirection::Lose),
            "gain" => Ok(WeightGoalDirection::Gain),
            "maintain" => Ok(WeightGoalDirection::Maintain),
            _ => Err(format!("Unknown weight goal direction: {}", s)),
        }
    }
}

/// A user's goal profile (at most one per user)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProfile {
    pub user_id: Uuid,
    #[serde(default)]
    pub daily_calorie_target: GoalTarget,
    #[serde(default)]
    pub daily_protein_target: GoalTarget,
    #[serde(default)]
    pub weekly_workout_target: GoalTarget,
    pub current_weight: Option<f64>,
    pub target_weight: Option<f64>,
    #[serde(default)]
    pub weight_goal_direction: WeightGoalDirection,
    pub deadline: Option<NaiveDate>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Weight
// ============================================================================

/// A body-weight measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub weight_value: f64,
    #[serde(default)]
    pub unit: WeightUnit,
    pub recorded_at: DateTime<Utc>,
    pub local_date: NaiveDate,
}

// ============================================================================
// Nutrition
// ============================================================================

/// Meal the food was eaten at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    #[default]
    Snack,
}

impl MealSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
            MealSlot::Snack => "snack",
        }
    }
}

impl std::str::FromStr for MealSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "breakfast" => Ok(MealSlot::Breakfast),
            "lunch" => Ok(MealSlot::Lunch),
            "dinner" => Ok(MealSlot::Dinner),
            "snack" => Ok(MealSlot::Snack),
            _ => Err(format!("Unknown meal slot: {}", s)),
        }
    }
}

/// A logged food item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub calories: f64,
    pub protein_grams: f64,
    #[serde(default)]
    pub meal_slot: MealSlot,
    pub recorded_at: DateTime<Utc>,
    pub local_date: NaiveDate,
}

/// One food of a saved meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedMealFood {
    pub name: String,
    pub calories: f64,
    #[serde(default, alias = "protein")]
    pub protein_grams: f64,
}

/// A named group of foods that can be logged in one go
///
/// Totals are derived from `foods` and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedMeal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub foods: Vec<SavedMealFood>,
    pub total_calories: f64,
    pub total_protein_grams: f64,
    pub created_at: DateTime<Utc>,
}

impl SavedMeal {
    /// Calorie and protein sums of `foods`
    pub fn totals(foods: &[SavedMealFood]) -> (f64, f64) {
        foods.iter().fold((0.0, 0.0), |(calories, protein), food| {
            (calories + food.calories, protein + food.protein_grams)
        })
    }
}

// ============================================================================
// Workouts
// ============================================================================

/// One set as entered by the user
///
/// Values are kept as typed; an untouched set is `{weight: "", reps: ""}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SetEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub weight: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub reps: String,
}

impl SetEntry {
    pub fn new(weight: impl Into<String>, reps: impl Into<String>) -> Self {
        Self {
            weight: weight.into(),
            reps: reps.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.weight.trim().is_empty() && self.reps.trim().is_empty()
    }

    pub fn weight_value(&self) -> Option<f64> {
        self.weight.trim().parse().ok()
    }

    pub fn reps_value(&self) -> Option<u32> {
        self.reps.trim().parse().ok()
    }
}

/// Accept strings, numbers or null for set fields
///
/// Generated templates carry numeric weights and reps.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

/// An exercise with its sets, as performed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    pub name: String,
    #[serde(default)]
    pub sets: Vec<SetEntry>,
}

/// An exercise slot in a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateExercise {
    pub name: String,
    #[serde(default, alias = "sets")]
    pub prefilled_sets: Vec<SetEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_sets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_reps: Option<String>,
}

impl TemplateExercise {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefilled_sets: Vec::new(),
            recommended_sets: None,
            recommended_reps: None,
        }
    }
}

/// A reusable workout plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutTemplate {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub exercises: Vec<TemplateExercise>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A finished workout
///
/// `template_id` is a weak reference; the template may since have been
/// deleted, which is why the name is snapshotted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub template_id: Option<Uuid>,
    pub template_name: String,
    pub exercises: Vec<ExerciseRecord>,
    #[serde(default)]
    pub elapsed_seconds: u64,
    pub recorded_at: DateTime<Utc>,
    pub local_date: NaiveDate,
}

impl WorkoutSession {
    /// Sets performed for an exercise, matched by name
    pub fn sets_for(&self, exercise_name: &str) -> Option<&[SetEntry]> {
        self.exercises
            .iter()
            .find(|e| e.name == exercise_name)
            .map(|e| e.sets.as_slice())
    }
}

/// A finished workout that has not been stored yet
///
/// Serializes to the body of `POST /api/v1/sessions`: `when` is flattened
/// so the finish time and the writer's offset travel as `recorded_at` and
/// `utc_offset_minutes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWorkoutSession {
    pub template_id: Option<Uuid>,
    pub template_name: String,
    pub exercises: Vec<ExerciseRecord>,
    pub elapsed_seconds: u64,
    #[serde(flatten)]
    pub when: RecordedWhen,
}
