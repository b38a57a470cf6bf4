//! API request and response types

use crate::activity::{DailyActivity, WeightProgress, WorkoutFrequency};
use crate::models::{
    ExerciseRecord, GoalProfile, MealSlot, NutritionEntry, SavedMeal, SavedMealFood,
    TemplateExercise, WeightEntry, WeightGoalDirection, WorkoutSession, WorkoutTemplate,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// When a record happened, as sent by the client
///
/// `local_date` wins when present. Otherwise the date is derived from
/// `recorded_at` (default: now) and `utc_offset_minutes` (default: the
/// server's configured offset).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct RecordedWhen {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = -1080, max = 1080))]
    pub utc_offset_minutes: Option<i32>,
}

// ============================================================================
// Weight
// ============================================================================

/// Weight log request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LogWeightRequest {
    pub weight: f64,
    /// kg, lbs or stone; defaults to kg
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(flatten)]
    #[validate(nested)]
    pub when: RecordedWhen,
}

/// Weight list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightListResponse {
    pub weights: Vec<WeightEntry>,
}

// ============================================================================
// Nutrition
// ============================================================================

/// Food log request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LogFoodRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(range(min = 0.0, max = 50000.0))]
    pub calories: f64,
    #[serde(default, alias = "protein")]
    #[validate(range(min = 0.0, max = 5000.0))]
    pub protein_grams: f64,
    #[serde(default, alias = "meal_type")]
    pub meal_slot: Option<MealSlot>,
    #[serde(flatten)]
    #[validate(nested)]
    pub when: RecordedWhen,
}

/// Food list query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FoodListQuery {
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Food list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodListResponse {
    pub foods: Vec<NutritionEntry>,
}

/// Save a group of foods under a name
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SavedMealRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub foods: Vec<SavedMealFood>,
}

/// Saved meal list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedMealListResponse {
    pub saved_meals: Vec<SavedMeal>,
}

/// Log every food of a saved meal
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct LogSavedMealRequest {
    #[serde(default, alias = "meal_type")]
    pub meal_slot: Option<MealSlot>,
    #[serde(flatten)]
    #[validate(nested)]
    pub when: RecordedWhen,
}

// ============================================================================
// Templates & sessions
// ============================================================================

/// Create or replace a workout template
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TemplateRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub exercises: Vec<TemplateExercise>,
}

/// Template list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateListResponse {
    pub templates: Vec<WorkoutTemplate>,
}

/// Record a finished workout
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub template_id: Option<Uuid>,
    #[validate(length(min = 1, max = 200))]
    pub template_name: String,
    #[validate(length(max = 100))]
    pub exercises: Vec<ExerciseRecord>,
    #[serde(default)]
    pub elapsed_seconds: u64,
    #[serde(flatten)]
    #[validate(nested)]
    pub when: RecordedWhen,
}

/// Session list query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionListQuery {
    #[serde(default)]
    pub template_id: Option<Uuid>,
}

/// Session list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionListResponse {
    pub sessions: Vec<WorkoutSession>,
}

/// Most recent session for a template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatestSessionResponse {
    pub session: Option<WorkoutSession>,
}

// ============================================================================
// Goals
// ============================================================================

/// Upsert goals request; missing or zero targets mean "no goal"
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpsertGoalsRequest {
    #[serde(default, alias = "daily_calories")]
    #[validate(range(min = 0.0, max = 20000.0))]
    pub daily_calorie_target: Option<f64>,
    #[serde(default, alias = "daily_protein")]
    #[validate(range(min = 0.0, max = 1000.0))]
    pub daily_protein_target: Option<f64>,
    #[serde(default, alias = "weekly_workouts")]
    #[validate(range(min = 0.0, max = 50.0))]
    pub weekly_workout_target: Option<f64>,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 1500.0))]
    pub current_weight: Option<f64>,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 1500.0))]
    pub target_weight: Option<f64>,
    #[serde(default, alias = "weight_goal_type")]
    pub weight_goal_direction: Option<WeightGoalDirection>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
}

/// Goals response (`goals` is null when never set)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalsResponse {
    pub goals: Option<GoalProfile>,
}

// ============================================================================
// Progress
// ============================================================================

/// Timeline query; both bounds inclusive
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimelineQuery {
    #[serde(default)]
    pub from: Option<NaiveDate>,
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

/// Timeline response, newest day first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineResponse {
    pub days: Vec<DailyActivity>,
}

/// Progress summary response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressSummaryResponse {
    pub weight: Option<WeightProgress>,
    pub workouts: WorkoutFrequency,
}
