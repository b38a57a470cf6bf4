//! Database repositories
//!
//! Data access for the owner-scoped record collections. Every query takes
//! the owner id; rows belonging to other owners are never visible.

pub mod goals;
pub mod nutrition;
pub mod saved_meals;
pub mod sessions;
pub mod templates;
pub mod weight;

use chrono::NaiveDate;

pub use goals::{GoalProfileRecord, GoalsRepository, UpsertGoalProfile};
pub use nutrition::{CreateNutritionEntry, NutritionEntryRecord, NutritionRepository};
pub use saved_meals::{CreateSavedMeal, SavedMealRecord, SavedMealRepository};
pub use sessions::{CreateWorkoutSession, SessionRepository, WorkoutSessionRecord};
pub use templates::{TemplateRepository, UpsertTemplate, WorkoutTemplateRecord};
pub use weight::{CreateWeightEntry, WeightEntryRecord, WeightRepository};

/// Inclusive `local_date` bounds; `None` leaves that side open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn day(date: NaiveDate) -> Self {
        Self::new(Some(date), Some(date))
    }

    pub fn all() -> Self {
        Self::default()
    }
}
