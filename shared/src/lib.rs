//! Fitness Tracker Shared Library
//!
//! Domain models, the activity aggregator and the workout session
//! lifecycle. Used by the backend and the WASM module.

pub mod activity;
pub mod calendar;
pub mod errors;
pub mod lifecycle;
pub mod models;
pub mod types;
pub mod units;
pub mod validation;
pub mod workout;

// Re-export commonly used items
pub use activity::{
    aggregate, weight_progress, workout_frequency, DailyActivity, NutritionSummary,
    WeightProgress, WeightReading, WorkoutFrequency,
};
pub use errors::*;
pub use lifecycle::{
    Clock, DraftStore, KeyValueDraftStore, KeyValueStorage, LifecycleConfig, MemoryDraftStore,
    SessionHistory, SessionRecorder, SystemClock, TemplateProvider, WorkoutLifecycle,
    WorkoutPhase,
};
pub use models::*;
pub use types::*;
pub use units::*;
pub use workout::{DraftEdit, DraftExercise, SetField, WorkoutDraft};
