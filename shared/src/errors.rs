//! Error types for the Fitness Tracker core

use crate::lifecycle::WorkoutPhase;
use thiserror::Error;

/// Errors from applying an edit to a draft
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("Exercise {index} does not exist (draft has {len})")]
    ExerciseOutOfRange { index: usize, len: usize },

    #[error("Set {index} of exercise {exercise} does not exist (exercise has {len})")]
    SetOutOfRange {
        exercise: usize,
        index: usize,
        len: usize,
    },

    #[error("Exercise name cannot be empty")]
    EmptyExerciseName,

    #[error("UTC offset {minutes} minutes is outside ±18 hours")]
    UtcOffsetOutOfRange { minutes: i32 },
}

/// Lifecycle error types
#[derive(Error, Debug)]
pub enum LifecycleError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(#[from] DraftError),

    #[error("Persistence failure: {0}")]
    Persistence(String),

    #[error("Cannot {action} a workout that is {phase}")]
    InvalidTransition {
        phase: WorkoutPhase,
        action: &'static str,
    },
}

/// Draft store error types
#[derive(Error, Debug)]
pub enum DraftStoreError {
    #[error("Draft storage unavailable: {0}")]
    Unavailable(String),

    #[error("Stored draft is unreadable: {0}")]
    Corrupt(String),
}

/// Error returned by a record store when creating a session
#[derive(Error, Debug)]
#[error("{0}")]
pub struct RecordStoreError(pub String);

