//! Fitness Tracker Backend Library
//!
//! Record store HTTP API for weight, nutrition, workout templates,
//! finished sessions and goals, plus the aggregated progress timeline.
//! Exposed as a library for the integration tests.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
