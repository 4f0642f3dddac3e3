//! Core library surface for the Fitness & Meal Tracker.
//!
//! Storage, validation and export are usable without a terminal; the `ui`
//! module layers the Ratatui form on top of the same command dispatcher.
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod ui;

/// Persistence entry points used by `main.rs` and by tooling.
pub use db::{all_records, ensure_schema, open_database};

pub use commands::{Command, Dispatcher, Outcome};
pub use config::AppConfig;
pub use error::{CommandError, ValidationError};
pub use models::{Exercise, MealRecord, MealType, WorkoutRecord};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
