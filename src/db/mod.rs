//! Persistence module split across logical submodules. Every function takes
//! the session's `Connection` explicitly; nothing here opens its own handle.

mod connection;
mod meals;
mod workouts;

use anyhow::Result;
use rusqlite::Connection;

use crate::models::{MealRecord, WorkoutRecord};

pub use connection::{ensure_schema, open_database, record_counts};
pub use meals::{fetch_meals, insert_meal, meal_summary};
pub use workouts::{fetch_workouts, insert_workout, workout_summary};

/// Full scan of both tables, each in primary key order.
pub fn all_records(conn: &Connection) -> Result<(Vec<WorkoutRecord>, Vec<MealRecord>)> {
    Ok((fetch_workouts(conn)?, fetch_meals(conn)?))
}
