//! CSV export of both tables.
//!
//! Each file carries a fixed header row and one line per record in storage
//! order. Rows end with CRLF. Fields are quoted only when they contain a
//! delimiter, a quote or a line break, so plain values stay readable in any
//! text editor.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::info;

use crate::db::all_records;
use crate::models::{MealRecord, WorkoutRecord};

pub const WORKOUTS_FILE: &str = "workouts.csv";
pub const MEALS_FILE: &str = "meals.csv";

const WORKOUTS_HEADER: &str = "ID,Date,Exercise,Reps";
const MEALS_HEADER: &str = "ID,Date,Meal Type,Items";
const ROW_END: &str = "\r\n";

/// What an export wrote and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub workouts_path: PathBuf,
    pub meals_path: PathBuf,
    pub workout_rows: usize,
    pub meal_rows: usize,
}

/// Quote a field for CSV when it needs it.
pub fn escape_csv(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Render the workouts file body.
pub fn workouts_csv(workouts: &[WorkoutRecord]) -> String {
    let mut output = String::new();
    output.push_str(WORKOUTS_HEADER);
    output.push_str(ROW_END);
    for workout in workouts {
        // Writing into a String cannot fail.
        let _ = write!(
            output,
            "{},{},{},{}{ROW_END}",
            workout.id,
            escape_csv(&workout.date),
            escape_csv(&workout.exercise),
            workout.reps,
        );
    }
    output
}

/// Render the meals file body.
pub fn meals_csv(meals: &[MealRecord]) -> String {
    let mut output = String::new();
    output.push_str(MEALS_HEADER);
    output.push_str(ROW_END);
    for meal in meals {
        let _ = write!(
            output,
            "{},{},{},{}{ROW_END}",
            meal.id,
            escape_csv(&meal.date),
            escape_csv(&meal.meal_type),
            escape_csv(&meal.items),
        );
    }
    output
}

/// Dump both tables into `dir`, replacing any previous export without
/// asking.
pub fn export_all(conn: &Connection, dir: &Path) -> Result<ExportReport> {
    let (workouts, meals) = all_records(conn)?;

    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create export directory {}", dir.display()))?;

    let workouts_path = dir.join(WORKOUTS_FILE);
    fs::write(&workouts_path, workouts_csv(&workouts))
        .with_context(|| format!("failed to write {}", workouts_path.display()))?;

    let meals_path = dir.join(MEALS_FILE);
    fs::write(&meals_path, meals_csv(&meals))
        .with_context(|| format!("failed to write {}", meals_path.display()))?;

    info!(
        workouts = workouts.len(),
        meals = meals.len(),
        dir = %dir.display(),
        "exported records to CSV"
    );

    Ok(ExportReport {
        workouts_path,
        meals_path,
        workout_rows: workouts.len(),
        meal_rows: meals.len(),
    })
}
