use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use tracing::{debug, info};

use crate::models::{MealRecord, MealTypeCount};

/// Append one meal row and return its id.
pub fn insert_meal(conn: &Connection, date: &str, meal_type: &str, items: &str) -> Result<i64> {
    conn.execute(
        "INSERT INTO meals (date, meal_type, items) VALUES (?1, ?2, ?3)",
        params![date, meal_type, items],
    )
    .context("failed to insert meal")?;

    let id = conn.last_insert_rowid();
    info!(id, "meal stored");
    debug!(id, date, meal_type, items_len = items.len(), "meal values");
    Ok(id)
}

/// Number of meals per distinct `meal_type` string, in SQLite's grouping
/// order.
pub fn meal_summary(conn: &Connection) -> Result<Vec<MealTypeCount>> {
    let mut stmt = conn
        .prepare("SELECT meal_type, COUNT(*) FROM meals GROUP BY meal_type")
        .context("failed to prepare meal summary query")?;

    let rows = stmt
        .query_map([], |row| {
            Ok(MealTypeCount {
                meal_type: row.get(0)?,
                count: row.get(1)?,
            })
        })
        .context("failed to run meal summary")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect meal summary")?;

    Ok(rows)
}

/// Every meal in insertion (primary key) order.
pub fn fetch_meals(conn: &Connection) -> Result<Vec<MealRecord>> {
    let mut stmt = conn
        .prepare("SELECT id, date, meal_type, items FROM meals ORDER BY id")
        .context("failed to prepare meal query")?;

    let meals = stmt
        .query_map([], |row| {
            Ok(MealRecord {
                id: row.get(0)?,
                date: row.get(1)?,
                meal_type: row.get(2)?,
                items: row.get(3)?,
            })
        })
        .context("failed to load meals")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect meals")?;

    Ok(meals)
}
