use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::info;

/// Open (creating if needed) the SQLite file at `path` and make sure both
/// tables exist. The returned connection is meant to live for the whole
/// session; every write on it auto-commits.
pub fn open_database(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).context("failed to create data directory")?;
        }
    }

    let conn = Connection::open(path)
        .with_context(|| format!("failed to open SQLite database at {}", path.display()))?;
    ensure_schema(&conn)?;

    info!(path = %path.display(), "database ready");
    Ok(conn)
}

/// Create the `workouts` and `meals` tables when absent. Safe to call any
/// number of times.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS workouts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT,
            exercise TEXT,
            reps INTEGER
        )",
        [],
    )
    .context("failed to create workouts table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS meals (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT,
            meal_type TEXT,
            items TEXT
        )",
        [],
    )
    .context("failed to create meals table")?;

    Ok(())
}

/// Row counts for `(workouts, meals)`, shown in the form header.
pub fn record_counts(conn: &Connection) -> Result<(i64, i64)> {
    let workouts: i64 = conn
        .query_row("SELECT COUNT(*) FROM workouts", [], |row| row.get(0))
        .context("failed to count workouts")?;
    let meals: i64 = conn
        .query_row("SELECT COUNT(*) FROM meals", [], |row| row.get(0))
        .context("failed to count meals")?;
    Ok((workouts, meals))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        ensure_schema(&conn).unwrap();
        assert_eq!(record_counts(&conn).unwrap(), (0, 0));
    }

    #[test]
    fn open_database_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("tracker.db");

        let conn = open_database(&path).unwrap();
        conn.execute(
            "INSERT INTO meals (date, meal_type, items) VALUES ('d', 'Lunch', 'soup')",
            [],
        )
        .unwrap();
        drop(conn);

        assert!(path.is_file());
        let reopened = open_database(&path).unwrap();
        assert_eq!(record_counts(&reopened).unwrap(), (0, 1));
    }
}
