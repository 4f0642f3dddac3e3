use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use tracing::{debug, info};

use crate::models::{RepsByDate, WorkoutRecord};

/// Append one workout row and return its freshly assigned id. Storage does not
/// judge the values; keeping reps non-negative is the caller's job.
pub fn insert_workout(conn: &Connection, date: &str, exercise: &str, reps: i64) -> Result<i64> {
    conn.execute(
        "INSERT INTO workouts (date, exercise, reps) VALUES (?1, ?2, ?3)",
        params![date, exercise, reps],
    )
    .context("failed to insert workout")?;

    let id = conn.last_insert_rowid();
    info!(id, "workout stored");
    debug!(id, date, exercise, reps, "workout values");
    Ok(id)
}

/// Total reps per distinct `date` string. Row order is whatever SQLite's
/// grouping produces; callers must not rely on it being sorted.
pub fn workout_summary(conn: &Connection) -> Result<Vec<RepsByDate>> {
    let mut stmt = conn
        .prepare("SELECT date, SUM(reps) FROM workouts GROUP BY date")
        .context("failed to prepare workout summary query")?;

    let rows = stmt
        .query_map([], |row| {
            Ok(RepsByDate {
                date: row.get(0)?,
                total_reps: row.get(1)?,
            })
        })
        .context("failed to run workout summary")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect workout summary")?;

    Ok(rows)
}

/// Every workout in insertion (primary key) order.
pub fn fetch_workouts(conn: &Connection) -> Result<Vec<WorkoutRecord>> {
    let mut stmt = conn
        .prepare("SELECT id, date, exercise, reps FROM workouts ORDER BY id")
        .context("failed to prepare workout query")?;

    let workouts = stmt
        .query_map([], |row| {
            Ok(WorkoutRecord {
                id: row.get(0)?,
                date: row.get(1)?,
                exercise: row.get(2)?,
                reps: row.get(3)?,
            })
        })
        .context("failed to load workouts")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect workouts")?;

    Ok(workouts)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::db::ensure_schema;

    fn memory_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn ids_are_distinct_and_increasing() {
        let conn = memory_db();
        let ids: Vec<i64> = (0..20)
            .map(|i| insert_workout(&conn, "2024-01-01", "Pushups", i).unwrap())
            .collect();

        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn ids_are_not_reused_after_rows_disappear() {
        let conn = memory_db();
        let first = insert_workout(&conn, "2024-01-01", "Squats", 10).unwrap();
        conn.execute("DELETE FROM workouts WHERE id = ?1", [first])
            .unwrap();

        let second = insert_workout(&conn, "2024-01-02", "Squats", 10).unwrap();
        assert!(second > first);
    }

    #[test]
    fn inserted_row_is_visible_immediately() {
        let conn = memory_db();
        insert_workout(&conn, "2024-01-01", "Pushups", 5).unwrap();
        let before = fetch_workouts(&conn).unwrap();

        let id = insert_workout(&conn, "2024-02-03", "Pullups", 8).unwrap();
        let after = fetch_workouts(&conn).unwrap();

        assert_eq!(after.len(), before.len() + 1);
        let matching: Vec<_> = after
            .iter()
            .filter(|w| w.date == "2024-02-03" && w.exercise == "Pullups" && w.reps == 8)
            .collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].id, id);
        assert!(!before.iter().any(|w| w.id == id));
    }

    #[test]
    fn summary_sums_reps_per_distinct_date() {
        let conn = memory_db();
        let rows = [
            ("2024-01-01", "Pushups", 10),
            ("2024-01-01", "Squats", 15),
            ("2024-01-02", "Pullups", 4),
            ("2024-1-2", "Pullups", 1),
            ("2024-01-03", "Squats", 0),
        ];
        for (date, exercise, reps) in rows {
            insert_workout(&conn, date, exercise, reps).unwrap();
        }

        let summary = workout_summary(&conn).unwrap();
        let totals: HashMap<String, i64> = summary
            .iter()
            .map(|r| (r.date.clone(), r.total_reps))
            .collect();

        assert_eq!(summary.len(), 4);
        assert_eq!(totals["2024-01-01"], 25);
        assert_eq!(totals["2024-01-02"], 4);
        assert_eq!(totals["2024-1-2"], 1);
        assert_eq!(totals["2024-01-03"], 0);
    }

    #[test]
    fn summary_of_empty_table_is_empty() {
        let conn = memory_db();
        assert!(workout_summary(&conn).unwrap().is_empty());
        assert!(fetch_workouts(&conn).unwrap().is_empty());
    }

    #[test]
    fn storage_accepts_values_the_form_would_reject() {
        let conn = memory_db();
        insert_workout(&conn, "", "Burpees", -3).unwrap();

        let stored = fetch_workouts(&conn).unwrap();
        assert_eq!(stored[0].exercise, "Burpees");
        assert_eq!(stored[0].reps, -3);
    }
}
