//! User actions as plain values. The UI turns key presses into a [`Command`],
//! hands it to the [`Dispatcher`], and renders whatever [`Outcome`] or
//! [`CommandError`] comes back. Validation lives here so it can be exercised
//! without a terminal.

use std::path::PathBuf;

use rusqlite::Connection;
use tracing::{error, info, warn};

use crate::db::{insert_meal, insert_workout, meal_summary, record_counts, workout_summary};
use crate::error::{CommandError, ValidationError};
use crate::export::{export_all, ExportReport};
use crate::models::{Exercise, MealType, MealTypeCount, RepsByDate};

/// One user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Raw text as typed; nothing has been checked yet.
    SaveWorkout {
        date: String,
        exercise: Exercise,
        reps: String,
    },
    SaveMeal {
        date: String,
        meal_type: MealType,
        items: String,
    },
    ShowWorkoutChart,
    ShowMealChart,
    Export,
}

/// Successful result of a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    WorkoutSaved { id: i64 },
    MealSaved { id: i64 },
    WorkoutChart(Vec<RepsByDate>),
    MealChart(Vec<MealSlice>),
    /// A chart was requested but there is nothing to plot.
    NoData {
        title: &'static str,
        message: &'static str,
    },
    Exported(ExportReport),
}

/// One wedge of the meal distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct MealSlice {
    pub meal_type: String,
    pub count: i64,
    /// Share of all meals, 0 to 100.
    pub percent: f64,
}

impl MealSlice {
    /// `"Lunch 40.0%"`-style label.
    pub fn label(&self) -> String {
        format!("{} {:.1}%", self.meal_type, self.percent)
    }
}

/// Check the workout inputs and return them typed. The date only has to be
/// non-empty; reps must be a plain run of ASCII digits.
pub fn validate_workout(date: &str, reps: &str) -> Result<i64, ValidationError> {
    if date.is_empty() || reps.is_empty() || !reps.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(ValidationError::MissingWorkoutFields);
    }
    reps.parse::<i64>().map_err(|_| ValidationError::RepsOutOfRange)
}

/// Meals need a date and some text describing what was eaten. Whitespace
/// counts as text.
pub fn validate_meal(date: &str, items: &str) -> Result<(), ValidationError> {
    if date.is_empty() || items.is_empty() {
        return Err(ValidationError::MissingMealFields);
    }
    Ok(())
}

/// Turn meal counts into percentage slices, keeping the summary order.
pub fn meal_distribution(counts: &[MealTypeCount]) -> Vec<MealSlice> {
    let total: i64 = counts.iter().map(|c| c.count).sum();
    counts
        .iter()
        .map(|c| MealSlice {
            meal_type: c.meal_type.clone(),
            count: c.count,
            percent: if total > 0 {
                c.count as f64 * 100.0 / total as f64
            } else {
                0.0
            },
        })
        .collect()
}

/// Executes commands against the session's storage handle.
pub struct Dispatcher {
    conn: Connection,
    export_dir: PathBuf,
}

impl Dispatcher {
    pub fn new(conn: Connection, export_dir: PathBuf) -> Self {
        Self { conn, export_dir }
    }

    /// Stored `(workouts, meals)` row counts.
    pub fn counts(&self) -> Result<(i64, i64), CommandError> {
        Ok(record_counts(&self.conn)?)
    }

    pub fn dispatch(&self, command: Command) -> Result<Outcome, CommandError> {
        let result = self.run(command);
        match &result {
            Err(CommandError::Validation(err)) => warn!(%err, "input rejected"),
            Err(CommandError::Storage(err)) => {
                let cause = format!("{err:#}");
                error!(%cause, "command failed");
            }
            Ok(_) => {}
        }
        result
    }

    fn run(&self, command: Command) -> Result<Outcome, CommandError> {
        match command {
            Command::SaveWorkout {
                date,
                exercise,
                reps,
            } => {
                let reps = validate_workout(&date, &reps)?;
                let id = insert_workout(&self.conn, &date, exercise.as_str(), reps)?;
                Ok(Outcome::WorkoutSaved { id })
            }
            Command::SaveMeal {
                date,
                meal_type,
                items,
            } => {
                validate_meal(&date, &items)?;
                let id = insert_meal(&self.conn, &date, meal_type.as_str(), &items)?;
                Ok(Outcome::MealSaved { id })
            }
            Command::ShowWorkoutChart => {
                let summary = workout_summary(&self.conn)?;
                info!(dates = summary.len(), "workout summary loaded");
                if summary.is_empty() {
                    Ok(Outcome::NoData {
                        title: "No Data",
                        message: "No workouts to show.",
                    })
                } else {
                    Ok(Outcome::WorkoutChart(summary))
                }
            }
            Command::ShowMealChart => {
                let summary = meal_summary(&self.conn)?;
                info!(meal_types = summary.len(), "meal summary loaded");
                if summary.is_empty() {
                    Ok(Outcome::NoData {
                        title: "No Data",
                        message: "No meals to show.",
                    })
                } else {
                    Ok(Outcome::MealChart(meal_distribution(&summary)))
                }
            }
            Command::Export => Ok(Outcome::Exported(export_all(&self.conn, &self.export_dir)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{ensure_schema, fetch_workouts};

    fn test_dispatcher() -> (Dispatcher, tempfile::TempDir) {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        let dir = tempfile::tempdir().unwrap();
        (Dispatcher::new(conn, dir.path().to_path_buf()), dir)
    }

    fn save_workout(date: &str, reps: &str) -> Command {
        Command::SaveWorkout {
            date: date.to_string(),
            exercise: Exercise::Squats,
            reps: reps.to_string(),
        }
    }

    #[test]
    fn malformed_reps_are_rejected() {
        for reps in ["12.5", "-3", "", "abc", " 12", "1e3", "١٢"] {
            assert_eq!(
                validate_workout("2024-01-01", reps),
                Err(ValidationError::MissingWorkoutFields),
                "reps {reps:?} should be rejected"
            );
        }
    }

    #[test]
    fn digit_reps_are_accepted() {
        assert_eq!(validate_workout("2024-01-01", "0"), Ok(0));
        assert_eq!(validate_workout("2024-01-01", "007"), Ok(7));
        assert_eq!(validate_workout("anything", "150"), Ok(150));
    }

    #[test]
    fn empty_date_is_rejected_but_whitespace_date_is_not() {
        assert!(validate_workout("", "10").is_err());
        assert!(validate_workout(" ", "10").is_ok());
        assert!(validate_meal("", "eggs").is_err());
        assert!(validate_meal(" ", "eggs").is_ok());
    }

    #[test]
    fn oversized_reps_are_out_of_range() {
        assert_eq!(
            validate_workout("2024-01-01", "99999999999999999999"),
            Err(ValidationError::RepsOutOfRange)
        );
    }

    #[test]
    fn meal_items_only_need_to_be_non_empty() {
        assert!(validate_meal("2024-01-01", "").is_err());
        assert!(validate_meal("2024-01-01", "   ").is_ok());
        assert!(validate_meal("2024-01-01", "eggs\ntoast").is_ok());
    }

    #[test]
    fn rejected_workout_writes_nothing() {
        let (dispatcher, _dir) = test_dispatcher();
        for reps in ["12.5", "-3", "", "abc"] {
            let err = dispatcher.dispatch(save_workout("2024-01-01", reps)).unwrap_err();
            assert!(matches!(err, CommandError::Validation(_)));
        }
        assert_eq!(dispatcher.counts().unwrap(), (0, 0));
    }

    #[test]
    fn saved_workout_uses_selected_exercise() {
        let (dispatcher, _dir) = test_dispatcher();
        let outcome = dispatcher.dispatch(save_workout("2024-01-01", "20")).unwrap();

        let Outcome::WorkoutSaved { id } = outcome else {
            panic!("unexpected outcome: {outcome:?}");
        };
        let stored = fetch_workouts(&dispatcher.conn).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, id);
        assert_eq!(stored[0].exercise, "Squats");
        assert_eq!(stored[0].reps, 20);
    }

    #[test]
    fn empty_store_reports_no_data_for_both_charts() {
        let (dispatcher, _dir) = test_dispatcher();

        let workouts = dispatcher.dispatch(Command::ShowWorkoutChart).unwrap();
        assert_eq!(
            workouts,
            Outcome::NoData {
                title: "No Data",
                message: "No workouts to show."
            }
        );

        let meals = dispatcher.dispatch(Command::ShowMealChart).unwrap();
        assert_eq!(
            meals,
            Outcome::NoData {
                title: "No Data",
                message: "No meals to show."
            }
        );
    }

    #[test]
    fn workout_chart_carries_summed_reps() {
        let (dispatcher, _dir) = test_dispatcher();
        dispatcher.dispatch(save_workout("2024-01-01", "10")).unwrap();
        dispatcher.dispatch(save_workout("2024-01-01", "5")).unwrap();

        let outcome = dispatcher.dispatch(Command::ShowWorkoutChart).unwrap();
        assert_eq!(
            outcome,
            Outcome::WorkoutChart(vec![RepsByDate {
                date: "2024-01-01".to_string(),
                total_reps: 15,
            }])
        );
    }

    #[test]
    fn meal_distribution_splits_by_share() {
        let counts = vec![
            MealTypeCount {
                meal_type: "Lunch".into(),
                count: 3,
            },
            MealTypeCount {
                meal_type: "Snack".into(),
                count: 1,
            },
        ];

        let slices = meal_distribution(&counts);
        assert_eq!(slices.len(), 2);
        assert!((slices[0].percent - 75.0).abs() < 1e-9);
        assert!((slices[1].percent - 25.0).abs() < 1e-9);
        assert_eq!(slices[0].label(), "Lunch 75.0%");
        assert_eq!(slices[1].label(), "Snack 25.0%");
    }

    #[test]
    fn meal_chart_outcome_after_saving_meals() {
        let (dispatcher, _dir) = test_dispatcher();
        for meal_type in [MealType::Dinner, MealType::Dinner, MealType::Breakfast] {
            dispatcher
                .dispatch(Command::SaveMeal {
                    date: "2024-01-01".into(),
                    meal_type,
                    items: "food".into(),
                })
                .unwrap();
        }

        let Outcome::MealChart(slices) = dispatcher.dispatch(Command::ShowMealChart).unwrap()
        else {
            panic!("expected a meal chart");
        };
        let dinner = slices.iter().find(|s| s.meal_type == "Dinner").unwrap();
        assert_eq!(dinner.count, 2);
        assert_eq!(dinner.label(), "Dinner 66.7%");
    }

    #[test]
    fn export_command_writes_into_export_dir() {
        let (dispatcher, dir) = test_dispatcher();
        dispatcher.dispatch(save_workout("2024-01-01", "20")).unwrap();

        let Outcome::Exported(report) = dispatcher.dispatch(Command::Export).unwrap() else {
            panic!("expected an export report");
        };
        assert_eq!(report.workouts_path, dir.path().join("workouts.csv"));
        assert_eq!(report.workout_rows, 1);
        assert_eq!(report.meal_rows, 0);
    }

    #[test]
    fn export_into_unwritable_location_is_a_storage_error() {
        let (dispatcher, dir) = test_dispatcher();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();
        let dispatcher = Dispatcher::new(dispatcher.conn, blocker.join("nested"));

        let err = dispatcher.dispatch(Command::Export).unwrap_err();
        assert!(matches!(err, CommandError::Storage(_)));
        assert_eq!(err.title(), "Storage Error");
    }
}
