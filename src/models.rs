//! Domain models that mirror the SQLite schema plus the fixed vocabularies the
//! entry form offers. Records keep their categorical columns as plain strings
//! because the store accepts any text; the enums below are what the form and
//! the validation layer agree on.

use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;

/// Exercises offered by the workout selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Exercise {
    #[default]
    Pushups,
    Squats,
    Pullups,
}

impl Exercise {
    /// Every exercise in selector order.
    pub const ALL: [Exercise; 3] = [Exercise::Pushups, Exercise::Squats, Exercise::Pullups];

    /// Text written to the `exercise` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Exercise::Pushups => "Pushups",
            Exercise::Squats => "Squats",
            Exercise::Pullups => "Pullups",
        }
    }

    /// Following entry in the selector, wrapping to the first.
    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    /// Preceding entry in the selector, wrapping to the last.
    pub fn previous(self) -> Self {
        cycle(&Self::ALL, self, Self::ALL.len() - 1)
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Exercise {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|exercise| exercise.as_str() == s)
            .ok_or_else(|| anyhow!("unknown exercise: {s}"))
    }
}

/// Meal categories offered by the meal selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MealType {
    #[default]
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    /// Every meal type in selector order.
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];

    /// Text written to the `meal_type` column.
    pub fn as_str(self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
            MealType::Snack => "Snack",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn previous(self) -> Self {
        cycle(&Self::ALL, self, Self::ALL.len() - 1)
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|meal| meal.as_str() == s)
            .ok_or_else(|| anyhow!("unknown meal type: {s}"))
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T, step: usize) -> T {
    let idx = all.iter().position(|item| *item == current).unwrap_or(0);
    all[(idx + step) % all.len()]
}

/// One row of the `workouts` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutRecord {
    /// AUTOINCREMENT key; never reused even after the highest row is gone.
    pub id: i64,
    /// Free-form text, conventionally `YYYY-MM-DD`. Never parsed.
    pub date: String,
    pub exercise: String,
    pub reps: i64,
}

/// One row of the `meals` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealRecord {
    pub id: i64,
    pub date: String,
    pub meal_type: String,
    /// What was eaten; may span several lines.
    pub items: String,
}

/// Summed reps for one distinct `date` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepsByDate {
    pub date: String,
    pub total_reps: i64,
}

/// Number of meals logged under one distinct `meal_type` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealTypeCount {
    pub meal_type: String,
    pub count: i64,
}
