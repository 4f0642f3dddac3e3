use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::commands::Command;
use crate::models::{Exercise, MealType};

/// Every focusable input on the entry screen, in Tab order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub(crate) enum Field {
    #[default]
    WorkoutDate,
    Exercise,
    Reps,
    MealDate,
    MealType,
    Items,
}

impl Field {
    const ORDER: [Field; 6] = [
        Field::WorkoutDate,
        Field::Exercise,
        Field::Reps,
        Field::MealDate,
        Field::MealType,
        Field::Items,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub(crate) fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub(crate) fn previous(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    pub(crate) fn section(self) -> Section {
        match self {
            Field::WorkoutDate | Field::Exercise | Field::Reps => Section::Workout,
            Field::MealDate | Field::MealType | Field::Items => Section::Meal,
        }
    }

    /// Label printed in front of the value.
    pub(crate) fn label(self) -> &'static str {
        match self {
            Field::WorkoutDate | Field::MealDate => "Date",
            Field::Exercise => "Exercise",
            Field::Reps => "Reps",
            Field::MealType => "Meal Type",
            Field::Items => "Items",
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            Field::WorkoutDate | Field::MealDate => "YYYY-MM-DD",
            Field::Reps => "number of reps",
            Field::Items => "What did you eat?",
            Field::Exercise | Field::MealType => "",
        }
    }

    pub(crate) fn is_selector(self) -> bool {
        matches!(self, Field::Exercise | Field::MealType)
    }
}

/// The two halves of the entry screen.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Section {
    Workout,
    Meal,
}

#[derive(Default, Clone)]
pub(crate) struct WorkoutForm {
    pub(crate) date: String,
    pub(crate) exercise: Exercise,
    pub(crate) reps: String,
}

impl WorkoutForm {
    /// After a successful save the text inputs empty out; the exercise
    /// selector keeps its value so repeated sets are quick to log.
    pub(crate) fn clear_after_save(&mut self) {
        self.date.clear();
        self.reps.clear();
    }
}

#[derive(Default, Clone)]
pub(crate) struct MealForm {
    pub(crate) date: String,
    pub(crate) meal_type: MealType,
    pub(crate) items: String,
}

impl MealForm {
    pub(crate) fn clear_after_save(&mut self) {
        self.date.clear();
        self.items.clear();
    }
}

/// Combined state of both entry sections plus which input has focus.
#[derive(Default, Clone)]
pub(crate) struct EntryForm {
    pub(crate) workout: WorkoutForm,
    pub(crate) meal: MealForm,
    pub(crate) active: Field,
}

impl EntryForm {
    pub(crate) fn focus_next(&mut self) {
        self.active = self.active.next();
    }

    pub(crate) fn focus_previous(&mut self) {
        self.active = self.active.previous();
    }

    /// Append a character to the active text input. Selectors ignore typing.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.text_mut(self.active) {
            Some(value) => {
                value.push(ch);
                true
            }
            None => false,
        }
    }

    /// Start a new line in the items box.
    pub(crate) fn push_newline(&mut self) {
        if self.active == Field::Items {
            self.meal.items.push('\n');
        }
    }

    pub(crate) fn backspace(&mut self) {
        if let Some(value) = self.text_mut(self.active) {
            value.pop();
        }
    }

    /// Step the focused selector forwards or backwards.
    pub(crate) fn cycle_selector(&mut self, forward: bool) {
        match self.active {
            Field::Exercise => {
                self.workout.exercise = if forward {
                    self.workout.exercise.next()
                } else {
                    self.workout.exercise.previous()
                };
            }
            Field::MealType => {
                self.meal.meal_type = if forward {
                    self.meal.meal_type.next()
                } else {
                    self.meal.meal_type.previous()
                };
            }
            _ => {}
        }
    }

    /// Build the save command for whichever section holds focus.
    pub(crate) fn submit_command(&self) -> Command {
        match self.active.section() {
            Section::Workout => Command::SaveWorkout {
                date: self.workout.date.clone(),
                exercise: self.workout.exercise,
                reps: self.workout.reps.clone(),
            },
            Section::Meal => Command::SaveMeal {
                date: self.meal.date.clone(),
                meal_type: self.meal.meal_type,
                items: self.meal.items.clone(),
            },
        }
    }

    fn text(&self, field: Field) -> Option<&String> {
        match field {
            Field::WorkoutDate => Some(&self.workout.date),
            Field::Reps => Some(&self.workout.reps),
            Field::MealDate => Some(&self.meal.date),
            Field::Items => Some(&self.meal.items),
            Field::Exercise | Field::MealType => None,
        }
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::WorkoutDate => Some(&mut self.workout.date),
            Field::Reps => Some(&mut self.workout.reps),
            Field::MealDate => Some(&mut self.meal.date),
            Field::Items => Some(&mut self.meal.items),
            Field::Exercise | Field::MealType => None,
        }
    }

    /// Render one input as styled lines. Items may produce several lines;
    /// continuation lines are indented under the first value column.
    pub(crate) fn build_lines(&self, field: Field) -> Vec<Line<'static>> {
        let is_active = self.active == field;
        let prefix = format!("{}: ", field.label());

        if field.is_selector() {
            let choice = match field {
                Field::Exercise => self.workout.exercise.as_str(),
                _ => self.meal.meal_type.as_str(),
            };
            let style = if is_active {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            return vec![Line::from(vec![
                Span::raw(prefix),
                Span::styled(format!("< {choice} >"), style),
            ])];
        }

        let value = self.text(field).cloned().unwrap_or_default();
        if value.is_empty() {
            let style = if is_active {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            return vec![Line::from(vec![
                Span::raw(prefix),
                Span::styled(field.placeholder().to_string(), style),
            ])];
        }

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let indent = " ".repeat(prefix.chars().count());
        value
            .split('\n')
            .enumerate()
            .map(|(idx, part)| {
                let lead = if idx == 0 { prefix.clone() } else { indent.clone() };
                Line::from(vec![Span::raw(lead), Span::styled(part.to_string(), style)])
            })
            .collect()
    }

    /// Cursor offset `(column, row)` relative to the start of the field's
    /// first line, in terminal cells. `None` for selectors.
    pub(crate) fn cursor_offset(&self, field: Field) -> Option<(u16, u16)> {
        let value = self.text(field)?;
        let prefix_width = field.label().width() + 2;
        let last_line = value.rsplit('\n').next().unwrap_or("");
        let row = value.matches('\n').count();
        let column = prefix_width + last_line.width();
        Some((
            u16::try_from(column).unwrap_or(u16::MAX),
            u16::try_from(row).unwrap_or(u16::MAX),
        ))
    }
}
