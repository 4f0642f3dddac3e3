use std::mem;

use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use tracing::debug;

use crate::commands::{Command, Dispatcher, MealSlice, Outcome};
use crate::error::CommandError;
use crate::models::RepsByDate;

use super::charts::{draw_meal_distribution, draw_reps_chart};
use super::forms::{EntryForm, Field, Section};
use super::helpers::{centered_rect, surface_error};

const APP_TITLE: &str = "Fitness & Meal Tracker";
/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
const HEADER_HEIGHT: u16 = 3;
/// Workout section: three inputs plus borders.
const WORKOUT_HEIGHT: u16 = 5;

/// What fills the main area.
enum Screen {
    Form,
    WorkoutChart(Vec<RepsByDate>),
    MealChart(Vec<MealSlice>),
}

/// Either free interaction or a notice that swallows input until dismissed.
enum Mode {
    Normal,
    Notice(Notice),
}

/// Blocking message box.
struct Notice {
    title: String,
    message: String,
    kind: StatusKind,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer and on notice borders.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    dispatcher: Dispatcher,
    form: EntryForm,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
    counts: Option<(i64, i64)>,
}

impl App {
    pub fn new(dispatcher: Dispatcher) -> Self {
        let mut app = Self {
            dispatcher,
            form: EntryForm::default(),
            screen: Screen::Form,
            mode: Mode::Normal,
            status: None,
            counts: None,
        };
        app.refresh_counts();
        app
    }

    /// Route a key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Notice(notice) => self.handle_notice_key(code, notice),
            Mode::Normal => {
                self.handle_normal_key(code, &mut exit);
                // A command may have raised a notice while we held `Normal`.
                mem::replace(&mut self.mode, Mode::Normal)
            }
        };

        exit
    }

    /// Ctrl-S saves the focused section, which is the only way to save from
    /// the multi-line items box. Ctrl-C always quits.
    pub(crate) fn handle_ctrl(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('c') => true,
            KeyCode::Char('s') => {
                if matches!(self.mode, Mode::Normal) && matches!(self.screen, Screen::Form) {
                    self.execute(self.form.submit_command());
                }
                false
            }
            _ => false,
        }
    }

    fn handle_notice_key(&mut self, code: KeyCode, notice: Notice) -> Mode {
        match code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Mode::Normal,
            _ => Mode::Notice(notice),
        }
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) {
        match code {
            KeyCode::F(2) => return self.execute(Command::ShowWorkoutChart),
            KeyCode::F(3) => return self.execute(Command::ShowMealChart),
            KeyCode::F(4) => return self.execute(Command::Export),
            _ => {}
        }

        match self.screen {
            Screen::Form => self.handle_form_key(code, exit),
            Screen::WorkoutChart(_) | Screen::MealChart(_) => match code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                    self.screen = Screen::Form;
                }
                _ => {}
            },
        }
    }

    fn handle_form_key(&mut self, code: KeyCode, exit: &mut bool) {
        match code {
            KeyCode::Esc => *exit = true,
            KeyCode::Tab | KeyCode::Down => self.form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.form.focus_previous(),
            KeyCode::Left => self.form.cycle_selector(false),
            KeyCode::Right => self.form.cycle_selector(true),
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Enter => {
                if self.form.active == Field::Items {
                    self.form.push_newline();
                } else {
                    self.execute(self.form.submit_command());
                }
            }
            KeyCode::Char(ch) => {
                self.form.push_char(ch);
            }
            _ => {}
        }
    }

    /// Run a command and route the result to the screen, the form, or a
    /// notice. Errors never escape: the user sees them and carries on.
    fn execute(&mut self, command: Command) {
        debug!(?command, "dispatching");
        match self.dispatcher.dispatch(command) {
            Ok(outcome) => self.apply_outcome(outcome),
            Err(err) => self.show_error(err),
        }
    }

    fn apply_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::WorkoutSaved { id } => {
                self.form.workout.clear_after_save();
                self.refresh_counts();
                self.set_status(format!("Saved workout #{id}."), StatusKind::Info);
                self.show_notice("Saved", "Workout saved successfully!", StatusKind::Info);
            }
            Outcome::MealSaved { id } => {
                self.form.meal.clear_after_save();
                self.refresh_counts();
                self.set_status(format!("Saved meal #{id}."), StatusKind::Info);
                self.show_notice("Saved", "Meal saved successfully!", StatusKind::Info);
            }
            Outcome::WorkoutChart(summary) => {
                self.screen = Screen::WorkoutChart(summary);
            }
            Outcome::MealChart(slices) => {
                self.screen = Screen::MealChart(slices);
            }
            Outcome::NoData { title, message } => {
                self.show_notice(title, message, StatusKind::Info);
            }
            Outcome::Exported(report) => {
                self.set_status(
                    format!(
                        "Exported {} workouts and {} meals.",
                        report.workout_rows, report.meal_rows
                    ),
                    StatusKind::Info,
                );
                let message = format!(
                    "Data exported to CSV successfully!\n\n{}\n{}",
                    report.workouts_path.display(),
                    report.meals_path.display()
                );
                self.show_notice("Exported", message, StatusKind::Info);
            }
        }
    }

    fn show_error(&mut self, err: CommandError) {
        let message = match &err {
            CommandError::Validation(invalid) => invalid.to_string(),
            CommandError::Storage(cause) => surface_error(cause),
        };
        self.set_status(message.clone(), StatusKind::Error);
        self.show_notice(err.title(), message, StatusKind::Error);
    }

    fn refresh_counts(&mut self) {
        match self.dispatcher.counts() {
            Ok(counts) => self.counts = Some(counts),
            Err(err) => {
                self.counts = None;
                self.show_error(err);
            }
        }
    }

    fn show_notice<T: Into<String>, M: Into<String>>(
        &mut self,
        title: T,
        message: M,
        kind: StatusKind,
    ) {
        self.mode = Mode::Notice(Notice {
            title: title.into(),
            message: message.into(),
            kind,
        });
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Form => self.draw_form(frame, content_area),
            Screen::WorkoutChart(summary) => draw_reps_chart(frame, content_area, summary),
            Screen::MealChart(slices) => draw_meal_distribution(frame, content_area, slices),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        if let Mode::Notice(notice) = &self.mode {
            self.draw_notice(frame, area, notice);
        }
    }

    fn draw_form(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Length(WORKOUT_HEIGHT),
                Constraint::Min(3),
            ])
            .split(area);

        let counts = match self.counts {
            Some((workouts, meals)) => format!("{workouts} workouts • {meals} meals logged"),
            None => "record counts unavailable".to_string(),
        };
        let header = Paragraph::new(Line::from(Span::styled(
            counts,
            Style::default().fg(Color::Gray),
        )))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(APP_TITLE)
                .title_alignment(Alignment::Center)
                .borders(Borders::ALL),
        );
        frame.render_widget(header, chunks[0]);

        self.draw_section(
            frame,
            chunks[1],
            "Workout Entry",
            Section::Workout,
            &[Field::WorkoutDate, Field::Exercise, Field::Reps],
        );
        self.draw_section(
            frame,
            chunks[2],
            "Meal Entry",
            Section::Meal,
            &[Field::MealDate, Field::MealType, Field::Items],
        );
    }

    fn draw_section(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        section: Section,
        fields: &[Field],
    ) {
        let focused = self.form.active.section() == section;
        let border_style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = Vec::new();
        let mut cursor = None;
        for field in fields {
            if *field == self.form.active {
                if let Some((x, y)) = self.form.cursor_offset(*field) {
                    let row = (lines.len() as u16).saturating_add(y);
                    cursor = Some((x, row));
                }
            }
            lines.extend(self.form.build_lines(*field));
        }

        let scroll = cursor.map_or(0, |(_, row)| scroll_to_row(row, inner.height));
        frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);

        if let Some((x, row)) = cursor {
            let x = inner.x.saturating_add(x);
            let y = inner.y.saturating_add(row - scroll);
            if x < inner.right() && y < inner.bottom() && matches!(self.mode, Mode::Normal) {
                frame.set_cursor_position((x, y));
            }
        }
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        match (&self.screen, &self.mode) {
            (_, Mode::Notice(_)) => Line::from(vec![
                Span::styled("[Enter]", key_style),
                Span::raw(" Dismiss"),
            ]),
            (Screen::WorkoutChart(_) | Screen::MealChart(_), _) => Line::from(vec![
                Span::styled("[Esc]", key_style),
                Span::raw(" Back   "),
                Span::styled("[F2]", key_style),
                Span::raw(" Workout Chart   "),
                Span::styled("[F3]", key_style),
                Span::raw(" Meal Stats   "),
                Span::styled("[F4]", key_style),
                Span::raw(" Export CSV"),
            ]),
            (Screen::Form, _) => {
                let save = if self.form.active == Field::Items {
                    "[Ctrl-S]"
                } else {
                    "[Enter]"
                };
                Line::from(vec![
                    Span::styled("[Tab]", key_style),
                    Span::raw(" Next   "),
                    Span::styled("[←→]", key_style),
                    Span::raw(" Choose   "),
                    Span::styled(save, key_style),
                    Span::raw(" Save   "),
                    Span::styled("[F2]", key_style),
                    Span::raw(" Workout Chart   "),
                    Span::styled("[F3]", key_style),
                    Span::raw(" Meal Stats   "),
                    Span::styled("[F4]", key_style),
                    Span::raw(" Export CSV   "),
                    Span::styled("[Esc]", key_style),
                    Span::raw(" Quit"),
                ])
            }
        }
    }

    fn draw_notice(&self, frame: &mut Frame, area: Rect, notice: &Notice) {
        let popup_area = centered_rect(60, 40, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(notice.title.as_str())
            .borders(Borders::ALL)
            .border_style(notice.kind.style());
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines: Vec<Line> = notice.message.lines().map(Line::from).collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press Enter to continue.",
            Style::default().fg(Color::Gray),
        )));

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }
}

/// Lines to scroll so `row` stays visible in a box `height` lines tall.
fn scroll_to_row(row: u16, height: u16) -> u16 {
    row.saturating_sub(height.saturating_sub(1))
}
