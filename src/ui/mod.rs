//! Ratatui front-end: the entry form, the two chart screens, and the modal
//! notices that report every action's result.

mod app;
mod charts;
mod forms;
mod helpers;
mod terminal;

pub use app::App;
pub use terminal::run_app;
