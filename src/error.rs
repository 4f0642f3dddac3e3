//! The two failure kinds a user action can end in.

use thiserror::Error;

/// Form input that cannot be saved. Nothing has been written when one of
/// these is returned, and the form keeps what the user typed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill workout fields correctly.")]
    MissingWorkoutFields,
    #[error("Please fill meal fields correctly.")]
    MissingMealFields,
    #[error("Reps value is too large.")]
    RepsOutOfRange,
}

/// Result of a failed command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Opening, reading or writing the store (or the export files) failed.
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl CommandError {
    /// Title used for the blocking notice shown to the user.
    pub fn title(&self) -> &'static str {
        match self {
            CommandError::Validation(_) => "Input Error",
            CommandError::Storage(_) => "Storage Error",
        }
    }
}
