//! Error taxonomy for the ladder engine

use thiserror::Error;

/// Errors raised by lattice generation, simulation and the game controller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LadderError {
    /// Not enough columns or rows to build a ladder (placeholder state, not fatal)
    #[error("a ladder needs 2+ participants and 1+ rows (got {participants} and {rows})")]
    InvalidConfiguration { participants: usize, rows: usize },

    /// Winner count outside `[1, participants - 1]` or not an integer
    #[error("winner count must be between 1 and {max} (got {requested:?})")]
    InvalidWinnerCount { requested: String, max: usize },

    /// Mapping was not a bijection; a lattice invariant was broken
    #[error("no unique start column reaches end column {end_column}")]
    NoMatchFound { end_column: usize },

    #[error("column {column} is outside a ladder of {columns} columns")]
    ColumnOutOfRange { column: usize, columns: usize },

    #[error("participants cannot change while a draw is in progress")]
    GameInProgress,

    #[error("settings error: {0}")]
    Settings(String),

    #[error("user source error: {0}")]
    UserSource(String),
}

pub type Result<T> = std::result::Result<T, LadderError>;
