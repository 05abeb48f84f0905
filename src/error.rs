use std::path::PathBuf;

/// Errors raised when a disc cannot be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("column {0} is out of range (expected 0..=6)")]
    InvalidColumn(usize),

    #[error("the game is already over")]
    GameOver,
}

/// Errors raised by the search engine.
///
/// `NoLegalMove` means the caller skipped its terminal-state check; a correct
/// game loop never sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("no legal move available (board full or game already decided)")]
    NoLegalMove,
}

/// Errors raised when replaying a move list such as `"4453"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ReplayError {
    #[error("move {index} ({ch:?}) is not a column between 1 and 7")]
    BadColumn { index: usize, ch: char },

    #[error("move {index} (column {column}): {source}")]
    Move {
        index: usize,
        column: usize,
        source: MoveError,
    },
}

/// Errors raised when parsing a board from its text form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardParseError {
    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unexpected character {ch:?} at row {row}, column {col}")]
    BadCell { row: usize, col: usize, ch: char },

    #[error("disc at row {row}, column {col} has an empty cell beneath it")]
    FloatingDisc { row: usize, col: usize },
}

/// Unknown difficulty name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty '{0}' (expected easy, medium or hard)")]
pub struct DifficultyParseError(pub String);

/// Errors raised by a human-vs-computer session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("illegal move: {0}")]
    Move(#[from] MoveError),

    #[error("search failed: {0}")]
    Search(#[from] SearchError),

    #[error("it is not the human player's turn")]
    NotHumanTurn,

    #[error("it is not the computer's turn")]
    NotComputerTurn,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
