// Input loading: NUL-byte cleanup, player stats TSV, draft results CSV.

pub mod clean;
pub mod picks;
pub mod players;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to write file {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("invalid row in {path} at line {line}: {message}")]
    InvalidRow {
        path: String,
        line: u64,
        message: String,
    },
}

/// Line number of a CSV error, when the reader recorded one.
pub(crate) fn error_line(err: &csv::Error) -> Option<u64> {
    err.position().map(|p| p.line())
}
