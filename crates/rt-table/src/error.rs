use std::path::PathBuf;

use rt_core::DiceError;

/// Alias for `Result<T, TableError>`.
pub type TableResult<T> = Result<T, TableError>;

/// Errors that can occur when editing, loading, or saving a table.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// The dice pool or rule could not produce a distribution.
    #[error(transparent)]
    Dice(#[from] DiceError),

    /// A state file is not valid JSON.
    #[error("invalid table state: {0}")]
    Json(#[from] serde_json::Error),

    /// A state file could not be read or written.
    #[error("cannot access {}: {source}", path.display())]
    Io {
        /// The file being accessed.
        path: PathBuf,
        /// The underlying I/O failure.
        source: std::io::Error,
    },

    /// An edit referenced a band that does not exist.
    #[error("no outcome at index {index} (table has {len})")]
    OutcomeIndex {
        /// The requested index.
        index: usize,
        /// Number of bands in the list.
        len: usize,
    },

    /// A textual outcome definition could not be read.
    #[error("invalid outcome: {0}")]
    InvalidOutcome(String),
}
