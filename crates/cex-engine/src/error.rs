use thiserror::Error;

use cex_repo::RepoError;

/// Whole-run failures. Per-field misses are never errors: a missing field
/// degrades to an absent-value cell and a missing reference target degrades
/// to an empty cell.
#[derive(Debug, Error)]
pub enum ExportError {
    /// No usable root or database; raised before any rows are produced.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Malformed fast-query string.
    #[error(transparent)]
    Query(#[from] RepoError),

    /// Any other failure during row construction aborts the whole export;
    /// there is no partial-success mode.
    #[error("export failed: {0}")]
    Unexpected(String),
}

pub type Result<T> = std::result::Result<T, ExportError>;
