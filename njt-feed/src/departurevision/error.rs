//! Departure page error types.

use std::io;
use std::sync::Arc;

/// The extracted grid does not look like a departure board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableFormatError {
    /// No rows at all
    #[error("departure table is empty")]
    Empty,

    /// The header row has none of the expected column names
    #[error("unable to identify any columns in departure table")]
    NoColumns,
}

/// Errors from fetching or reading the departure page.
#[derive(Debug, thiserror::Error)]
pub enum DepartureVisionError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Reading the page body failed
    #[error("failed to read departure page: {0}")]
    Read(Arc<io::Error>),

    /// The endpoint answered with a non-success status
    #[error("departure page error {status}: {message}")]
    Api { status: u16, message: String },

    /// The page did not contain a recognizable table
    #[error(transparent)]
    Table(#[from] TableFormatError),
}
