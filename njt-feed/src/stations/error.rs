//! Station directory error types.

use crate::feed::FeedError;

/// Errors that can occur while loading the station directory.
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    /// Fetching or decoding the station list failed
    #[error("station list unavailable: {0}")]
    Feed(#[from] FeedError),

    /// Cache operation failed
    #[error("cache error: {message}")]
    Cache { message: String },
}
