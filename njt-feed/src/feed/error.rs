//! Feed client and decoder error types.

use std::fmt;

use crate::domain::TrainId;

/// Errors that abort a whole feed request or decode.
///
/// Field-level problems never surface here; see [`crate::domain::ParseError`].
#[derive(Debug)]
pub enum FeedError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// The response body is not the XML document we expected.
    Xml {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    Api { status: u16, message: String },

    /// A single-train lookup returned no such train.
    TrainNotFound(TrainId),

    /// Invalid username or password
    Unauthorized,
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Http(e) => write!(f, "HTTP error: {e}"),
            FeedError::Xml { message, body } => {
                write!(f, "XML decode error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            FeedError::Api { status, message } => write!(f, "API error {status}: {message}"),
            FeedError::TrainNotFound(id) => write!(f, "train {id} not found"),
            FeedError::Unauthorized => {
                write!(f, "unauthorized: check NJT_USERNAME and NJT_PASSWORD")
            }
        }
    }
}

impl std::error::Error for FeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FeedError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        FeedError::Http(err)
    }
}

impl FeedError {
    /// Build an [`FeedError::Xml`] keeping the start of the offending body.
    pub(crate) fn xml(err: impl std::fmt::Display, body: &[u8]) -> Self {
        FeedError::Xml {
            message: err.to_string(),
            body: Some(String::from_utf8_lossy(body).chars().take(500).collect()),
        }
    }
}
