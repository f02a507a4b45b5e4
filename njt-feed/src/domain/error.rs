//! Field-level parse errors.
//!
//! These errors describe a single unparseable value inside an otherwise
//! well-formed feed. Decoders almost never propagate them: a bad timestamp
//! or coordinate degrades to a default, and a bad train number drops only
//! the record it belongs to.

/// A single feed value could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Not a `DD-Mon-YYYY hh:mm:ss AM/PM` timestamp, or a local time that
    /// does not exist in the feed's timezone.
    #[error("invalid timestamp: {0:?}")]
    Timestamp(String),

    /// Not an `h:mm` clock time.
    #[error("invalid clock time: {0:?}")]
    ClockTime(String),

    /// A latitude or longitude that is neither blank nor a number.
    #[error("invalid coordinate: {0:?}")]
    Coordinate(String),

    /// No usable train number in the identifier.
    #[error("invalid train ID: {0:?}")]
    TrainId(String),

    /// A whole-number field (delay seconds, row index) that is not a number.
    #[error("invalid number: {0:?}")]
    Number(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ParseError::Timestamp("yesterday".into());
        assert_eq!(err.to_string(), "invalid timestamp: \"yesterday\"");

        let err = ParseError::TrainId("AMTK".into());
        assert_eq!(err.to_string(), "invalid train ID: \"AMTK\"");

        let err = ParseError::Coordinate("north".into());
        assert_eq!(err.to_string(), "invalid coordinate: \"north\"");
    }
}
