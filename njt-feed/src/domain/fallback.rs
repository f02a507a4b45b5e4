//! Tolerant field parsing.
//!
//! A live departures display is more useful with a partially filled record
//! than with no record at all, so most feed fields are parsed with
//! [`parse_or_default`]: failures are logged and replaced by a default.

use tracing::debug;

use super::ParseError;

/// Parse `raw` with `parse`, substituting `default()` on failure.
///
/// `field` names the feed field in the diagnostic.
///
/// # Examples
///
/// ```
/// use njt_feed::domain::{parse_or_default, parse_timestamp, zero_time};
///
/// let ts = parse_or_default("LAST_MODIFIED", "garbage", parse_timestamp, zero_time);
/// assert_eq!(ts, zero_time());
/// ```
pub fn parse_or_default<T>(
    field: &'static str,
    raw: &str,
    parse: impl FnOnce(&str) -> Result<T, ParseError>,
    default: impl FnOnce() -> T,
) -> T {
    match parse(raw) {
        Ok(value) => value,
        Err(err) => {
            debug!(field, error = %err, "substituting default for unparseable field");
            default()
        }
    }
}

/// Parse a whole-number field such as `SEC_LATE`.
///
/// Blank values count as zero.
pub fn parse_whole_number(raw: &str) -> Result<i64, ParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse().map_err(|_| ParseError::Number(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_parsed_value() {
        let n = parse_or_default("SEC_LATE", "310", parse_whole_number, || -1);
        assert_eq!(n, 310);
    }

    #[test]
    fn substitutes_default() {
        let n = parse_or_default("SEC_LATE", "late", parse_whole_number, || -1);
        assert_eq!(n, -1);
    }

    #[test]
    fn whole_numbers() {
        assert_eq!(parse_whole_number("").unwrap(), 0);
        assert_eq!(parse_whole_number("  ").unwrap(), 0);
        assert_eq!(parse_whole_number(" 42 ").unwrap(), 42);
        assert_eq!(parse_whole_number("-60").unwrap(), -60);
        assert_eq!(
            parse_whole_number("4.5"),
            Err(ParseError::Number("4.5".into()))
        );
    }
}
