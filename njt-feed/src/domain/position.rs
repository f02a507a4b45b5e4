//! Train positions.

use serde::Serialize;

use super::ParseError;

/// A latitude/longitude pair in decimal degrees.
///
/// Values are passed through exactly as the feed reports them; no range
/// checking is done.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Parse a latitude/longitude pair from feed strings.
///
/// The feed reports "no GPS fix" by leaving both fields blank, often as a
/// single space. That yields `Ok(None)`. A half-blank pair, or any value that
/// is not a number, is a [`ParseError`]; decoders treat that as `None` too.
///
/// # Examples
///
/// ```
/// use njt_feed::domain::{LatLng, parse_lat_lng};
///
/// assert_eq!(parse_lat_lng(" ", " ").unwrap(), None);
/// assert_eq!(
///     parse_lat_lng("40.7706", "-74.0403").unwrap(),
///     Some(LatLng { lat: 40.7706, lng: -74.0403 })
/// );
/// assert!(parse_lat_lng("40.7706", "").is_err());
/// ```
pub fn parse_lat_lng(lat: &str, lng: &str) -> Result<Option<LatLng>, ParseError> {
    let (lat, lng) = (lat.trim(), lng.trim());
    if lat.is_empty() && lng.is_empty() {
        return Ok(None);
    }

    Ok(Some(LatLng {
        lat: parse_degrees(lat)?,
        lng: parse_degrees(lng)?,
    }))
}

fn parse_degrees(s: &str) -> Result<f64, ParseError> {
    s.parse()
        .map_err(|_| ParseError::Coordinate(s.to_string()))
}
