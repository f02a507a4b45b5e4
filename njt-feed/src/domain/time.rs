//! Feed time handling.
//!
//! The agency emits unzoned local timestamps such as
//! `"28-Jul-2018 01:05:30 PM"`. Every feed is published from New Jersey, so
//! all timestamps are pinned to `America/New_York`. The legacy departure
//! page only shows a clock time (`"7:45"`) with no date at all.

use chrono::{DateTime, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use super::ParseError;

/// Timezone every feed timestamp is interpreted in.
pub const FEED_TZ: Tz = chrono_tz::America::New_York;

/// Timestamp layout used by the XML feeds.
const TIMESTAMP_FORMAT: &str = "%d-%b-%Y %I:%M:%S %p";

/// A calendar timestamp in [`FEED_TZ`].
pub type FeedTime = DateTime<Tz>;

/// The value substituted for a missing or unparseable timestamp.
///
/// This is the Unix epoch expressed in [`FEED_TZ`], so it sorts before any
/// real feed timestamp.
pub fn zero_time() -> FeedTime {
    DateTime::<Utc>::UNIX_EPOCH.with_timezone(&FEED_TZ)
}

/// Parse a feed timestamp in `DD-Mon-YYYY hh:mm:ss AM/PM` format.
///
/// During the autumn DST fold the earlier of the two instants is chosen.
/// Local times skipped by the spring-forward transition are rejected.
///
/// # Examples
///
/// ```
/// use chrono::{Datelike, Timelike};
/// use njt_feed::domain::parse_timestamp;
///
/// let ts = parse_timestamp("28-Jul-2018 12:01:07 AM").unwrap();
/// assert_eq!((ts.day(), ts.hour(), ts.minute(), ts.second()), (28, 0, 1, 7));
///
/// assert!(parse_timestamp("2018-07-28T00:01:07").is_err());
/// ```
pub fn parse_timestamp(s: &str) -> Result<FeedTime, ParseError> {
    let naive = NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT)
        .map_err(|_| ParseError::Timestamp(s.to_string()))?;

    FEED_TZ
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| ParseError::Timestamp(s.to_string()))
}

/// Parse a clock time in `h:mm` format, as shown on the departure page.
///
/// Hours are on a 12-hour dial without an AM/PM marker, so `0` through `12`
/// are accepted and taken literally.
///
/// # Examples
///
/// ```
/// use chrono::NaiveTime;
/// use njt_feed::domain::parse_clock_time;
///
/// assert_eq!(
///     parse_clock_time("7:45").unwrap(),
///     NaiveTime::from_hms_opt(7, 45, 0).unwrap()
/// );
/// assert!(parse_clock_time("13:00").is_err());
/// assert!(parse_clock_time("7.45").is_err());
/// ```
pub fn parse_clock_time(s: &str) -> Result<NaiveTime, ParseError> {
    let err = || ParseError::ClockTime(s.to_string());

    let (hour, minute) = s.split_once(':').ok_or_else(err)?;

    if hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
        return Err(err());
    }
    if !hour.bytes().chain(minute.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(err());
    }

    let hour: u32 = hour.parse().map_err(|_| err())?;
    let minute: u32 = minute.parse().map_err(|_| err())?;
    if hour > 12 {
        return Err(err());
    }

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(err)
}
