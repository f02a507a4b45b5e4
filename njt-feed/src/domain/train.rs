//! Train snapshots decoded from the vehicle feeds.

use std::fmt;

use chrono::TimeDelta;
use serde::Serialize;

use super::serde_helpers::serialize_seconds;
use super::{FeedTime, LatLng, TrainId, zero_time};

/// Direction of travel as reported by the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Direction {
    Eastbound,
    Westbound,
    /// Blank or unrecognised in the feed.
    #[default]
    #[serde(rename = "")]
    Unknown,
}

impl Direction {
    /// Interpret a raw `DIRECTION` field.
    pub fn from_feed(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("Eastbound") {
            Direction::Eastbound
        } else if raw.eq_ignore_ascii_case("Westbound") {
            Direction::Westbound
        } else {
            Direction::Unknown
        }
    }

    /// Returns the feed spelling, or `""` for [`Direction::Unknown`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Eastbound => "Eastbound",
            Direction::Westbound => "Westbound",
            Direction::Unknown => "",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rail line serving a stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineRef {
    /// Short line code, e.g. `"NE"`. Empty when the feed omits it.
    pub code: String,
    /// Display name, e.g. `"Northeast Corner"`.
    pub name: String,
}

/// A stop a train has made or will make on its route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stop {
    pub name: String,
    /// Scheduled (or estimated) arrival at the stop.
    pub scheduled_time: FeedTime,
    /// When the train actually left, if the feed reports it.
    pub actual_departure_time: FeedTime,
    /// Set only when the feed says exactly `"YES"`.
    pub departed: bool,
    pub status: String,
    pub lines: Vec<LineRef>,
}

impl Stop {
    /// A stop with only a name; times are [`zero_time`].
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scheduled_time: zero_time(),
            actual_departure_time: zero_time(),
            departed: false,
            status: String::new(),
            lines: Vec::new(),
        }
    }
}

/// One train's reported state at one poll.
///
/// Which fields are populated depends on the endpoint the snapshot came
/// from. Unset text fields are empty and unset times are [`zero_time`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Train {
    pub id: TrainId,
    pub line: String,
    pub direction: Direction,
    pub last_modified: FeedTime,
    pub scheduled_departure: FeedTime,
    /// Positive when late, negative when early.
    #[serde(rename = "delay_secs", serialize_with = "serialize_seconds")]
    pub delay: TimeDelta,
    pub next_stop: String,
    pub position: Option<LatLng>,
    /// Track circuit the train was last seen on, e.g. `"OV-7611TK"`.
    pub track_circuit: String,
    pub stops: Vec<Stop>,
}

impl Train {
    /// A snapshot carrying only an ID.
    pub fn new(id: TrainId) -> Self {
        Self {
            id,
            line: String::new(),
            direction: Direction::Unknown,
            last_modified: zero_time(),
            scheduled_departure: zero_time(),
            delay: TimeDelta::zero(),
            next_stop: String::new(),
            position: None,
            track_circuit: String::new(),
            stops: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_from_feed() {
        assert_eq!(Direction::from_feed("Eastbound"), Direction::Eastbound);
        assert_eq!(Direction::from_feed(" Westbound "), Direction::Westbound);
        assert_eq!(Direction::from_feed("WESTBOUND"), Direction::Westbound);
        assert_eq!(Direction::from_feed(""), Direction::Unknown);
        assert_eq!(Direction::from_feed("Northbound"), Direction::Unknown);
    }

    #[test]
    fn direction_display() {
        assert_eq!(Direction::Eastbound.to_string(), "Eastbound");
        assert_eq!(Direction::Unknown.to_string(), "");
    }

    #[test]
    fn direction_serializes_as_feed_spelling() {
        assert_eq!(serde_json::to_string(&Direction::Eastbound).unwrap(), "\"Eastbound\"");
        assert_eq!(serde_json::to_string(&Direction::Westbound).unwrap(), "\"Westbound\"");
        assert_eq!(serde_json::to_string(&Direction::Unknown).unwrap(), "\"\"");
    }

    #[test]
    fn new_train_is_blank() {
        let train = Train::new(TrainId::new(41));
        assert_eq!(train.id.get(), 41);
        assert_eq!(train.last_modified, zero_time());
        assert_eq!(train.delay, TimeDelta::zero());
        assert!(train.position.is_none());
        assert!(train.stops.is_empty());
    }

    #[test]
    fn serializes_delay_as_seconds() {
        let mut train = Train::new(TrainId::new(65));
        train.delay = TimeDelta::seconds(-45);
        let json = serde_json::to_value(&train).unwrap();
        assert_eq!(json["delay_secs"], -45);
        assert_eq!(json["id"], 65);
        assert_eq!(json["direction"], "");
    }
}
