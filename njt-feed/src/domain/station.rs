//! Stations and their departure boards.

use std::collections::BTreeSet;

use chrono::TimeDelta;
use serde::Serialize;

use super::serde_helpers::serialize_seconds;
use super::{FeedTime, LatLng, Stop, TrainId};

/// A station and, when decoded from a schedule feed, its upcoming trains.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    /// Two-character station code, e.g. `"NY"`. Identifies the station.
    pub code: String,
    pub name: String,
    /// Other names the station goes by on different endpoints.
    pub aliases: BTreeSet<String>,
    /// Upcoming trains in feed order.
    pub departures: Vec<StationTrain>,
}

impl Station {
    /// A station with no aliases or departures.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            aliases: BTreeSet::new(),
            departures: Vec::new(),
        }
    }
}

/// A train scheduled to depart from a station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationTrain {
    /// Position of the row in the feed, kept for traceability.
    pub row_index: usize,
    pub train_id: TrainId,
    pub line: String,
    pub line_abbrev: String,
    pub destination: String,
    /// Track number or letter; empty until the track is posted.
    pub track: String,
    pub status: String,
    pub scheduled_departure: FeedTime,
    #[serde(rename = "delay_secs", serialize_with = "serialize_seconds")]
    pub delay: TimeDelta,
    pub position: Option<LatLng>,
    /// When `position` was measured.
    pub position_timestamp: FeedTime,
    /// Free-text message shown alongside the train at this station.
    pub inline_message: String,
    pub stops: Vec<Stop>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_station_is_empty() {
        let station = Station::new("NY", "New York");
        assert_eq!(station.code, "NY");
        assert_eq!(station.name, "New York");
        assert!(station.aliases.is_empty());
        assert!(station.departures.is_empty());
    }
}
