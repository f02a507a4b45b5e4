//! Decoders for the train position feeds.
//!
//! Three endpoints describe trains: the vehicle feed lists every active
//! train, while the train map and stop list endpoints describe one train
//! each. All three are decoded into [`Train`] snapshots, filling in only the
//! fields the endpoint carries.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use chrono::TimeDelta;
use tracing::debug;

use crate::domain::{
    Direction, LineRef, Stop, Train, TrainId, parse_lat_lng, parse_or_default, parse_timestamp,
    parse_whole_number, zero_time,
};

use super::document::from_xml;
use super::error::FeedError;
use super::types::{
    RouteStop, TrainMapResponse, TrainStopsResponse, VehicleDataResponse, VehicleRecord,
};

/// Decode a `getVehicleDataXML` response into one snapshot per train.
///
/// Records whose ID contains no train number are dropped. Trains reported
/// more than once are collapsed by [`dedup_trains`].
pub fn decode_vehicle_data(body: &[u8]) -> Result<Vec<Train>, FeedError> {
    let response: VehicleDataResponse = from_xml(body)?;

    let trains = response
        .trains
        .iter()
        .filter_map(|record| match convert_vehicle(record) {
            Some(train) => Some(train),
            None => {
                debug!(raw_id = %record.id, "dropping vehicle record without a train number");
                None
            }
        })
        .collect();

    Ok(dedup_trains(trains))
}

/// Convert one vehicle record, or `None` if it has no usable train number.
fn convert_vehicle(record: &VehicleRecord) -> Option<Train> {
    let id = TrainId::normalize(&record.id).ok()?;

    let mut train = Train::new(id);
    train.line = record.line.trim().to_string();
    train.direction = Direction::from_feed(&record.direction);
    train.last_modified =
        parse_or_default("LAST_MODIFIED", &record.last_modified, parse_timestamp, zero_time);
    train.scheduled_departure = parse_or_default(
        "SCHED_DEP_TIME",
        &record.scheduled_departure,
        parse_timestamp,
        zero_time,
    );
    train.delay = parse_delay(&record.seconds_late);
    train.next_stop = record.next_stop.trim().to_string();
    train.position = parse_position(&record.latitude, &record.longitude);
    train.track_circuit = record.track_circuit.trim().to_string();

    Some(train)
}

/// Collapse snapshots sharing a train ID into the most recently modified one.
///
/// A later snapshot replaces the kept one only if its `last_modified` is
/// strictly later, so on a tie the first snapshot wins. Survivors keep the
/// order in which their IDs first appeared; input that is already unique
/// comes back unchanged.
pub fn dedup_trains(trains: Vec<Train>) -> Vec<Train> {
    let mut slots: HashMap<TrainId, usize> = HashMap::with_capacity(trains.len());
    let mut unique: Vec<Train> = Vec::with_capacity(trains.len());

    for train in trains {
        match slots.entry(train.id) {
            Entry::Vacant(slot) => {
                slot.insert(unique.len());
                unique.push(train);
            }
            Entry::Occupied(slot) => {
                let kept = &mut unique[*slot.get()];
                if kept.last_modified < train.last_modified {
                    *kept = train;
                }
            }
        }
    }

    unique
}

/// Decode a `getTrainMapXML` response for `train_id`.
///
/// The endpoint answers with a blank record for unknown trains; a record
/// with neither a direction nor a line is treated as
/// [`FeedError::TrainNotFound`].
pub fn decode_train_map(body: &[u8], train_id: TrainId) -> Result<Train, FeedError> {
    let response: TrainMapResponse = from_xml(body)?;

    let record = response
        .trains
        .first()
        .filter(|t| !t.direction.trim().is_empty() || !t.line.trim().is_empty())
        .ok_or(FeedError::TrainNotFound(train_id))?;

    let mut train = Train::new(train_id);
    train.line = record.line.trim().to_string();
    train.direction = Direction::from_feed(&record.direction);
    train.last_modified =
        parse_or_default("LAST_MODIFIED", &record.last_modified, parse_timestamp, zero_time);
    train.position = parse_position(&record.latitude, &record.longitude);
    train.track_circuit = record.track_circuit.trim().to_string();

    Ok(train)
}

/// Decode a `getTrainStopListXML` response for `train_id`.
///
/// A blank `Train_ID` means the train is unknown.
pub fn decode_train_stops(body: &[u8], train_id: TrainId) -> Result<Train, FeedError> {
    let response: TrainStopsResponse = from_xml(body)?;

    if response.id.trim().is_empty() {
        return Err(FeedError::TrainNotFound(train_id));
    }

    let mut train = Train::new(train_id);
    train.last_modified =
        parse_or_default("GPSTIME", &response.gps_time, parse_timestamp, zero_time);
    train.position = parse_position(&response.latitude, &response.longitude);
    train.stops = response.stops.stop.iter().map(convert_route_stop).collect();

    Ok(train)
}

fn convert_route_stop(raw: &RouteStop) -> Stop {
    let mut stop = Stop::new(raw.name.trim());
    stop.scheduled_time = parse_or_default("TIME", &raw.time, parse_timestamp, zero_time);
    stop.actual_departure_time =
        parse_or_default("DEP_TIME", &raw.departure_time, parse_timestamp, zero_time);
    stop.departed = is_departed(&raw.departed);
    stop.status = raw.status.trim().to_string();
    stop.lines = raw
        .lines
        .line
        .iter()
        .map(|l| LineRef {
            code: l.code.trim().to_string(),
            name: l.name.trim().to_string(),
        })
        .collect();
    stop
}

/// The feed marks departed stops with exactly `"YES"`.
pub(crate) fn is_departed(raw: &str) -> bool {
    raw == "YES"
}

/// Delay from a `SEC_LATE` field; unparseable values count as on time.
pub(crate) fn parse_delay(raw: &str) -> TimeDelta {
    let secs = parse_or_default("SEC_LATE", raw, parse_whole_number, || 0);
    TimeDelta::try_seconds(secs).unwrap_or_else(TimeDelta::zero)
}

pub(crate) fn parse_position(lat: &str, lng: &str) -> Option<crate::domain::LatLng> {
    parse_or_default("LATITUDE/LONGITUDE", lat, |lat| parse_lat_lng(lat, lng), || None)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::FEED_TZ;
    use chrono::TimeZone;
    use proptest::prelude::*;
    use std::collections::HashSet;

    /// Snapshots with small IDs (to force collisions) and second offsets.
    fn snapshots() -> impl Strategy<Value = Vec<(u32, i64)>> {
        prop::collection::vec((0u32..8, 0i64..100), 0..40)
    }

    fn build(input: &[(u32, i64)]) -> Vec<Train> {
        let base = FEED_TZ.with_ymd_and_hms(2019, 11, 18, 12, 0, 0).unwrap();
        input
            .iter()
            .enumerate()
            .map(|(i, &(id, offset))| {
                let mut train = Train::new(TrainId::new(id));
                train.last_modified = base + TimeDelta::seconds(offset);
                // Tag each snapshot so ties can be told apart.
                train.next_stop = i.to_string();
                train
            })
            .collect()
    }

    proptest! {
        /// Exactly one snapshot per distinct ID survives
        #[test]
        fn one_per_id(input in snapshots()) {
            let trains = build(&input);
            let distinct: HashSet<TrainId> = trains.iter().map(|t| t.id).collect();
            let got = dedup_trains(trains);

            prop_assert_eq!(got.len(), distinct.len());
            let got_ids: HashSet<TrainId> = got.iter().map(|t| t.id).collect();
            prop_assert_eq!(got_ids, distinct);
        }

        /// The survivor is the first snapshot with the latest timestamp
        #[test]
        fn survivor_is_first_latest(input in snapshots()) {
            let trains = build(&input);
            let got = dedup_trains(trains.clone());

            for kept in &got {
                let expected = trains
                    .iter()
                    .filter(|t| t.id == kept.id)
                    .fold(None::<&Train>, |best, t| match best {
                        Some(b) if b.last_modified >= t.last_modified => Some(b),
                        _ => Some(t),
                    })
                    .unwrap();
                prop_assert_eq!(kept, expected);
            }
        }

        /// Unique input is returned unchanged
        #[test]
        fn unique_input_unchanged(ids in prop::collection::hash_set(any::<u32>(), 0..20)) {
            let input: Vec<(u32, i64)> = ids.into_iter().map(|id| (id, 0)).collect();
            let trains = build(&input);
            prop_assert_eq!(dedup_trains(trains.clone()), trains);
        }
    }
}
