//! Decoders for the station feeds.

use tracing::debug;

use crate::domain::{
    ParseError, Station, StationTrain, Stop, TrainId, parse_or_default, parse_timestamp,
    parse_whole_number, zero_time,
};
use crate::stations::attach_aliases;

use super::document::from_xml;
use super::error::FeedError;
use super::types::{ScheduleItem, ScheduleStop, StationListResponse, StationScheduleResponse};
use super::vehicle::{is_departed, parse_delay, parse_position};

/// Decode a `getTrainScheduleXML` response for one station.
///
/// Rows whose `TRAIN_ID` is not a plain number are Amtrak services sharing
/// the platform; they are skipped. The remaining departures keep the feed's
/// order and row index.
pub fn decode_station_data(body: &[u8]) -> Result<Station, FeedError> {
    let response: StationScheduleResponse = from_xml(body)?;

    let mut station = Station::new(
        response.station_code.trim(),
        response.station_name.trim(),
    );

    station.departures = response
        .items
        .item
        .iter()
        .filter_map(|item| {
            let converted = convert_schedule_item(item);
            if converted.is_none() {
                debug!(
                    station = %station.code,
                    raw_id = %item.train_id,
                    "skipping departure without a numeric train ID"
                );
            }
            converted
        })
        .collect();

    Ok(station)
}

/// Convert one schedule row, or `None` for a non-numeric (Amtrak) train ID.
fn convert_schedule_item(item: &ScheduleItem) -> Option<StationTrain> {
    let train_id: TrainId = item.train_id.trim().parse().ok()?;

    let row_index = parse_or_default("ITEM_INDEX", &item.index, parse_row_index, || 0);

    Some(StationTrain {
        row_index,
        train_id,
        line: item.line.trim().to_string(),
        line_abbrev: item.line_abbreviation.trim().to_string(),
        destination: item.destination.trim().to_string(),
        track: item.track.trim().to_string(),
        status: item.status.trim().to_string(),
        scheduled_departure: parse_or_default(
            "SCHED_DEP_DATE",
            &item.scheduled_departure,
            parse_timestamp,
            zero_time,
        ),
        delay: parse_delay(&item.seconds_late),
        position: parse_position(&item.latitude, &item.longitude),
        position_timestamp: parse_or_default("GPSTIME", &item.gps_time, parse_timestamp, zero_time),
        inline_message: item.inline_message.trim().to_string(),
        stops: item.stops.stop.iter().map(convert_schedule_stop).collect(),
    })
}

fn parse_row_index(raw: &str) -> Result<usize, ParseError> {
    let index = parse_whole_number(raw)?;
    usize::try_from(index).map_err(|_| ParseError::Number(raw.trim().to_string()))
}

fn convert_schedule_stop(raw: &ScheduleStop) -> Stop {
    let mut stop = Stop::new(raw.name.trim());
    stop.scheduled_time = parse_or_default("TIME", &raw.time, parse_timestamp, zero_time);
    stop.departed = is_departed(&raw.departed);
    stop
}

/// Decode a `getStationListXML` response.
///
/// Aliases come from the static alias table; departures are left empty.
pub fn decode_station_list(body: &[u8]) -> Result<Vec<Station>, FeedError> {
    let response: StationListResponse = from_xml(body)?;

    Ok(response
        .stations
        .iter()
        .map(|entry| {
            let mut station = Station::new(entry.code.trim(), entry.name.trim());
            attach_aliases(&mut station);
            station
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FEED_TZ, FeedTime, LatLng};
    use chrono::{TimeDelta, TimeZone};

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> FeedTime {
        FEED_TZ.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    fn schedule() -> Station {
        decode_station_data(include_bytes!("../../testdata/getTrainSchedule.xml")).unwrap()
    }

    #[test]
    fn decodes_station_header() {
        let station = schedule();
        assert_eq!(station.code, "NY");
        assert_eq!(station.name, "New York");
        assert!(station.aliases.is_empty());
    }

    #[test]
    fn skips_amtrak_rows_and_keeps_row_index() {
        let station = schedule();

        let rows: Vec<(usize, u32)> = station
            .departures
            .iter()
            .map(|d| (d.row_index, d.train_id.get()))
            .collect();
        assert_eq!(rows, vec![(0, 3843), (2, 6625)]);
    }

    #[test]
    fn decodes_departure_fields() {
        let station = schedule();
        let train = &station.departures[0];

        assert_eq!(train.line, "Northeast Corridor");
        assert_eq!(train.line_abbrev, "NEC");
        assert_eq!(train.destination, "Trenton");
        assert_eq!(train.track, "1");
        assert_eq!(train.status, "BOARDING");
        assert_eq!(train.scheduled_departure, at(2019, 11, 23, 22, 14, 0));
        assert_eq!(train.delay, TimeDelta::seconds(45));
        assert_eq!(
            train.position,
            Some(LatLng {
                lat: 40.7506,
                lng: -73.9935
            })
        );
        assert_eq!(train.position_timestamp, at(2019, 11, 23, 22, 10, 12));
        assert_eq!(train.inline_message, "Board in the rear of the train");
    }

    #[test]
    fn decodes_stops_in_order() {
        let station = schedule();
        let stops = &station.departures[0].stops;

        let names: Vec<&str> = stops.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["New York Penn Station", "Secaucus Upper Lvl", "Newark Penn Station"]
        );
        assert!(stops[0].departed);
        assert!(!stops[1].departed);
        assert!(!stops[2].departed);
        assert_eq!(stops[1].scheduled_time, at(2019, 11, 23, 22, 23, 0));
    }

    #[test]
    fn bad_fields_do_not_drop_rows() {
        let station = schedule();
        let train = &station.departures[1];

        assert_eq!(train.train_id, TrainId::new(6625));
        assert_eq!(train.track, "");
        assert_eq!(train.scheduled_departure, zero_time());
        assert_eq!(train.position, None);
        assert_eq!(train.position_timestamp, zero_time());
        assert_eq!(train.delay, TimeDelta::zero());
        assert!(train.stops.is_empty());
    }

    #[test]
    fn station_without_items() {
        let station = decode_station_data(
            b"<STATION><STATION_2CHAR>WL</STATION_2CHAR><STATIONNAME>Woodcliff Lake</STATIONNAME><ITEMS></ITEMS></STATION>",
        )
        .unwrap();
        assert_eq!(station.code, "WL");
        assert!(station.departures.is_empty());
    }

    #[test]
    fn station_list_joins_aliases() {
        let stations =
            decode_station_list(include_bytes!("../../testdata/getStationList.xml")).unwrap();

        let codes: Vec<&str> = stations.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(codes, vec!["NY", "NP", "SE", "TS", "WL", "SC"]);

        assert_eq!(stations[0].name, "New York");
        assert!(stations[0].aliases.contains("New York Penn Station"));
        assert!(stations[2].aliases.contains("Secaucus Upper Lvl"));
        assert!(stations[3].aliases.is_empty());

        let woodcliff = &stations[4];
        assert_eq!(woodcliff.name, "Woodcliff Lake");
        assert!(woodcliff.aliases.is_empty());

        assert_eq!(stations[5].name, "");
        assert!(stations.iter().all(|s| s.departures.is_empty()));
    }

    #[test]
    fn station_data_rejects_foreign_documents() {
        let err = decode_station_data(include_bytes!("../../testdata/getVehicleData.xml"))
            .unwrap_err();
        assert!(matches!(err, FeedError::Xml { .. }));

        let err = decode_station_data(
            b"<string xmlns=\"http://tempuri.org/\">Invalid credentials</string>",
        )
        .unwrap_err();
        assert!(matches!(err, FeedError::Xml { .. }));
    }

    #[test]
    fn station_list_rejects_foreign_documents() {
        let err = decode_station_list(include_bytes!("../../testdata/getTrainSchedule.xml"))
            .unwrap_err();
        assert!(matches!(err, FeedError::Xml { .. }));

        let err = decode_station_list(b"<html><body>Service Unavailable</body></html>")
            .unwrap_err();
        assert!(matches!(err, FeedError::Xml { .. }));
    }

    #[test]
    fn malformed_station_is_an_error() {
        let err = decode_station_data(b"<STATION><ITEMS></STATION>").unwrap_err();
        assert!(matches!(err, FeedError::Xml { .. }));
    }
}
