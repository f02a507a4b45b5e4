//! NJ Transit train data feeds.
//!
//! This module decodes the XML documents served by the agency's train data
//! web service, and provides an HTTP client for fetching them.
//!
//! Key characteristics of the feeds:
//! - Blank fields are sent instead of omitted; "no GPS fix" is a single space
//! - Timestamps are unzoned Eastern local time (`28-Jul-2018 01:05:30 PM`)
//! - Train numbers may carry Amtrak suffixes or stray punctuation
//! - The vehicle feed can report the same train more than once per poll
//!
//! The decoders are pure functions of the response body and can be used
//! without the client.

mod client;
mod document;
mod error;
mod station;
mod types;
mod vehicle;

pub use client::{NjtClient, NjtConfig};
pub use error::FeedError;
pub use station::{decode_station_data, decode_station_list};
pub use types::{
    ScheduleItem, StationListEntry, StationScheduleResponse, TrainMapRecord, TrainStopsResponse,
    VehicleDataResponse, VehicleRecord,
};
pub use vehicle::{decode_train_map, decode_train_stops, decode_vehicle_data, dedup_trains};
