//! Domain types for NJ Transit trains and stations.
//!
//! Everything here is a plain value: decoders build these types fresh for
//! every feed and hand them to the caller. The parsers in this module
//! convert individual feed fields and are shared by all decoders.

mod departure;
mod error;
mod fallback;
mod position;
mod serde_helpers;
mod station;
mod time;
mod train;
mod train_id;

pub use departure::DepartureRow;
pub use error::ParseError;
pub use fallback::{parse_or_default, parse_whole_number};
pub use position::{LatLng, parse_lat_lng};
pub use station::{Station, StationTrain};
pub use time::{FEED_TZ, FeedTime, parse_clock_time, parse_timestamp, zero_time};
pub use train::{Direction, LineRef, Stop, Train};
pub use train_id::TrainId;
