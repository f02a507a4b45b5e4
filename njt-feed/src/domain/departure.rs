//! Departure rows scraped from the legacy departure page.

use chrono::NaiveTime;
use serde::Serialize;

use super::TrainId;

/// A departure shown on the legacy HTML board.
///
/// This is a degraded [`StationTrain`](super::StationTrain): the page only
/// shows a clock time, and the destination often carries extra symbols meant
/// for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DepartureRow {
    pub train_id: Option<TrainId>,
    pub scheduled_time: Option<NaiveTime>,
    pub destination: String,
    pub track: String,
    pub line: String,
    pub status: String,
}
