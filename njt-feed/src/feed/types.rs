//! NJ Transit XML response DTOs.
//!
//! These types map directly onto the XML documents returned by the train
//! data web service. Every leaf is a `String`, even where the value is
//! numeric: the service has changed field types over time and leaves fields
//! blank instead of omitting them, so all interpretation happens in the
//! decoders where a bad value can be handled per field.

use serde::Deserialize;

/// `getVehicleDataXML` response: the `<TRAINS>` document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleDataResponse {
    #[serde(rename = "TRAIN", default)]
    pub trains: Vec<VehicleRecord>,
}

/// One `<TRAIN>` in the vehicle feed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VehicleRecord {
    /// Train number, possibly decorated (`"3874a"`, `".41."`).
    #[serde(rename = "ID")]
    pub id: String,

    #[serde(rename = "TRAIN_LINE")]
    pub line: String,

    #[serde(rename = "DIRECTION")]
    pub direction: String,

    #[serde(rename = "LAST_MODIFIED")]
    pub last_modified: String,

    #[serde(rename = "SCHED_DEP_TIME")]
    pub scheduled_departure: String,

    /// Delay in whole seconds.
    #[serde(rename = "SEC_LATE")]
    pub seconds_late: String,

    #[serde(rename = "NEXT_STOP")]
    pub next_stop: String,

    #[serde(rename = "LONGITUDE")]
    pub longitude: String,

    #[serde(rename = "LATITUDE")]
    pub latitude: String,

    #[serde(rename = "ICS_TRACK_CKT")]
    pub track_circuit: String,
}

/// `getTrainMapXML` response: the `<Trains>` document.
///
/// The service always returns one `<Train>`, even for unknown train numbers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrainMapResponse {
    #[serde(rename = "Train", default)]
    pub trains: Vec<TrainMapRecord>,
}

/// One `<Train>` in the train map feed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TrainMapRecord {
    #[serde(rename = "Train_ID")]
    pub id: String,

    #[serde(rename = "TrainLine")]
    pub line: String,

    #[serde(rename = "DIRECTION")]
    pub direction: String,

    #[serde(rename = "LAST_MODIFIED")]
    pub last_modified: String,

    #[serde(rename = "longitude")]
    pub longitude: String,

    #[serde(rename = "latitude")]
    pub latitude: String,

    #[serde(rename = "TrackCKT")]
    pub track_circuit: String,
}

/// `getTrainStopListXML` response: the `<Train>` document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TrainStopsResponse {
    /// Blank when the train is unknown.
    #[serde(rename = "Train_ID")]
    pub id: String,

    #[serde(rename = "DESTINATION")]
    pub destination: String,

    #[serde(rename = "GPSTIME")]
    pub gps_time: String,

    #[serde(rename = "GPSLONGITUDE")]
    pub longitude: String,

    #[serde(rename = "GPSLATITUDE")]
    pub latitude: String,

    #[serde(rename = "STOPS")]
    pub stops: RouteStops,
}

/// `<STOPS>` wrapper in the stop list feed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteStops {
    #[serde(rename = "STOP", default)]
    pub stop: Vec<RouteStop>,
}

/// A stop in the stop list feed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RouteStop {
    #[serde(rename = "NAME")]
    pub name: String,

    #[serde(rename = "STATION_2CHAR")]
    pub station_code: String,

    #[serde(rename = "TIME")]
    pub time: String,

    /// `"YES"` once the train has left.
    #[serde(rename = "DEPARTED")]
    pub departed: String,

    #[serde(rename = "STOP_STATUS")]
    pub status: String,

    #[serde(rename = "DEP_TIME")]
    pub departure_time: String,

    #[serde(rename = "STOP_LINES")]
    pub lines: StopLines,
}

/// `<STOP_LINES>` wrapper.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StopLines {
    #[serde(rename = "STOP_LINE", default)]
    pub line: Vec<StopLine>,
}

/// A line serving a stop.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StopLine {
    #[serde(rename = "LINE_CODE")]
    pub code: String,

    #[serde(rename = "LINE_NAME")]
    pub name: String,
}

/// `getTrainScheduleXML` response: the `<STATION>` document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StationScheduleResponse {
    #[serde(rename = "STATION_2CHAR")]
    pub station_code: String,

    #[serde(rename = "STATIONNAME")]
    pub station_name: String,

    #[serde(rename = "ITEMS")]
    pub items: ScheduleItems,
}

/// `<ITEMS>` wrapper in the station schedule.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleItems {
    #[serde(rename = "ITEM", default)]
    pub item: Vec<ScheduleItem>,
}

/// One departure row in the station schedule.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScheduleItem {
    #[serde(rename = "ITEM_INDEX")]
    pub index: String,

    #[serde(rename = "SCHED_DEP_DATE")]
    pub scheduled_departure: String,

    #[serde(rename = "DESTINATION")]
    pub destination: String,

    #[serde(rename = "TRACK")]
    pub track: String,

    #[serde(rename = "LINE")]
    pub line: String,

    /// Plain train number, or an Amtrak code such as `"A123"`.
    #[serde(rename = "TRAIN_ID")]
    pub train_id: String,

    #[serde(rename = "CONNECTING_TRAIN_ID")]
    pub connecting_train_id: String,

    #[serde(rename = "STATUS")]
    pub status: String,

    #[serde(rename = "SEC_LATE")]
    pub seconds_late: String,

    #[serde(rename = "LAST_MODIFIED")]
    pub last_modified: String,

    #[serde(rename = "GPSTIME")]
    pub gps_time: String,

    #[serde(rename = "LINEABBREVIATION")]
    pub line_abbreviation: String,

    #[serde(rename = "INLINEMSG")]
    pub inline_message: String,

    #[serde(rename = "GPSLONGITUDE")]
    pub longitude: String,

    #[serde(rename = "GPSLATITUDE")]
    pub latitude: String,

    #[serde(rename = "STOPS")]
    pub stops: ScheduleStops,
}

/// `<STOPS>` wrapper in a schedule item.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleStops {
    #[serde(rename = "STOP", default)]
    pub stop: Vec<ScheduleStop>,
}

/// A stop in a schedule item.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScheduleStop {
    #[serde(rename = "NAME")]
    pub name: String,

    #[serde(rename = "TIME")]
    pub time: String,

    #[serde(rename = "DEPARTED")]
    pub departed: String,
}

/// `getStationListXML` response: the `<STATIONS>` document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StationListResponse {
    #[serde(rename = "STATION", default)]
    pub stations: Vec<StationListEntry>,
}

/// One station in the station list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StationListEntry {
    #[serde(rename = "STATIONNAME")]
    pub name: String,

    #[serde(rename = "STATION_2CHAR")]
    pub code: String,
}
