//! NJ Transit train data HTTP client.
//!
//! A thin transport over the XML web service: each method fetches one
//! endpoint and hands the body to the matching decoder. Requests can be
//! cancelled by dropping the returned future.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{Station, Train, TrainId};

use super::error::FeedError;
use super::station::{decode_station_data, decode_station_list};
use super::vehicle::{decode_train_map, decode_train_stops, decode_vehicle_data};

/// Default base URL for the train data web service.
const DEFAULT_BASE_URL: &str = "http://traindata.njtransit.com:8092/NJTTrainData.asmx/";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

const VEHICLE_DATA_ENDPOINT: &str = "getVehicleDataXML";
const TRAIN_MAP_ENDPOINT: &str = "getTrainMapXML";
const TRAIN_STOPS_ENDPOINT: &str = "getTrainStopListXML";
const STATION_DATA_ENDPOINT: &str = "getTrainScheduleXML";
const STATION_LIST_ENDPOINT: &str = "getStationListXML";

/// Configuration for the train data client.
#[derive(Debug, Clone)]
pub struct NjtConfig {
    /// Username issued with the developer account
    pub username: String,
    /// Password issued with the developer account
    pub password: String,
    /// Base URL for the API; endpoint names are appended to it
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl NjtConfig {
    /// Create a new config with the given credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for the test environment or a local mock).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Train data API client.
///
/// Uses a semaphore to limit concurrent requests.
#[derive(Debug, Clone)]
pub struct NjtClient {
    http: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
    semaphore: Arc<Semaphore>,
}

impl NjtClient {
    /// Create a new client with the given configuration.
    pub fn new(config: NjtConfig) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            username: config.username,
            password: config.password,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Latest snapshot of every active train, one per train number.
    pub async fn vehicle_data(&self) -> Result<Vec<Train>, FeedError> {
        let body = self.fetch(VEHICLE_DATA_ENDPOINT, &[]).await?;
        decode_vehicle_data(&body)
    }

    /// Line, direction, position and track circuit for one train.
    pub async fn train_map(&self, train_id: TrainId) -> Result<Train, FeedError> {
        let body = self
            .fetch(
                TRAIN_MAP_ENDPOINT,
                &[("trainID", train_id.to_string()), ("station", "-".to_string())],
            )
            .await?;
        decode_train_map(&body, train_id)
    }

    /// Position and full stop list for one train.
    pub async fn train_stops(&self, train_id: TrainId) -> Result<Train, FeedError> {
        let body = self
            .fetch(TRAIN_STOPS_ENDPOINT, &[("trainID", train_id.to_string())])
            .await?;
        decode_train_stops(&body, train_id)
    }

    /// Upcoming departures from a station, by two-character code.
    pub async fn station_data(&self, station: &str) -> Result<Station, FeedError> {
        let body = self
            .fetch(STATION_DATA_ENDPOINT, &[("station", station.to_string())])
            .await?;
        decode_station_data(&body)
    }

    /// Every station the service knows about.
    pub async fn station_list(&self) -> Result<Vec<Station>, FeedError> {
        let body = self.fetch(STATION_LIST_ENDPOINT, &[]).await?;
        decode_station_list(&body)
    }

    /// Fetch the raw body of an endpoint.
    async fn fetch(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Vec<u8>, FeedError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| FeedError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = endpoint_url(&self.base_url, endpoint);
        debug!(%url, "fetching feed");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("username", self.username.as_str()),
                ("password", self.password.as_str()),
            ])
            .query(params)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(FeedError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Append an endpoint name to the base URL.
fn endpoint_url(base_url: &str, endpoint: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = NjtConfig::new("user", "pa$$word");
        assert_eq!(config.username, "user");
        assert_eq!(config.password, "pa$$word");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_concurrent, DEFAULT_MAX_CONCURRENT);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_builders() {
        let config = NjtConfig::new("user", "pass")
            .with_base_url("http://localhost:8090/njttraindata.asmx/")
            .with_max_concurrent(2)
            .with_timeout(5);
        assert_eq!(config.base_url, "http://localhost:8090/njttraindata.asmx/");
        assert_eq!(config.max_concurrent, 2);
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn endpoint_urls() {
        assert_eq!(
            endpoint_url("http://host/NJTTrainData.asmx/", "getVehicleDataXML"),
            "http://host/NJTTrainData.asmx/getVehicleDataXML"
        );
        assert_eq!(
            endpoint_url("http://host/NJTTrainData.asmx", "getStationListXML"),
            "http://host/NJTTrainData.asmx/getStationListXML"
        );
    }

    #[test]
    fn client_creation() {
        assert!(NjtClient::new(NjtConfig::new("user", "pass")).is_ok());
    }
}
