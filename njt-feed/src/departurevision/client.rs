//! HTTP client for the departure page.

use std::time::Duration;

use tracing::debug;

use crate::domain::DepartureRow;

use super::columns::map_departures;
use super::error::DepartureVisionError;
use super::extract::extract_table;

/// Default departure page for mobile browsers.
pub const DEFAULT_BASE_URL: &str = "http://dv.njtransit.com/mobile/tid-mobile.aspx";

/// The page serves a row-per-table legacy layout to unknown agents, so we
/// present as a desktop browser.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/75.0.3770.100 Safari/537.36";

/// Departure page client.
#[derive(Debug, Clone)]
pub struct DepartureVisionClient {
    http: reqwest::Client,
    base_url: String,
}

impl DepartureVisionClient {
    /// Create a client for the page at `base_url`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DepartureVisionError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Departures from a station, by two-character code.
    ///
    /// Times carry only hour and minute. Destinations are display text and
    /// may include stop markers and symbols.
    pub async fn departures(&self, station: &str) -> Result<Vec<DepartureRow>, DepartureVisionError> {
        debug!(url = %self.base_url, station, "fetching departure page");

        let response = self
            .http
            .get(&self.base_url)
            .query(&[("sid", station)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DepartureVisionError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.bytes().await?;
        let table = extract_table(&body[..])?;
        map_departures(&table).map_err(DepartureVisionError::from)
    }
}
