//! Station lookup by code.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::domain::Station;
use crate::feed::NjtClient;

use super::cache::StationCache;
use super::error::StationError;

/// Thread-safe station directory.
///
/// Maps two-character station codes to stations (with aliases attached),
/// backed by an optional disk cache so the list is not fetched on every
/// start.
#[derive(Clone)]
pub struct StationDirectory {
    inner: Arc<RwLock<HashMap<String, Station>>>,
    client: NjtClient,
    cache: Option<StationCache>,
}

impl StationDirectory {
    /// Load the directory, preferring a fresh disk cache over the API.
    ///
    /// A failure to write the cache is logged and otherwise ignored.
    pub async fn load(client: NjtClient, cache: Option<StationCache>) -> Result<Self, StationError> {
        if let Some(stations) = cache.as_ref().and_then(StationCache::load) {
            info!(count = stations.len(), "loaded stations from cache");
            return Ok(Self {
                inner: Arc::new(RwLock::new(build_map(stations))),
                client,
                cache,
            });
        }

        let directory = Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            client,
            cache,
        };
        directory.refresh().await?;
        Ok(directory)
    }

    /// Look up a station by code (case-insensitive).
    pub async fn get(&self, code: &str) -> Option<Station> {
        let guard = self.inner.read().await;
        guard.get(&normalize_code(code)).cloned()
    }

    /// All stations, ordered by code.
    pub async fn all(&self) -> Vec<Station> {
        let guard = self.inner.read().await;
        let mut stations: Vec<Station> = guard.values().cloned().collect();
        stations.sort_by(|a, b| a.code.cmp(&b.code));
        stations
    }

    /// Get the number of stations in the directory.
    pub async fn len(&self) -> usize {
        let guard = self.inner.read().await;
        guard.len()
    }

    /// Check if the directory is empty.
    pub async fn is_empty(&self) -> bool {
        let guard = self.inner.read().await;
        guard.is_empty()
    }

    /// Refresh the station list from the API.
    ///
    /// On success, replaces the current mapping and rewrites the cache. On
    /// failure, the existing mapping is preserved and the error is returned.
    pub async fn refresh(&self) -> Result<usize, StationError> {
        let stations = self.client.station_list().await?;

        if let Some(cache) = &self.cache
            && let Err(e) = cache.save(&stations)
        {
            warn!(path = %cache.path().display(), error = %e, "failed to write station cache");
        }

        let map = build_map(stations);
        let count = map.len();

        let mut guard = self.inner.write().await;
        *guard = map;

        info!(count, "refreshed station directory");
        Ok(count)
    }
}

fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Build the code → station map, dropping entries without a code.
fn build_map(stations: Vec<Station>) -> HashMap<String, Station> {
    stations
        .into_iter()
        .filter_map(|s| {
            let code = normalize_code(&s.code);
            (!code.is_empty()).then_some((code, s))
        })
        .collect()
}
