//! Caching layer for the train data feeds.
//!
//! The agency polls its own sources roughly every 30 seconds and rate-limits
//! developer accounts, so repeated requests within that window are answered
//! from memory. Entries are shared behind `Arc` so a cache hit is a pointer
//! copy.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::{Station, Train};
use crate::feed::{FeedError, NjtClient};

/// Cached vehicle snapshot.
type VehicleEntry = Arc<Vec<Train>>;

/// Cached station board.
type BoardEntry = Arc<Station>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached station boards.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(30),
            max_capacity: 500,
        }
    }
}

/// Train data client with caching.
///
/// Wraps an [`NjtClient`] and caches the vehicle snapshot and station boards.
/// Single-train lookups are not cached.
pub struct CachedNjtClient {
    client: NjtClient,
    vehicles: MokaCache<(), VehicleEntry>,
    boards: MokaCache<String, BoardEntry>,
}

impl CachedNjtClient {
    /// Create a new cached client.
    pub fn new(client: NjtClient, config: &CacheConfig) -> Self {
        let vehicles = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(1)
            .build();

        let boards = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            client,
            vehicles,
            boards,
        }
    }

    /// Get the current vehicle snapshot, using cache if available.
    pub async fn vehicle_data(&self) -> Result<VehicleEntry, FeedError> {
        if let Some(cached) = self.vehicles.get(&()).await {
            return Ok(cached);
        }

        let entry = Arc::new(self.client.vehicle_data().await?);
        self.vehicles.insert((), entry.clone()).await;

        Ok(entry)
    }

    /// Get a station board, using cache if available.
    pub async fn station_data(&self, station: &str) -> Result<BoardEntry, FeedError> {
        let key = board_key(station);

        if let Some(cached) = self.boards.get(&key).await {
            return Ok(cached);
        }

        let entry = Arc::new(self.client.station_data(&key).await?);
        self.boards.insert(key, entry.clone()).await;

        Ok(entry)
    }

    /// Access the underlying client for operations that bypass cache.
    pub fn client(&self) -> &NjtClient {
        &self.client
    }

    /// Number of cached station boards.
    pub fn board_count(&self) -> u64 {
        self.boards.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.vehicles.invalidate_all();
        self.boards.invalidate_all();
    }
}

/// Station codes are case-insensitive; normalize so `ny` and `NY` share an entry.
fn board_key(station: &str) -> String {
    station.trim().to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::NjtConfig;

    fn cached_client() -> CachedNjtClient {
        let client = NjtClient::new(NjtConfig::new("user", "pass")).unwrap();
        CachedNjtClient::new(client, &CacheConfig::default())
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(30));
        assert_eq!(config.max_capacity, 500);
    }

    #[test]
    fn board_keys_are_normalized() {
        assert_eq!(board_key("ny"), "NY");
        assert_eq!(board_key(" Se "), "SE");
    }

    #[test]
    fn cache_creation() {
        let cached = cached_client();
        assert_eq!(cached.board_count(), 0);
    }

    #[tokio::test]
    async fn cached_board_is_served_without_fetching() {
        let cached = cached_client();
        let board = Arc::new(Station::new("NY", "New York"));
        cached.boards.insert("NY".to_string(), board.clone()).await;

        // Credentials are bogus; a cache miss would fail.
        let hit = cached.station_data("ny").await.unwrap();
        assert!(Arc::ptr_eq(&hit, &board));
    }

    #[tokio::test]
    async fn cached_vehicles_are_served_without_fetching() {
        let cached = cached_client();
        let trains = Arc::new(vec![Train::new(crate::domain::TrainId::new(41))]);
        cached.vehicles.insert((), trains.clone()).await;

        let hit = cached.vehicle_data().await.unwrap();
        assert!(Arc::ptr_eq(&hit, &trains));

        cached.invalidate_cache();
        assert!(cached.vehicles.get(&()).await.is_none());
    }
}
