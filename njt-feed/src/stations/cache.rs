//! On-disk snapshot of the station list.
//!
//! The station list changes a few times a year, so a day-old copy is kept
//! as JSON next to the binary and reused across runs.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Station;

use super::aliases::attach_aliases;
use super::error::StationError;

const ONE_DAY: Duration = Duration::from_secs(24 * 60 * 60);

/// A station as written to disk. Aliases come from the static table on load.
#[derive(Debug, Serialize, Deserialize)]
struct StoredStation {
    code: String,
    name: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    written_at: DateTime<Utc>,
    stations: Vec<StoredStation>,
}

impl Snapshot {
    fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let Ok(ttl) = TimeDelta::from_std(ttl) else {
            return true;
        };
        now.signed_duration_since(self.written_at) < ttl
    }

    fn into_stations(self) -> Vec<Station> {
        self.stations
            .into_iter()
            .map(|stored| {
                let mut station = Station::new(stored.code, stored.name);
                attach_aliases(&mut station);
                station
            })
            .collect()
    }
}

/// Where the snapshot lives and how long it stays usable.
#[derive(Debug, Clone)]
pub struct StationCacheConfig {
    pub path: PathBuf,
    pub ttl: Duration,
}

impl StationCacheConfig {
    /// Snapshot at `path`, valid for one day.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ttl: ONE_DAY,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for StationCacheConfig {
    fn default() -> Self {
        Self::new("njt_stations_cache.json")
    }
}

/// Reads and writes the station list snapshot.
#[derive(Debug, Clone)]
pub struct StationCache {
    config: StationCacheConfig,
}

impl StationCache {
    pub fn new(config: StationCacheConfig) -> Self {
        Self { config }
    }

    /// Stations from the snapshot, if there is a readable one younger than
    /// the TTL.
    pub fn load(&self) -> Option<Vec<Station>> {
        self.load_at(Utc::now())
    }

    fn load_at(&self, now: DateTime<Utc>) -> Option<Vec<Station>> {
        let json = fs::read_to_string(&self.config.path).ok()?;
        let snapshot: Snapshot = serde_json::from_str(&json).ok()?;

        snapshot
            .is_fresh(now, self.config.ttl)
            .then(|| snapshot.into_stations())
    }

    /// Write a new snapshot, creating the parent directory if needed.
    pub fn save(&self, stations: &[Station]) -> Result<(), StationError> {
        self.save_at(stations, Utc::now())
    }

    fn save_at(&self, stations: &[Station], now: DateTime<Utc>) -> Result<(), StationError> {
        let snapshot = Snapshot {
            written_at: now,
            stations: stations
                .iter()
                .map(|s| StoredStation {
                    code: s.code.clone(),
                    name: s.name.clone(),
                })
                .collect(),
        };

        let path = &self.config.path;
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| cache_error("create directory", path, e))?;
        }

        let json =
            serde_json::to_string_pretty(&snapshot).map_err(|e| cache_error("encode", path, e))?;
        fs::write(path, json).map_err(|e| cache_error("write", path, e))
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }
}

fn cache_error(action: &str, path: &Path, err: impl std::fmt::Display) -> StationError {
    StationError::Cache {
        message: format!("failed to {action} {}: {err}", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn stations() -> Vec<Station> {
        vec![
            Station::new("NY", "New York"),
            Station::new("WL", "Woodcliff Lake"),
        ]
    }

    fn cache_in(dir: &Path) -> StationCache {
        StationCache::new(StationCacheConfig::new(dir.join("stations.json")))
    }

    #[test]
    fn round_trips_codes_and_names() {
        let dir = tempdir().unwrap();
        let cache = cache_in(dir.path());
        cache.save(&stations()).unwrap();

        let loaded = cache.load().unwrap();
        let pairs: Vec<(&str, &str)> = loaded
            .iter()
            .map(|s| (s.code.as_str(), s.name.as_str()))
            .collect();
        assert_eq!(pairs, vec![("NY", "New York"), ("WL", "Woodcliff Lake")]);
    }

    #[test]
    fn aliases_are_rebuilt_on_load() {
        let dir = tempdir().unwrap();
        let cache = cache_in(dir.path());
        cache.save(&stations()).unwrap();

        let loaded = cache.load().unwrap();
        assert!(loaded[0].aliases.contains("New York Penn Station"));
        assert!(loaded[1].aliases.is_empty());
    }

    #[test]
    fn snapshot_expires_after_ttl() {
        let dir = tempdir().unwrap();
        let cache = cache_in(dir.path());
        let written = Utc::now();
        cache.save_at(&stations(), written).unwrap();

        assert!(cache.load_at(written + TimeDelta::hours(23)).is_some());
        assert!(cache.load_at(written + TimeDelta::hours(24)).is_none());
    }

    #[test]
    fn zero_ttl_never_serves() {
        let dir = tempdir().unwrap();
        let config =
            StationCacheConfig::new(dir.path().join("stations.json")).with_ttl(Duration::ZERO);
        let cache = StationCache::new(config);
        cache.save(&stations()).unwrap();

        assert!(cache.load().is_none());
    }

    #[test]
    fn unreadable_snapshots_are_ignored() {
        let dir = tempdir().unwrap();
        let cache = cache_in(dir.path());
        assert!(cache.load().is_none());

        fs::write(cache.path(), "{\"written_at\": 12").unwrap();
        assert!(cache.load().is_none());
    }

    #[test]
    fn save_creates_missing_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("stations.json");
        let cache = StationCache::new(StationCacheConfig::new(&path));

        cache.save(&stations()).unwrap();
        assert!(path.is_file());
        assert_eq!(cache.path(), path.as_path());
    }

    #[test]
    fn save_reports_unwritable_path() {
        let dir = tempdir().unwrap();
        let cache = StationCache::new(StationCacheConfig::new(dir.path()));

        let err = cache.save(&stations()).unwrap_err();
        assert!(matches!(err, StationError::Cache { .. }));
    }
}
