// Copyright (c) 2025 - Cowboy AI, Inc.
//! Runtime configuration
//!
//! Loaded from environment variables:
//!
//! | Variable | Default |
//! |---|---|
//! | `WEATHER_HIERARCHY_FILE` | `hierarchy.json` |
//! | `WEATHER_STORE` | `memory` (`memory` or `nats`) |
//! | `NATS_URL` | `nats://localhost:4222` |
//! | `WEATHER_BUCKET_PREFIX` | `weather` |
//! | `WEATHER_SEED_FILE` | unset |

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

use crate::errors::{WeatherError, WeatherResult};
use crate::event_store::{EventStore, MemoryEventStore, NatsKvEventStore, NatsKvStoreConfig};

/// Which event store implementation to run against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Memory,
    Nats,
}

impl FromStr for StoreBackend {
    type Err = WeatherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "nats" => Ok(StoreBackend::Nats),
            other => Err(WeatherError::Configuration(format!(
                "unknown store backend: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Memory => write!(f, "memory"),
            StoreBackend::Nats => write!(f, "nats"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeatherConfig {
    /// Hierarchy source document
    pub hierarchy_file: PathBuf,
    pub store: StoreBackend,
    /// Only used when `store` is `Nats`
    pub nats: NatsKvStoreConfig,
    /// Events to create before computing
    pub seed_file: Option<PathBuf>,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            hierarchy_file: PathBuf::from("hierarchy.json"),
            store: StoreBackend::Memory,
            nats: NatsKvStoreConfig::default(),
            seed_file: None,
        }
    }
}

impl WeatherConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> WeatherResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> WeatherResult<Self> {
        let defaults = Self::default();

        let store = match lookup("WEATHER_STORE") {
            Some(raw) => raw.parse()?,
            None => defaults.store,
        };

        let nats = NatsKvStoreConfig {
            nats_url: lookup("NATS_URL").unwrap_or(defaults.nats.nats_url),
            bucket_prefix: lookup("WEATHER_BUCKET_PREFIX").unwrap_or(defaults.nats.bucket_prefix),
        };

        if nats.bucket_prefix.is_empty() {
            return Err(WeatherError::Configuration(
                "WEATHER_BUCKET_PREFIX must not be empty".to_string(),
            ));
        }

        Ok(Self {
            hierarchy_file: lookup("WEATHER_HIERARCHY_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.hierarchy_file),
            store,
            nats,
            seed_file: lookup("WEATHER_SEED_FILE").map(PathBuf::from),
        })
    }

    /// Open the configured event store
    pub async fn open_store(&self) -> WeatherResult<Arc<dyn EventStore>> {
        info!(backend = %self.store, "Opening event store");
        match self.store {
            StoreBackend::Memory => Ok(Arc::new(MemoryEventStore::new())),
            StoreBackend::Nats => Ok(Arc::new(NatsKvEventStore::connect(&self.nats).await?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = WeatherConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.hierarchy_file, PathBuf::from("hierarchy.json"));
        assert_eq!(config.nats.nats_url, "nats://localhost:4222");
        assert!(config.seed_file.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = WeatherConfig::from_lookup(lookup_from(&[
            ("WEATHER_STORE", "NATS"),
            ("NATS_URL", "nats://10.0.20.1:4222"),
            ("WEATHER_BUCKET_PREFIX", "status"),
            ("WEATHER_HIERARCHY_FILE", "/etc/weather/hierarchy.json"),
            ("WEATHER_SEED_FILE", "seed.json"),
        ]))
        .unwrap();

        assert_eq!(config.store, StoreBackend::Nats);
        assert_eq!(config.nats.nats_url, "nats://10.0.20.1:4222");
        assert_eq!(config.nats.incidents_bucket(), "status_incidents");
        assert_eq!(config.seed_file, Some(PathBuf::from("seed.json")));
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let err = WeatherConfig::from_lookup(lookup_from(&[("WEATHER_STORE", "s3")])).unwrap_err();
        assert!(matches!(err, WeatherError::Configuration(_)));
    }

    #[test]
    fn test_empty_bucket_prefix_is_rejected() {
        let result = WeatherConfig::from_lookup(lookup_from(&[("WEATHER_BUCKET_PREFIX", "")]));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_memory_store_opens_without_network() {
        let store = WeatherConfig::default().open_store().await.unwrap();
        assert!(store.get_all_incidents().await.unwrap().is_empty());
    }
}
