// Copyright (c) 2025 - Cowboy AI, Inc.
//! NATS JetStream Key-Value Event Store
//!
//! Stores each event as a JSON blob in a JetStream key-value bucket, keyed by
//! GUID. Incidents and maintenances live in separate buckets:
//!
//! ```text
//! <prefix>_incidents     guid → Incident JSON
//! <prefix>_maintenances  guid → PlannedMaintenance JSON
//! ```
//!
//! Every call is a round trip to the server; JetStream serializes writes per
//! key, so the store keeps no lock of its own. Creates and updates are both
//! conditional writes against the key's latest revision (0 for a key never
//! written, the tombstone's revision for a deleted one).

use async_nats::jetstream::{self, context::GetStreamErrorKind, kv};
use async_trait::async_trait;
use futures::TryStreamExt;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::EventStore;
use crate::errors::{EventKind, WeatherError, WeatherResult};
use crate::events::{Incident, PlannedMaintenance};

/// Connection settings for the key-value store
#[derive(Debug, Clone)]
pub struct NatsKvStoreConfig {
    /// NATS server URL
    pub nats_url: String,
    /// Bucket name prefix
    pub bucket_prefix: String,
}

impl Default for NatsKvStoreConfig {
    fn default() -> Self {
        Self {
            nats_url: "nats://localhost:4222".to_string(),
            bucket_prefix: "weather".to_string(),
        }
    }
}

impl NatsKvStoreConfig {
    pub fn incidents_bucket(&self) -> String {
        format!("{}_incidents", self.bucket_prefix)
    }

    pub fn maintenances_bucket(&self) -> String {
        format!("{}_maintenances", self.bucket_prefix)
    }
}

/// Event store backed by NATS JetStream key-value buckets
pub struct NatsKvEventStore {
    incidents: kv::Store,
    maintenances: kv::Store,
}

impl NatsKvEventStore {
    /// Connect to NATS and open (or create) both buckets
    pub async fn connect(config: &NatsKvStoreConfig) -> WeatherResult<Self> {
        let client = async_nats::connect(&config.nats_url)
            .await
            .map_err(|e| WeatherError::NatsConnection(e.to_string()))?;

        info!("Connected to NATS at {}", config.nats_url);

        let jetstream = jetstream::new(client);
        let incidents = open_bucket(&jetstream, config.incidents_bucket()).await?;
        let maintenances = open_bucket(&jetstream, config.maintenances_bucket()).await?;

        Ok(Self {
            incidents,
            maintenances,
        })
    }
}

async fn open_bucket(jetstream: &jetstream::Context, bucket: String) -> WeatherResult<kv::Store> {
    // key-value buckets are backed by a stream named KV_<bucket>
    match jetstream.get_stream(format!("KV_{}", bucket)).await {
        Ok(_) => {
            debug!(%bucket, "Using existing key-value bucket");
            jetstream
                .get_key_value(bucket.as_str())
                .await
                .map_err(|e| WeatherError::Storage(e.to_string()))
        }
        Err(e) if bucket_missing(&e.kind()) => {
            info!(%bucket, "Key-value bucket not found, creating");
            jetstream
                .create_key_value(kv::Config {
                    bucket,
                    ..Default::default()
                })
                .await
                .map_err(|e| WeatherError::Storage(e.to_string()))
        }
        Err(e) => Err(WeatherError::Storage(format!(
            "failed to open bucket {}: {}",
            bucket, e
        ))),
    }
}

/// Only a server-side "stream not found" means the bucket has to be created
fn bucket_missing(kind: &GetStreamErrorKind) -> bool {
    matches!(
        kind,
        GetStreamErrorKind::JetStream(err)
            if err.error_code() == jetstream::ErrorCode::STREAM_NOT_FOUND
    )
}

/// Revision a create must be conditional on, `None` if the key holds a live value
fn create_revision(latest: Option<(kv::Operation, u64)>) -> Option<u64> {
    match latest {
        None => Some(0),
        Some((kv::Operation::Put, _)) => None,
        Some((kv::Operation::Delete | kv::Operation::Purge, revision)) => Some(revision),
    }
}

async fn fetch<T: DeserializeOwned>(store: &kv::Store, key: &str) -> WeatherResult<Option<T>> {
    let raw = store
        .get(key)
        .await
        .map_err(|e| WeatherError::Storage(e.to_string()))?;

    match raw {
        Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        None => Ok(None),
    }
}

async fn create<T: Serialize>(
    store: &kv::Store,
    kind: EventKind,
    id: Uuid,
    value: &T,
) -> WeatherResult<()> {
    let key = id.to_string();
    let latest = store
        .entry(key.as_str())
        .await
        .map_err(|e| WeatherError::Storage(e.to_string()))?
        .map(|entry| (entry.operation, entry.revision));

    let revision = create_revision(latest).ok_or(WeatherError::AlreadyExists { kind, id })?;
    let payload = serde_json::to_vec(value)?;

    if let Err(e) = store.update(key.as_str(), payload.into(), revision).await {
        // a concurrent writer may have won the revision check
        return match store.get(key.as_str()).await {
            Ok(Some(_)) => Err(WeatherError::AlreadyExists { kind, id }),
            _ => Err(WeatherError::Storage(e.to_string())),
        };
    }

    debug!(%kind, %id, revision, "Event created");
    Ok(())
}

async fn get_one<T: DeserializeOwned>(
    store: &kv::Store,
    kind: EventKind,
    id: Uuid,
) -> WeatherResult<T> {
    fetch(store, &id.to_string())
        .await?
        .ok_or(WeatherError::NotFound { kind, id })
}

async fn get_all<T: DeserializeOwned>(store: &kv::Store) -> WeatherResult<Vec<T>> {
    let keys: Vec<String> = store
        .keys()
        .await
        .map_err(|e| WeatherError::Storage(e.to_string()))?
        .try_collect()
        .await
        .map_err(|e| WeatherError::Storage(e.to_string()))?;

    let mut values = Vec::with_capacity(keys.len());
    for key in keys {
        // a key deleted between listing and reading is skipped
        match fetch(store, &key).await? {
            Some(value) => values.push(value),
            None => warn!(%key, "Key vanished while listing events"),
        }
    }
    Ok(values)
}

async fn replace<T: Serialize>(
    store: &kv::Store,
    kind: EventKind,
    id: Uuid,
    value: &T,
) -> WeatherResult<()> {
    let key = id.to_string();
    let entry = store
        .entry(key.as_str())
        .await
        .map_err(|e| WeatherError::Storage(e.to_string()))?;

    let revision = match entry {
        Some(entry) if matches!(entry.operation, kv::Operation::Put) => entry.revision,
        _ => return Err(WeatherError::NotFound { kind, id }),
    };

    let payload = serde_json::to_vec(value)?;
    store
        .update(key.as_str(), payload.into(), revision)
        .await
        .map_err(|e| WeatherError::Storage(e.to_string()))?;

    debug!(%kind, %id, revision, "Event updated");
    Ok(())
}

async fn remove(store: &kv::Store, kind: EventKind, id: Uuid) -> WeatherResult<()> {
    let key = id.to_string();
    let exists = store
        .get(key.as_str())
        .await
        .map_err(|e| WeatherError::Storage(e.to_string()))?
        .is_some();

    if !exists {
        return Err(WeatherError::NotFound { kind, id });
    }

    store
        .delete(key.as_str())
        .await
        .map_err(|e| WeatherError::Storage(e.to_string()))?;

    debug!(%kind, %id, "Event deleted");
    Ok(())
}

#[async_trait]
impl EventStore for NatsKvEventStore {
    async fn create_incident(&self, incident: Incident) -> WeatherResult<()> {
        create(&self.incidents, EventKind::Incident, incident.base.guid, &incident).await
    }

    async fn get_incident(&self, id: Uuid) -> WeatherResult<Incident> {
        get_one(&self.incidents, EventKind::Incident, id).await
    }

    async fn get_all_incidents(&self) -> WeatherResult<Vec<Incident>> {
        get_all(&self.incidents).await
    }

    async fn update_incident(&self, incident: Incident) -> WeatherResult<()> {
        replace(&self.incidents, EventKind::Incident, incident.base.guid, &incident).await
    }

    async fn delete_incident(&self, id: Uuid) -> WeatherResult<()> {
        remove(&self.incidents, EventKind::Incident, id).await
    }

    async fn create_maintenance(&self, maintenance: PlannedMaintenance) -> WeatherResult<()> {
        create(
            &self.maintenances,
            EventKind::PlannedMaintenance,
            maintenance.base.guid,
            &maintenance,
        )
        .await
    }

    async fn get_maintenance(&self, id: Uuid) -> WeatherResult<PlannedMaintenance> {
        get_one(&self.maintenances, EventKind::PlannedMaintenance, id).await
    }

    async fn get_all_maintenances(&self) -> WeatherResult<Vec<PlannedMaintenance>> {
        get_all(&self.maintenances).await
    }

    async fn update_maintenance(&self, maintenance: PlannedMaintenance) -> WeatherResult<()> {
        replace(
            &self.maintenances,
            EventKind::PlannedMaintenance,
            maintenance.base.guid,
            &maintenance,
        )
        .await
    }

    async fn delete_maintenance(&self, id: Uuid) -> WeatherResult<()> {
        remove(&self.maintenances, EventKind::PlannedMaintenance, id).await
    }
}
