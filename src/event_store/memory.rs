// Copyright (c) 2025 - Cowboy AI, Inc.
//! In-memory event store
//!
//! Two maps keyed by GUID, each behind a read-write lock. Suitable for tests,
//! demos and single-process deployments where events need not survive a
//! restart.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::EventStore;
use crate::errors::{EventKind, WeatherError, WeatherResult};
use crate::events::{Incident, PlannedMaintenance};

#[derive(Debug, Default)]
pub struct MemoryEventStore {
    incidents: RwLock<HashMap<Uuid, Incident>>,
    maintenances: RwLock<HashMap<Uuid, PlannedMaintenance>>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }
}

async fn insert_new<T>(
    map: &RwLock<HashMap<Uuid, T>>,
    kind: EventKind,
    id: Uuid,
    value: T,
) -> WeatherResult<()> {
    let mut map = map.write().await;
    if map.contains_key(&id) {
        return Err(WeatherError::AlreadyExists { kind, id });
    }
    map.insert(id, value);
    debug!(%kind, %id, "Event created");
    Ok(())
}

async fn get_one<T: Clone>(
    map: &RwLock<HashMap<Uuid, T>>,
    kind: EventKind,
    id: Uuid,
) -> WeatherResult<T> {
    map.read()
        .await
        .get(&id)
        .cloned()
        .ok_or(WeatherError::NotFound { kind, id })
}

async fn replace<T>(
    map: &RwLock<HashMap<Uuid, T>>,
    kind: EventKind,
    id: Uuid,
    value: T,
) -> WeatherResult<()> {
    let mut map = map.write().await;
    match map.get_mut(&id) {
        Some(slot) => {
            *slot = value;
            debug!(%kind, %id, "Event updated");
            Ok(())
        }
        None => Err(WeatherError::NotFound { kind, id }),
    }
}

async fn remove<T>(
    map: &RwLock<HashMap<Uuid, T>>,
    kind: EventKind,
    id: Uuid,
) -> WeatherResult<()> {
    match map.write().await.remove(&id) {
        Some(_) => {
            debug!(%kind, %id, "Event deleted");
            Ok(())
        }
        None => Err(WeatherError::NotFound { kind, id }),
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn create_incident(&self, incident: Incident) -> WeatherResult<()> {
        let id = incident.base.guid;
        insert_new(&self.incidents, EventKind::Incident, id, incident).await
    }

    async fn get_incident(&self, id: Uuid) -> WeatherResult<Incident> {
        get_one(&self.incidents, EventKind::Incident, id).await
    }

    async fn get_all_incidents(&self) -> WeatherResult<Vec<Incident>> {
        Ok(self.incidents.read().await.values().cloned().collect())
    }

    async fn update_incident(&self, incident: Incident) -> WeatherResult<()> {
        let id = incident.base.guid;
        replace(&self.incidents, EventKind::Incident, id, incident).await
    }

    async fn delete_incident(&self, id: Uuid) -> WeatherResult<()> {
        remove(&self.incidents, EventKind::Incident, id).await
    }

    async fn create_maintenance(&self, maintenance: PlannedMaintenance) -> WeatherResult<()> {
        let id = maintenance.base.guid;
        insert_new(&self.maintenances, EventKind::PlannedMaintenance, id, maintenance).await
    }

    async fn get_maintenance(&self, id: Uuid) -> WeatherResult<PlannedMaintenance> {
        get_one(&self.maintenances, EventKind::PlannedMaintenance, id).await
    }

    async fn get_all_maintenances(&self) -> WeatherResult<Vec<PlannedMaintenance>> {
        Ok(self.maintenances.read().await.values().cloned().collect())
    }

    async fn update_maintenance(&self, maintenance: PlannedMaintenance) -> WeatherResult<()> {
        let id = maintenance.base.guid;
        replace(&self.maintenances, EventKind::PlannedMaintenance, id, maintenance).await
    }

    async fn delete_maintenance(&self, id: Uuid) -> WeatherResult<()> {
        remove(&self.maintenances, EventKind::PlannedMaintenance, id).await
    }
}
