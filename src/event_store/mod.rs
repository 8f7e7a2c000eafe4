// Copyright (c) 2025 - Cowboy AI, Inc.
//! Event Store Abstraction
//!
//! Storage contract for incidents and planned maintenances. The weather
//! engine only consumes the read side; the write side serves whoever curates
//! the events.
//!
//! # Contract
//!
//! ```text
//! create_incident(Incident)  → AlreadyExists if the GUID is taken
//! get_incident(guid)         → NotFound if absent
//! get_all_incidents()
//! update_incident(Incident)  → NotFound if absent (full replacement)
//! delete_incident(guid)      → NotFound if absent
//! -- mirrored for PlannedMaintenance
//! ```
//!
//! # Consistency
//!
//! Implementations guard their own state. Reading all incidents and then all
//! maintenances is two independent reads, not one snapshot.
//!
//! # Example
//!
//! ```rust,no_run
//! use cim_weather::event_store::{EventStore, MemoryEventStore};
//! use cim_weather::events::{Criticality, Incident};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = MemoryEventStore::new();
//!     let incident = Incident::new("API errors", Criticality::PartialOutage);
//!     store.create_incident(incident.clone()).await?;
//!
//!     let all = store.get_all_incidents().await?;
//!     assert_eq!(all.len(), 1);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::WeatherResult;
use crate::events::{Incident, PlannedMaintenance};

pub mod memory;
pub mod nats;
pub mod seed;

pub use memory::MemoryEventStore;
pub use nats::{NatsKvEventStore, NatsKvStoreConfig};
pub use seed::SeedDocument;

/// CRUD storage for both event variants
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Store a new incident
    ///
    /// # Errors
    /// - `AlreadyExists` if an incident with the same GUID is stored
    async fn create_incident(&self, incident: Incident) -> WeatherResult<()>;

    /// Fetch one incident by GUID
    async fn get_incident(&self, id: Uuid) -> WeatherResult<Incident>;

    /// Fetch every stored incident, in no particular order
    async fn get_all_incidents(&self) -> WeatherResult<Vec<Incident>>;

    /// Replace a stored incident wholesale
    async fn update_incident(&self, incident: Incident) -> WeatherResult<()>;

    async fn delete_incident(&self, id: Uuid) -> WeatherResult<()>;

    /// Store a new planned maintenance
    ///
    /// # Errors
    /// - `AlreadyExists` if a maintenance with the same GUID is stored
    async fn create_maintenance(&self, maintenance: PlannedMaintenance) -> WeatherResult<()>;

    async fn get_maintenance(&self, id: Uuid) -> WeatherResult<PlannedMaintenance>;

    /// Fetch every stored maintenance, in no particular order
    async fn get_all_maintenances(&self) -> WeatherResult<Vec<PlannedMaintenance>>;

    /// Replace a stored maintenance wholesale
    async fn update_maintenance(&self, maintenance: PlannedMaintenance) -> WeatherResult<()>;

    async fn delete_maintenance(&self, id: Uuid) -> WeatherResult<()>;
}
