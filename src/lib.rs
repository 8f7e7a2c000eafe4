//! Service weather for the Composable Information Machine
//!
//! Computes the live health status of platforms, instances and components
//! from curated incidents and planned maintenances, rolling the worst case
//! up the ownership hierarchy into per-node and whole-system summaries.

pub mod config;
pub mod errors;
pub mod event_store;
pub mod events;
pub mod hierarchy;
pub mod lifecycle;
pub mod weather;

// Re-export commonly used types
pub use config::{StoreBackend, WeatherConfig};
pub use errors::{EventKind, WeatherError, WeatherResult};
pub use event_store::{EventStore, MemoryEventStore, NatsKvEventStore};
pub use events::{
    ComponentPath, Criticality, Event, EventRecord, EventStatus, EventType, Incident,
    PlannedMaintenance,
};
pub use hierarchy::{Hierarchy, HierarchyConfig};
pub use lifecycle::EventLifecycle;
pub use weather::{ActiveEvent, ServiceWeather, WeatherEngine, WeatherSummary};
