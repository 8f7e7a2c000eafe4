// Copyright (c) 2025 - Cowboy AI, Inc.
//! Seed documents for populating a store
//!
//! ```json
//! { "incidents": [ { "guid": "…", "title": "…", "criticality": 2, … } ],
//!   "maintenances": [ { "guid": "…", "title": "…", "start_planned": "…", … } ] }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use super::EventStore;
use crate::errors::WeatherResult;
use crate::events::{Incident, PlannedMaintenance};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedDocument {
    #[serde(default)]
    pub incidents: Vec<Incident>,
    #[serde(default)]
    pub maintenances: Vec<PlannedMaintenance>,
}

impl SeedDocument {
    pub fn from_json(json: &str) -> WeatherResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> WeatherResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Create every event in the store, stopping at the first failure
    pub async fn apply<S: EventStore + ?Sized>(self, store: &S) -> WeatherResult<()> {
        let incidents = self.incidents.len();
        let maintenances = self.maintenances.len();

        for incident in self.incidents {
            store.create_incident(incident).await?;
        }
        for maintenance in self.maintenances {
            store.create_maintenance(maintenance).await?;
        }

        info!(incidents, maintenances, "Seed events created");
        Ok(())
    }
}
