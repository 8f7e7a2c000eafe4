// Copyright (c) 2025 - Cowboy AI, Inc.
//! Weather Events
//!
//! Curated records that affect the weather of hierarchy components. There are
//! two variants sharing a common base record:
//!
//! ```text
//! EventBase { guid, title, content, extra_fields, components,
//!             start_effective?, end_effective? }
//!   ├── Incident            + { perpetual, criticality }
//!   └── PlannedMaintenance  + { start_planned, end_planned, cancelled }
//! ```
//!
//! Events are created with a fresh random GUID, replaced wholesale on update
//! and deleted by GUID. An event listing no components is valid; it simply
//! contributes to no hierarchy node.
//!
//! # Module Organization
//!
//! - [`criticality`] - Severity scale, lifecycle status and event type
//! - [`incident`] - Firing incidents and known issues
//! - [`maintenance`] - Planned maintenance windows

pub mod criticality;
pub mod incident;
pub mod maintenance;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::errors::EventKind;
pub use crate::hierarchy::ComponentPath;

pub use criticality::{criticality_label, Criticality, EventStatus, EventType};
pub use incident::Incident;
pub use maintenance::PlannedMaintenance;

/// Generate a new event identifier
///
/// 128 random bits carrying the version-4 and variant bit patterns, rendered
/// as the 36-character `8-4-4-4-12` hex form when serialized.
pub fn new_guid() -> Uuid {
    Uuid::new_v4()
}

/// Fields shared by every event variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventBase {
    pub guid: Uuid,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub extra_fields: HashMap<String, String>,
    /// Weak references to affected components
    #[serde(default)]
    pub components: Vec<ComponentPath>,
    #[serde(default)]
    pub start_effective: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_effective: Option<DateTime<Utc>>,
}

impl EventBase {
    /// Create a base record with a freshly generated GUID
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            guid: new_guid(),
            title: title.into(),
            content: String::new(),
            extra_fields: HashMap::new(),
            components: Vec::new(),
            start_effective: None,
            end_effective: None,
        }
    }

    /// True when neither effective timestamp is set
    pub fn is_untimed(&self) -> bool {
        self.start_effective.is_none() && self.end_effective.is_none()
    }
}

/// Access to the shared base record, with builder helpers
pub trait EventRecord: Sized {
    fn base(&self) -> &EventBase;

    fn base_mut(&mut self) -> &mut EventBase;

    fn guid(&self) -> Uuid {
        self.base().guid
    }

    fn with_guid(mut self, guid: Uuid) -> Self {
        self.base_mut().guid = guid;
        self
    }

    fn with_content(mut self, content: impl Into<String>) -> Self {
        self.base_mut().content = content.into();
        self
    }

    fn with_extra_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.base_mut().extra_fields.insert(key.into(), value.into());
        self
    }

    fn with_component(mut self, path: ComponentPath) -> Self {
        self.base_mut().components.push(path);
        self
    }

    fn with_start_effective(mut self, start: DateTime<Utc>) -> Self {
        self.base_mut().start_effective = Some(start);
        self
    }

    fn with_end_effective(mut self, end: DateTime<Utc>) -> Self {
        self.base_mut().end_effective = Some(end);
        self
    }
}

/// Either event variant, switched on explicitly by the aggregation engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Incident(Incident),
    PlannedMaintenance(PlannedMaintenance),
}

impl Event {
    pub fn base(&self) -> &EventBase {
        match self {
            Event::Incident(incident) => &incident.base,
            Event::PlannedMaintenance(maintenance) => &maintenance.base,
        }
    }

    pub fn guid(&self) -> Uuid {
        self.base().guid
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Event::Incident(_) => EventKind::Incident,
            Event::PlannedMaintenance(_) => EventKind::PlannedMaintenance,
        }
    }
}

impl From<Incident> for Event {
    fn from(incident: Incident) -> Self {
        Event::Incident(incident)
    }
}

impl From<PlannedMaintenance> for Event {
    fn from(maintenance: PlannedMaintenance) -> Self {
        Event::PlannedMaintenance(maintenance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guid_is_random_v4() {
        let a = new_guid();
        let b = new_guid();

        assert_ne!(a, b);
        assert_eq!(a.get_version_num(), 4);
        assert_eq!(a.to_string().len(), 36);
        assert_eq!(a.to_string().matches('-').count(), 4);
    }

    #[test]
    fn test_builder_helpers_fill_base() {
        let path = ComponentPath::new("core", "eu-west", "api");
        let incident = Incident::new("Elevated latency", Criticality::Degraded)
            .with_content("p99 above budget")
            .with_extra_field("ticket", "OPS-42")
            .with_component(path.clone());

        assert_eq!(incident.base.content, "p99 above budget");
        assert_eq!(incident.base.extra_fields.get("ticket").map(String::as_str), Some("OPS-42"));
        assert_eq!(incident.base.components, vec![path]);
        assert!(incident.base.is_untimed());
    }

    #[test]
    fn test_event_wraps_both_variants() {
        let incident = Incident::new("Outage", Criticality::MajorOutage);
        let guid = incident.guid();
        let event = Event::from(incident);

        assert_eq!(event.guid(), guid);
        assert_eq!(event.kind(), EventKind::Incident);
        assert_eq!(event.base().title, "Outage");
    }
}
