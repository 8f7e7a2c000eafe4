// Copyright (c) 2025 - Cowboy AI, Inc.
//! Weather report types
//!
//! Computed per request and never persisted. Serialized shape of one node:
//!
//! ```json
//! { "platform": "Core", "platform_code": "core",
//!   "instance": "EU West", "instance_code": "eu-west",
//!   "status": 3, "status_label": "major_outage",
//!   "active_events": [ { "guid": "…", "type": "firing_incident",
//!                        "title": "…", "status": "ongoing", "criticality": 3 } ],
//!   "last_updated": "2026-01-19T12:00:00Z" }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

use crate::events::{ComponentPath, Criticality, Event, EventStatus, EventType};
use crate::lifecycle::EventLifecycle;

pub const OVERALL_NAME: &str = "Overall";
pub const OVERALL_CODE: &str = "overall";

/// Event attribution attached to a weather node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEvent {
    pub guid: Uuid,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub title: String,
    pub status: EventStatus,
    pub criticality: Criticality,
}

impl ActiveEvent {
    /// Snapshot an event as seen at `now`
    pub fn from_event(event: &Event, now: DateTime<Utc>) -> Self {
        Self {
            guid: event.guid(),
            event_type: event.event_type(),
            title: event.base().title.clone(),
            status: event.status_at(now),
            criticality: event.criticality(),
        }
    }
}

/// Display order: highest criticality first, ties by ascending GUID
pub fn display_order(a: &ActiveEvent, b: &ActiveEvent) -> Ordering {
    b.criticality
        .cmp(&a.criticality)
        .then_with(|| a.guid.cmp(&b.guid))
}

/// Worst-case status of one hierarchy node, or of the whole system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceWeather {
    pub platform: String,
    pub platform_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_code: Option<String>,
    pub status: Criticality,
    pub status_label: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub active_events: Vec<ActiveEvent>,
    /// Computation time, not the time of any underlying event
    pub last_updated: DateTime<Utc>,
}

impl ServiceWeather {
    pub(crate) fn new(
        platform: &str,
        platform_code: &str,
        status: Criticality,
        active_events: Vec<ActiveEvent>,
        last_updated: DateTime<Utc>,
    ) -> Self {
        Self {
            platform: platform.to_string(),
            platform_code: platform_code.to_string(),
            instance: None,
            instance_code: None,
            component: None,
            component_code: None,
            status,
            status_label: status.label().to_string(),
            active_events,
            last_updated,
        }
    }

    pub(crate) fn with_instance(mut self, name: &str, code: &str) -> Self {
        self.instance = Some(name.to_string());
        self.instance_code = Some(code.to_string());
        self
    }

    pub(crate) fn with_component(mut self, name: &str, code: &str) -> Self {
        self.component = Some(name.to_string());
        self.component_code = Some(code.to_string());
        self
    }

    /// GUIDs of the attributed events, in display order
    pub fn event_guids(&self) -> Vec<Uuid> {
        self.active_events.iter().map(|e| e.guid).collect()
    }
}

/// Weather of every node plus the overall rollup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherSummary {
    pub platforms: Vec<ServiceWeather>,
    pub instances: Vec<ServiceWeather>,
    pub components: Vec<ServiceWeather>,
    pub overall: ServiceWeather,
}

impl WeatherSummary {
    pub fn platform(&self, platform_code: &str) -> Option<&ServiceWeather> {
        self.platforms
            .iter()
            .find(|w| w.platform_code == platform_code)
    }

    pub fn instance(&self, platform_code: &str, instance_code: &str) -> Option<&ServiceWeather> {
        self.instances.iter().find(|w| {
            w.platform_code == platform_code && w.instance_code.as_deref() == Some(instance_code)
        })
    }

    pub fn component(&self, path: &ComponentPath) -> Option<&ServiceWeather> {
        self.components.iter().find(|w| {
            w.platform_code == path.platform
                && w.instance_code.as_deref() == Some(path.instance.as_str())
                && w.component_code.as_deref() == Some(path.component.as_str())
        })
    }
}
