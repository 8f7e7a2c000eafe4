// Copyright (c) 2025 - Cowboy AI, Inc.
//! Event Lifecycle Derivation
//!
//! An event's status is never stored. It is derived from its timing fields
//! against the current instant, every time it is asked for.
//!
//! # Incident
//!
//! ```text
//! end_effective < now                  → Resolved
//! start_effective < now                → Ongoing
//! otherwise                            → Unknown
//! ```
//!
//! # Planned Maintenance
//!
//! ```text
//! cancelled                            → Canceled
//! end_effective < now                  → Resolved
//! start_effective < now                → Ongoing
//! start_planned > now                  → Planned
//! otherwise                            → Unknown
//! ```
//!
//! # Criticality
//!
//! Incidents report their stored criticality; maintenances always report
//! `UnderMaintenance`.

use chrono::{DateTime, Utc};

use crate::events::{Criticality, Event, EventStatus, EventType};

/// Type, status and criticality derivation shared by all events
pub trait EventLifecycle {
    fn event_type(&self) -> EventType;

    /// Status at a given instant
    fn status_at(&self, now: DateTime<Utc>) -> EventStatus;

    /// Status against the wall clock at call time
    fn status(&self) -> EventStatus {
        self.status_at(Utc::now())
    }

    fn criticality(&self) -> Criticality;
}

impl EventLifecycle for Event {
    fn event_type(&self) -> EventType {
        match self {
            Event::Incident(incident) => incident.event_type(),
            Event::PlannedMaintenance(maintenance) => maintenance.event_type(),
        }
    }

    fn status_at(&self, now: DateTime<Utc>) -> EventStatus {
        match self {
            Event::Incident(incident) => incident.status_at(now),
            Event::PlannedMaintenance(maintenance) => maintenance.status_at(now),
        }
    }

    fn criticality(&self) -> Criticality {
        match self {
            Event::Incident(incident) => EventLifecycle::criticality(incident),
            Event::PlannedMaintenance(maintenance) => EventLifecycle::criticality(maintenance),
        }
    }
}
