// Copyright (c) 2025 - Cowboy AI, Inc.
//! Incidents and known issues

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Criticality, EventBase, EventRecord, EventStatus, EventType};
use crate::lifecycle::EventLifecycle;

/// Unplanned event affecting one or more components
///
/// `perpetual` marks a known issue (chronic, non-firing) rather than an
/// acute firing incident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incident {
    #[serde(flatten)]
    pub base: EventBase,
    #[serde(default)]
    pub perpetual: bool,
    pub criticality: Criticality,
}

impl Incident {
    pub fn new(title: impl Into<String>, criticality: Criticality) -> Self {
        Self {
            base: EventBase::new(title),
            perpetual: false,
            criticality,
        }
    }

    /// Mark as a known issue
    pub fn perpetual(mut self) -> Self {
        self.perpetual = true;
        self
    }
}

impl EventRecord for Incident {
    fn base(&self) -> &EventBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EventBase {
        &mut self.base
    }
}

impl EventLifecycle for Incident {
    fn event_type(&self) -> EventType {
        if self.perpetual {
            EventType::KnownIssue
        } else {
            EventType::FiringIncident
        }
    }

    /// Resolved once ended, ongoing once started, otherwise unknown
    ///
    /// Incidents never report `Planned`; only maintenances model a
    /// future-scheduled state.
    fn status_at(&self, now: DateTime<Utc>) -> EventStatus {
        match (self.base.start_effective, self.base.end_effective) {
            (_, Some(end)) if end < now => EventStatus::Resolved,
            (Some(start), _) if start < now => EventStatus::Ongoing,
            _ => EventStatus::Unknown,
        }
    }

    fn criticality(&self) -> Criticality {
        self.criticality
    }
}
