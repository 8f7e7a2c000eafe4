// Copyright (c) 2025 - Cowboy AI, Inc.
//! Activity filter, path filter and per-path reduction
//!
//! ```text
//! events ──is_event_active──> active ──ScopedEvent::resolve──> scoped
//! scoped ──matches_path──> survivors ──reduce──> (status, attribution)
//! ```

use chrono::{DateTime, Utc};

use super::report::{display_order, ActiveEvent};
use crate::events::{ComponentPath, Criticality, Event, EventStatus};
use crate::hierarchy::{component_matches_path, Hierarchy};
use crate::lifecycle::EventLifecycle;

/// Whether an event is in effect for aggregation at `now`
///
/// Distinct from the lifecycle status: an event with neither effective
/// timestamp is active indefinitely, even though its status reads
/// `Unknown`. A cancelled maintenance is never active.
pub fn is_event_active(event: &Event, now: DateTime<Utc>) -> bool {
    match event {
        Event::Incident(incident) => {
            incident.base.is_untimed()
                || matches!(
                    incident.status_at(now),
                    EventStatus::Ongoing | EventStatus::Acknowledged
                )
        }
        Event::PlannedMaintenance(maintenance) => {
            if maintenance.cancelled {
                return false;
            }
            maintenance.base.is_untimed()
                || matches!(
                    maintenance.status_at(now),
                    EventStatus::Ongoing | EventStatus::Planned
                )
        }
    }
}

/// An active event narrowed to the component references a hierarchy contains
///
/// References to components the hierarchy does not know are dropped before
/// any matching, so an event never reaches a platform or instance without
/// also reaching one of its components.
#[derive(Debug, Clone)]
pub struct ScopedEvent<'a> {
    pub event: &'a Event,
    pub components: Vec<&'a ComponentPath>,
}

impl<'a> ScopedEvent<'a> {
    pub fn resolve(event: &'a Event, hierarchy: &Hierarchy) -> Self {
        let components = event
            .base()
            .components
            .iter()
            .filter(|path| hierarchy.resolve(path).is_some())
            .collect();
        Self { event, components }
    }

    /// References that did not resolve
    pub fn dangling(&self) -> usize {
        self.event.base().components.len() - self.components.len()
    }

    /// Whether any kept reference falls under the given path
    ///
    /// Empty codes are wildcards, see [`component_matches_path`].
    pub fn matches_path(
        &self,
        platform_code: &str,
        instance_code: &str,
        component_code: &str,
    ) -> bool {
        self.components
            .iter()
            .any(|path| component_matches_path(path, platform_code, instance_code, component_code))
    }
}

/// Worst criticality among the survivors and their attribution in display order
///
/// An empty survivor set is `Operational`.
pub fn reduce<'a>(
    survivors: impl IntoIterator<Item = &'a Event>,
    now: DateTime<Utc>,
) -> (Criticality, Vec<ActiveEvent>) {
    let mut active: Vec<ActiveEvent> = survivors
        .into_iter()
        .map(|event| ActiveEvent::from_event(event, now))
        .collect();
    active.sort_by(display_order);

    (worst_of(&active), active)
}

/// Highest criticality in a set of attributed events, `Operational` if empty
pub fn worst_of(events: &[ActiveEvent]) -> Criticality {
    events
        .iter()
        .map(|e| e.criticality)
        .max()
        .unwrap_or(Criticality::Operational)
}
