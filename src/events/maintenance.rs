// Copyright (c) 2025 - Cowboy AI, Inc.
//! Planned maintenance windows

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Criticality, EventBase, EventRecord, EventStatus, EventType};
use crate::lifecycle::EventLifecycle;

/// Scheduled work on one or more components
///
/// The planned window is what was announced; the effective timestamps record
/// what actually happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedMaintenance {
    #[serde(flatten)]
    pub base: EventBase,
    pub start_planned: DateTime<Utc>,
    pub end_planned: DateTime<Utc>,
    #[serde(default)]
    pub cancelled: bool,
}

impl PlannedMaintenance {
    pub fn new(
        title: impl Into<String>,
        start_planned: DateTime<Utc>,
        end_planned: DateTime<Utc>,
    ) -> Self {
        Self {
            base: EventBase::new(title),
            start_planned,
            end_planned,
            cancelled: false,
        }
    }

    pub fn cancel(mut self) -> Self {
        self.cancelled = true;
        self
    }
}

impl EventRecord for PlannedMaintenance {
    fn base(&self) -> &EventBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EventBase {
        &mut self.base
    }
}

impl EventLifecycle for PlannedMaintenance {
    fn event_type(&self) -> EventType {
        EventType::PlannedMaintenance
    }

    /// Cancellation overrides everything; then effective timing; then the plan
    fn status_at(&self, now: DateTime<Utc>) -> EventStatus {
        if self.cancelled {
            return EventStatus::Canceled;
        }
        match (self.base.start_effective, self.base.end_effective) {
            (_, Some(end)) if end < now => EventStatus::Resolved,
            (Some(start), _) if start < now => EventStatus::Ongoing,
            _ if self.start_planned > now => EventStatus::Planned,
            _ => EventStatus::Unknown,
        }
    }

    fn criticality(&self) -> Criticality {
        Criticality::UnderMaintenance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-01-19T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn window() -> PlannedMaintenance {
        PlannedMaintenance::new(
            "Database upgrade",
            now() + Duration::hours(1),
            now() + Duration::hours(3),
        )
    }

    #[test]
    fn test_future_window_is_planned() {
        assert_eq!(window().status_at(now()), EventStatus::Planned);
    }

    #[test]
    fn test_started_window_is_ongoing() {
        let maintenance = window().with_start_effective(now() - Duration::minutes(10));
        assert_eq!(maintenance.status_at(now()), EventStatus::Ongoing);
    }

    #[test]
    fn test_ended_window_is_resolved() {
        let maintenance = window()
            .with_start_effective(now() - Duration::hours(2))
            .with_end_effective(now() - Duration::hours(1));
        assert_eq!(maintenance.status_at(now()), EventStatus::Resolved);
    }

    #[test]
    fn test_cancellation_overrides_timing() {
        let maintenance = window()
            .with_start_effective(now() - Duration::minutes(10))
            .cancel();
        assert_eq!(maintenance.status_at(now()), EventStatus::Canceled);
    }

    #[test]
    fn test_overdue_unstarted_window_is_unknown() {
        let maintenance = PlannedMaintenance::new(
            "Missed window",
            now() - Duration::hours(3),
            now() - Duration::hours(1),
        );
        assert_eq!(maintenance.status_at(now()), EventStatus::Unknown);
    }

    #[test]
    fn test_always_under_maintenance() {
        let maintenance = window().cancel();
        assert_eq!(
            EventLifecycle::criticality(&maintenance),
            Criticality::UnderMaintenance
        );
        assert_eq!(maintenance.event_type(), EventType::PlannedMaintenance);
    }
}
