// Copyright (c) 2025 - Cowboy AI, Inc.
//! Severity scale and lifecycle vocabulary shared by all events

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Severity scale attached to an event
///
/// Totally ordered by numeric value. Aggregation always keeps the highest
/// value present, so `UnderMaintenance` (4) outranks `MajorOutage` (3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Criticality {
    Unknown,
    Operational,
    Degraded,
    PartialOutage,
    MajorOutage,
    UnderMaintenance,
}

impl Criticality {
    /// All values in ascending order
    pub const ALL: [Criticality; 6] = [
        Criticality::Unknown,
        Criticality::Operational,
        Criticality::Degraded,
        Criticality::PartialOutage,
        Criticality::MajorOutage,
        Criticality::UnderMaintenance,
    ];

    /// Numeric value on the wire (-1..=4)
    pub fn value(&self) -> i8 {
        match self {
            Self::Unknown => -1,
            Self::Operational => 0,
            Self::Degraded => 1,
            Self::PartialOutage => 2,
            Self::MajorOutage => 3,
            Self::UnderMaintenance => 4,
        }
    }

    /// Map a numeric value back, `None` when out of range
    pub fn from_value(value: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|c| i64::from(c.value()) == value)
    }

    /// Human-readable label used in weather reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Operational => "operational",
            Self::Degraded => "degraded",
            Self::PartialOutage => "partial_outage",
            Self::MajorOutage => "major_outage",
            Self::UnderMaintenance => "under_maintenance",
        }
    }
}

/// Label for a raw numeric criticality; unrecognized values render as unknown
pub fn criticality_label(value: i64) -> &'static str {
    Criticality::from_value(value)
        .unwrap_or(Criticality::Unknown)
        .label()
}

impl PartialOrd for Criticality {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Criticality {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value().cmp(&other.value())
    }
}

impl From<Criticality> for i8 {
    fn from(criticality: Criticality) -> Self {
        criticality.value()
    }
}

impl TryFrom<i8> for Criticality {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        Self::from_value(i64::from(value))
            .ok_or_else(|| format!("criticality out of range: {}", value))
    }
}

impl fmt::Display for Criticality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Lifecycle value of a single event
///
/// Not every variant is reachable by every event type: incidents never report
/// `Planned` or `Canceled`, and nothing currently derives `Acknowledged`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Planned,
    Ongoing,
    Resolved,
    Acknowledged,
    Canceled,
    Unknown,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Ongoing => "ongoing",
            Self::Resolved => "resolved",
            Self::Acknowledged => "acknowledged",
            Self::Canceled => "canceled",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classification of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Perpetual incident: chronic, non-firing
    KnownIssue,
    /// Acute incident
    FiringIncident,
    PlannedMaintenance,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::KnownIssue => "known_issue",
            Self::FiringIncident => "firing_incident",
            Self::PlannedMaintenance => "planned_maintenance",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
