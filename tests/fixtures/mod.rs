// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for cim-weather
//!
//! Provides a deterministic hierarchy, GUIDs and timestamps.
//!
//! # Design Principles
//! - All test data is deterministic (no `Uuid::new_v4()` or `Utc::now()`)
//! - Event timing is expressed relative to [`fixed_now`]

#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use cim_weather::events::{ComponentPath, Criticality, EventRecord, Incident, PlannedMaintenance};
use cim_weather::hierarchy::{Hierarchy, HierarchyConfig};

pub const GUID_1: &str = "0f8c2a1e-1111-4a6b-8c1d-000000000001";
pub const GUID_2: &str = "0f8c2a1e-2222-4a6b-8c1d-000000000002";
pub const GUID_3: &str = "0f8c2a1e-3333-4a6b-8c1d-000000000003";

// Fixed evaluation instant (2026-01-19T12:00:00Z)
pub const FIXED_NOW: &str = "2026-01-19T12:00:00Z";

pub const HIERARCHY_JSON: &str = r#"{
    "platforms": [
        {
            "name": "Core", "code": "core",
            "instances": [
                { "name": "EU West", "code": "eu-west",
                  "components": [
                      { "name": "API", "code": "api" },
                      { "name": "Database", "code": "db" }
                  ] },
                { "name": "US East", "code": "us-east",
                  "components": [ { "name": "API", "code": "api" } ] }
            ]
        },
        {
            "name": "Edge", "code": "edge",
            "instances": [
                { "name": "Amsterdam PoP", "code": "pop-ams",
                  "components": [
                      { "name": "CDN", "code": "cdn" },
                      { "name": "DNS", "code": "dns" }
                  ] }
            ]
        }
    ]
}"#;

pub fn parse_uuid(s: &str) -> Uuid {
    Uuid::parse_str(s).expect("Invalid UUID in test fixture")
}

pub fn fixed_now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(FIXED_NOW)
        .expect("Invalid timestamp in test fixture")
        .with_timezone(&Utc)
}

pub fn hours(offset: i64) -> DateTime<Utc> {
    fixed_now() + Duration::hours(offset)
}

pub fn hierarchy() -> Hierarchy {
    let config = HierarchyConfig::from_json(HIERARCHY_JSON).expect("Invalid hierarchy fixture");
    Hierarchy::from_config(&config).expect("Invalid hierarchy fixture")
}

pub fn eu_api() -> ComponentPath {
    ComponentPath::new("core", "eu-west", "api")
}

pub fn eu_db() -> ComponentPath {
    ComponentPath::new("core", "eu-west", "db")
}

pub fn us_api() -> ComponentPath {
    ComponentPath::new("core", "us-east", "api")
}

pub fn ams_cdn() -> ComponentPath {
    ComponentPath::new("edge", "pop-ams", "cdn")
}

pub fn ams_dns() -> ComponentPath {
    ComponentPath::new("edge", "pop-ams", "dns")
}

/// Every component path of the fixture hierarchy
pub fn all_paths() -> Vec<ComponentPath> {
    vec![
        eu_api(),
        eu_db(),
        us_api(),
        ams_cdn(),
        ams_dns(),
    ]
}

/// Incident that started an hour ago and has not ended
pub fn ongoing_incident(guid: &str, criticality: Criticality, path: ComponentPath) -> Incident {
    Incident::new("Ongoing incident", criticality)
        .with_guid(parse_uuid(guid))
        .with_component(path)
        .with_start_effective(hours(-1))
}

/// Maintenance window planned for tomorrow
pub fn upcoming_maintenance(guid: &str, path: ComponentPath) -> PlannedMaintenance {
    PlannedMaintenance::new("Upcoming maintenance", hours(24), hours(26))
        .with_guid(parse_uuid(guid))
        .with_component(path)
}
