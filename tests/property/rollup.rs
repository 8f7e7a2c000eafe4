// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Weather Rollup
//!
//! Every node's status must be the worst of its attributed events, events
//! attributed to a child must also be attributed to its ancestors, and the
//! result must not depend on the order the store returns events in.

use std::collections::BTreeSet;
use std::sync::Arc;

use proptest::prelude::*;
use uuid::Uuid;

use cim_weather::events::{
    ComponentPath, Criticality, Event, EventRecord, Incident, PlannedMaintenance,
};
use cim_weather::event_store::{EventStore, MemoryEventStore};
use cim_weather::weather::{summarize, worst_of, ServiceWeather, WeatherEngine, WeatherSummary};

use crate::fixtures::{all_paths, fixed_now, hierarchy, hours};

// ============================================================================
// Generated Event Definition
// ============================================================================

#[derive(Debug, Clone)]
struct GeneratedEvent {
    maintenance: bool,
    criticality: Criticality,
    paths: Vec<usize>,
    start: Option<i64>,
    end: Option<i64>,
    planned_start: i64,
    cancelled: bool,
    perpetual: bool,
}

/// Fixture paths plus one component the hierarchy does not know
fn candidate_paths() -> Vec<ComponentPath> {
    let mut paths = all_paths();
    paths.push(ComponentPath::new("core", "eu-west", "ghost"));
    paths
}

fn criticality_strategy() -> impl Strategy<Value = Criticality> {
    prop_oneof![
        Just(Criticality::Operational),
        Just(Criticality::Degraded),
        Just(Criticality::PartialOutage),
        Just(Criticality::MajorOutage),
    ]
}

fn generated_event_strategy() -> impl Strategy<Value = GeneratedEvent> {
    (
        any::<bool>(),
        criticality_strategy(),
        prop::collection::vec(0..6usize, 0..3),
        prop::option::of(-48i64..48),
        prop::option::of(-48i64..48),
        -48i64..48,
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(
            |(maintenance, criticality, paths, start, end, planned_start, cancelled, perpetual)| {
                GeneratedEvent {
                    maintenance,
                    criticality,
                    paths,
                    start,
                    end,
                    planned_start,
                    cancelled,
                    perpetual,
                }
            },
        )
}

fn build_event(index: usize, shape: &GeneratedEvent) -> Event {
    let guid = Uuid::from_u128((index as u128 + 1) * 0x9E37_79B9_7F4A_7C15);
    let paths = candidate_paths();

    fn timed<T: EventRecord>(mut record: T, shape: &GeneratedEvent, paths: &[ComponentPath]) -> T {
        for &index in &shape.paths {
            record = record.with_component(paths[index].clone());
        }
        if let Some(start) = shape.start {
            record = record.with_start_effective(hours(start));
        }
        if let Some(end) = shape.end {
            record = record.with_end_effective(hours(end));
        }
        record
    }

    if shape.maintenance {
        let mut maintenance = PlannedMaintenance::new(
            "Generated maintenance",
            hours(shape.planned_start),
            hours(shape.planned_start + 2),
        )
        .with_guid(guid);
        if shape.cancelled {
            maintenance = maintenance.cancel();
        }
        timed(maintenance, shape, &paths).into()
    } else {
        let mut incident = Incident::new("Generated incident", shape.criticality).with_guid(guid);
        if shape.perpetual {
            incident = incident.perpetual();
        }
        timed(incident, shape, &paths).into()
    }
}

fn build_events(generated: &[GeneratedEvent]) -> Vec<Event> {
    generated
        .iter()
        .enumerate()
        .map(|(index, shape)| build_event(index, shape))
        .collect()
}

fn guid_set(node: &ServiceWeather) -> BTreeSet<Uuid> {
    node.event_guids().into_iter().collect()
}

fn nodes(summary: &WeatherSummary) -> impl Iterator<Item = &ServiceWeather> {
    summary
        .platforms
        .iter()
        .chain(&summary.instances)
        .chain(&summary.components)
        .chain(std::iter::once(&summary.overall))
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Property: Node status is the worst attributed criticality
    #[test]
    fn prop_status_is_worst_of_events(generated in prop::collection::vec(generated_event_strategy(), 0..12)) {
        let summary = summarize(&hierarchy(), &build_events(&generated), fixed_now());

        for node in nodes(&summary) {
            prop_assert_eq!(node.status, worst_of(&node.active_events));
            prop_assert_eq!(node.status_label.as_str(), node.status.label());
        }
    }

    /// Property: Attributed events are sorted by criticality, then GUID
    #[test]
    fn prop_events_in_display_order(generated in prop::collection::vec(generated_event_strategy(), 0..12)) {
        let summary = summarize(&hierarchy(), &build_events(&generated), fixed_now());

        for node in nodes(&summary) {
            for pair in node.active_events.windows(2) {
                let ordered = pair[0].criticality > pair[1].criticality
                    || (pair[0].criticality == pair[1].criticality && pair[0].guid < pair[1].guid);
                prop_assert!(ordered, "out of order: {:?}", pair);
            }
        }
    }

    /// Property: Events seen by a child are seen by its ancestors
    #[test]
    fn prop_children_roll_up(generated in prop::collection::vec(generated_event_strategy(), 0..12)) {
        let summary = summarize(&hierarchy(), &build_events(&generated), fixed_now());

        for component in &summary.components {
            let instance_code = component.instance_code.as_deref().unwrap_or_default();
            let instance = summary
                .instance(&component.platform_code, instance_code)
                .expect("component without instance");
            prop_assert!(guid_set(component).is_subset(&guid_set(instance)));
            prop_assert!(instance.status >= component.status);
        }

        for instance in &summary.instances {
            let platform = summary
                .platform(&instance.platform_code)
                .expect("instance without platform");
            prop_assert!(guid_set(instance).is_subset(&guid_set(platform)));
            prop_assert!(platform.status >= instance.status);
        }
    }

    /// Property: A node's status equals the worst of its children
    #[test]
    fn prop_rollup_consistency(generated in prop::collection::vec(generated_event_strategy(), 0..12)) {
        let summary = summarize(&hierarchy(), &build_events(&generated), fixed_now());

        for platform in &summary.platforms {
            let code = platform.platform_code.as_str();
            let worst_instance = summary
                .instances
                .iter()
                .filter(|i| i.platform_code == code)
                .map(|i| i.status)
                .max()
                .unwrap_or(Criticality::Operational);
            let worst_component = summary
                .components
                .iter()
                .filter(|c| c.platform_code == code)
                .map(|c| c.status)
                .max()
                .unwrap_or(Criticality::Operational);

            prop_assert_eq!(platform.status, worst_instance);
            prop_assert_eq!(worst_instance, worst_component);
        }

        for instance in &summary.instances {
            let worst_component = summary
                .components
                .iter()
                .filter(|c| {
                    c.platform_code == instance.platform_code
                        && c.instance_code == instance.instance_code
                })
                .map(|c| c.status)
                .max()
                .unwrap_or(Criticality::Operational);

            prop_assert_eq!(instance.status, worst_component);
        }
    }

    /// Property: Overall is the deduplicated union of the platforms
    #[test]
    fn prop_overall_is_platform_union(generated in prop::collection::vec(generated_event_strategy(), 0..12)) {
        let summary = summarize(&hierarchy(), &build_events(&generated), fixed_now());

        let union: BTreeSet<Uuid> = summary.platforms.iter().flat_map(guid_set).collect();
        prop_assert_eq!(guid_set(&summary.overall), union.clone());
        prop_assert_eq!(summary.overall.active_events.len(), union.len());

        let worst = summary
            .platforms
            .iter()
            .map(|p| p.status)
            .max()
            .unwrap_or(Criticality::Operational);
        prop_assert_eq!(summary.overall.status, worst);
    }

    /// Property: Store order does not affect the summary
    #[test]
    fn prop_input_order_irrelevant(generated in prop::collection::vec(generated_event_strategy(), 0..12)) {
        let events = build_events(&generated);
        let mut reversed = events.clone();
        reversed.reverse();

        let forward = summarize(&hierarchy(), &events, fixed_now());
        let backward = summarize(&hierarchy(), &reversed, fixed_now());

        prop_assert_eq!(forward, backward);
    }

    /// Property: Cancelled maintenances are never attributed
    #[test]
    fn prop_cancelled_never_active(generated in prop::collection::vec(generated_event_strategy(), 0..12)) {
        let events = build_events(&generated);
        let cancelled: BTreeSet<Uuid> = events
            .iter()
            .filter_map(|event| match event {
                Event::PlannedMaintenance(m) if m.cancelled => Some(m.guid()),
                _ => None,
            })
            .collect();

        let summary = summarize(&hierarchy(), &events, fixed_now());
        prop_assert!(guid_set(&summary.overall).is_disjoint(&cancelled));
    }

    /// Property: The engine over a store agrees with the pure summary
    #[test]
    fn prop_engine_matches_summary(generated in prop::collection::vec(generated_event_strategy(), 0..12)) {
        let events = build_events(&generated);
        let store = Arc::new(MemoryEventStore::new());

        let computed = tokio_test::block_on(async {
            for event in events.iter().cloned() {
                match event {
                    Event::Incident(incident) => store.create_incident(incident).await?,
                    Event::PlannedMaintenance(m) => store.create_maintenance(m).await?,
                }
            }
            WeatherEngine::new(Arc::new(hierarchy()), store.clone())
                .compute_at(fixed_now())
                .await
        })
        .expect("engine computation failed");

        prop_assert_eq!(computed, summarize(&hierarchy(), &events, fixed_now()));
    }
}
