// Copyright (c) 2025 - Cowboy AI, Inc.
//! Status Aggregation Engine
//!
//! Turns the flat set of stored events into a tree of worst-case weather
//! snapshots with event attribution.
//!
//! # Pipeline
//!
//! ```text
//! EventStore ──read all──> [Event]
//!                             │ activity filter (at one captured `now`)
//!                             ▼
//!                        [active Event]
//!                             │ drop references outside the hierarchy
//!                             ▼
//!                        [ScopedEvent]
//!         ┌───────────────────┼────────────────────┐
//!         ▼                   ▼                    ▼
//!   per platform        per instance         per component
//!   (code, *, *)        (code, code, *)      (code, code, code)
//!         │ path filter + reduce (max criticality, attribution)
//!         └───────────────────┼────────────────────┘
//!                             ▼
//!                   overall fold (dedup by GUID)
//!                             ▼
//!                       WeatherSummary
//! ```
//!
//! Every computation is a full, independent recomputation. The engine keeps
//! no state between calls and performs no writes. The two store reads are
//! not one atomic snapshot; an event written between them may be partially
//! reflected. A failed read aborts the whole computation.

pub mod filter;
pub mod report;

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::errors::WeatherResult;
use crate::event_store::EventStore;
use crate::events::{Criticality, Event};
use crate::hierarchy::Hierarchy;

pub use filter::{is_event_active, reduce, worst_of, ScopedEvent};
pub use report::{ActiveEvent, ServiceWeather, WeatherSummary, OVERALL_CODE, OVERALL_NAME};

/// Computes weather summaries from an event store and a static hierarchy
pub struct WeatherEngine<S: EventStore + ?Sized> {
    hierarchy: Arc<Hierarchy>,
    store: Arc<S>,
}

impl<S: EventStore + ?Sized> Clone for WeatherEngine<S> {
    fn clone(&self) -> Self {
        Self {
            hierarchy: Arc::clone(&self.hierarchy),
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: EventStore + ?Sized> WeatherEngine<S> {
    pub fn new(hierarchy: Arc<Hierarchy>, store: Arc<S>) -> Self {
        Self { hierarchy, store }
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    /// Compute the weather against the wall clock
    pub async fn compute(&self) -> WeatherResult<WeatherSummary> {
        self.compute_at(Utc::now()).await
    }

    /// Compute the weather as of `now`
    ///
    /// Every event's status is derived against this one instant.
    pub async fn compute_at(&self, now: DateTime<Utc>) -> WeatherResult<WeatherSummary> {
        let events = self.load_events().await?;
        let summary = summarize(&self.hierarchy, &events, now);

        info!(
            events = events.len(),
            overall = summary.overall.status_label.as_str(),
            active = summary.overall.active_events.len(),
            "Weather computed"
        );

        Ok(summary)
    }

    async fn load_events(&self) -> WeatherResult<Vec<Event>> {
        let incidents = self.store.get_all_incidents().await.map_err(|e| {
            error!(error = %e, "Failed to read incidents, aborting weather computation");
            e
        })?;

        let maintenances = self.store.get_all_maintenances().await.map_err(|e| {
            error!(error = %e, "Failed to read maintenances, aborting weather computation");
            e
        })?;

        debug!(
            incidents = incidents.len(),
            maintenances = maintenances.len(),
            "Events loaded"
        );

        Ok(incidents
            .into_iter()
            .map(Event::from)
            .chain(maintenances.into_iter().map(Event::from))
            .collect())
    }
}

/// Weather of one path, empty codes acting as wildcards
fn path_weather(
    scoped: &[ScopedEvent<'_>],
    now: DateTime<Utc>,
    platform_code: &str,
    instance_code: &str,
    component_code: &str,
) -> (Criticality, Vec<ActiveEvent>) {
    reduce(
        scoped
            .iter()
            .filter(|event| event.matches_path(platform_code, instance_code, component_code))
            .map(|event| event.event),
        now,
    )
}

/// Pure weather computation over an already-loaded event set
pub fn summarize(hierarchy: &Hierarchy, events: &[Event], now: DateTime<Utc>) -> WeatherSummary {
    // activity and resolution depend only on the event, so both are taken once
    let active: Vec<ScopedEvent<'_>> = events
        .iter()
        .filter(|event| is_event_active(event, now))
        .map(|event| ScopedEvent::resolve(event, hierarchy))
        .collect();

    let dangling: usize = active.iter().map(|event| event.dangling()).sum();
    if dangling > 0 {
        warn!(dangling, "Ignoring component references outside the hierarchy");
    }

    let platforms: Vec<ServiceWeather> = hierarchy
        .platform_ids()
        .map(|id| {
            let platform = hierarchy.platform(id);
            let (status, attributed) = path_weather(&active, now, &platform.code, "", "");
            ServiceWeather::new(&platform.name, &platform.code, status, attributed, now)
        })
        .collect();

    let instances: Vec<ServiceWeather> = hierarchy
        .instance_ids()
        .map(|id| {
            let instance = hierarchy.instance(id);
            let platform = hierarchy.platform(instance.platform);
            let (status, attributed) =
                path_weather(&active, now, &platform.code, &instance.code, "");
            ServiceWeather::new(&platform.name, &platform.code, status, attributed, now)
                .with_instance(&instance.name, &instance.code)
        })
        .collect();

    let components: Vec<ServiceWeather> = hierarchy
        .component_ids()
        .map(|id| {
            let component = hierarchy.component(id);
            let instance = hierarchy.instance(component.instance);
            let platform = hierarchy.platform(instance.platform);
            let (status, attributed) = path_weather(
                &active,
                now,
                &platform.code,
                &instance.code,
                &component.code,
            );
            ServiceWeather::new(&platform.name, &platform.code, status, attributed, now)
                .with_instance(&instance.name, &instance.code)
                .with_component(&component.name, &component.code)
        })
        .collect();

    for weather in platforms.iter().chain(&instances).chain(&components) {
        if weather.status != Criticality::Operational {
            debug!(
                platform = weather.platform_code.as_str(),
                instance = weather.instance_code.as_deref().unwrap_or(""),
                component = weather.component_code.as_deref().unwrap_or(""),
                status = weather.status_label.as_str(),
                "Node not operational"
            );
        }
    }

    let overall = fold_overall(&platforms, &instances, &components, now);

    WeatherSummary {
        platforms,
        instances,
        components,
        overall,
    }
}

/// Fold already-computed node results into the overall node
fn fold_overall(
    platforms: &[ServiceWeather],
    instances: &[ServiceWeather],
    components: &[ServiceWeather],
    now: DateTime<Utc>,
) -> ServiceWeather {
    let mut union: BTreeMap<Uuid, ActiveEvent> = BTreeMap::new();
    for weather in platforms.iter().chain(instances).chain(components) {
        for event in &weather.active_events {
            union.entry(event.guid).or_insert_with(|| event.clone());
        }
    }

    let mut attributed: Vec<ActiveEvent> = union.into_values().collect();
    attributed.sort_by(report::display_order);
    let status = worst_of(&attributed);

    ServiceWeather::new(OVERALL_NAME, OVERALL_CODE, status, attributed, now)
}
