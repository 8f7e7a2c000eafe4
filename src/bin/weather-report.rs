// Copyright (c) 2025 - Cowboy AI, Inc.
//! Weather Report
//!
//! Loads the platform hierarchy, opens the configured event store, computes
//! the current service weather and prints it as JSON on stdout.
//!
//! Run with:
//! ```text
//! WEATHER_HIERARCHY_FILE=demos/hierarchy.json WEATHER_SEED_FILE=demos/seed.json \
//!     cargo run --bin weather-report
//! ```
//!
//! Configuration comes from environment variables, see `cim_weather::config`.
//! With the in-memory store, `WEATHER_SEED_FILE` provides the events.

use anyhow::{Context, Result};
use cim_weather::{
    event_store::SeedDocument, Hierarchy, HierarchyConfig, WeatherConfig, WeatherEngine,
};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = WeatherConfig::from_env().context("Failed to load configuration")?;
    info!("Configuration loaded:");
    info!("  - Hierarchy: {}", config.hierarchy_file.display());
    info!("  - Store: {}", config.store);

    let hierarchy_config = HierarchyConfig::from_file(&config.hierarchy_file).with_context(|| {
        format!(
            "Failed to read hierarchy from {}",
            config.hierarchy_file.display()
        )
    })?;
    let hierarchy = Hierarchy::from_config(&hierarchy_config).context("Invalid hierarchy")?;
    info!(nodes = hierarchy.node_count(), "Hierarchy loaded");

    let store = config
        .open_store()
        .await
        .context("Failed to open event store")?;

    if let Some(seed_file) = &config.seed_file {
        SeedDocument::from_file(seed_file)
            .with_context(|| format!("Failed to read seed events from {}", seed_file.display()))?
            .apply(store.as_ref())
            .await
            .context("Failed to seed event store")?;
    }

    let engine = WeatherEngine::new(Arc::new(hierarchy), store);
    let summary = engine
        .compute()
        .await
        .context("Failed to compute weather")?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
