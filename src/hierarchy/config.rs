// Copyright (c) 2025 - Cowboy AI, Inc.
//! Hierarchy source document
//!
//! The platform topology is static configuration, loaded once at process
//! start. The document nests instances inside platforms and components inside
//! instances:
//!
//! ```json
//! { "platforms": [ { "name": "Core", "code": "core",
//!     "instances": [ { "name": "EU West", "code": "eu-west",
//!         "components": [ { "name": "API", "code": "api" } ] } ] } ] }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::WeatherResult;

/// Top-level hierarchy document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyConfig {
    #[serde(default)]
    pub platforms: Vec<PlatformConfig>,
}

/// Platform entry with its instances
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub instances: Vec<InstanceConfig>,
}

/// Instance entry with its components
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub components: Vec<ComponentConfig>,
}

/// Leaf component entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
}

impl HierarchyConfig {
    /// Parse a hierarchy document from JSON text
    pub fn from_json(json: &str) -> WeatherResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a hierarchy document from disk
    pub fn from_file(path: impl AsRef<Path>) -> WeatherResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }
}
