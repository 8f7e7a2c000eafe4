// Copyright (c) 2025 - Cowboy AI, Inc.
//! Component Hierarchy Model
//!
//! Three-level ownership tree: a Platform owns Instances, an Instance owns
//! Components. The tree is loaded once from static configuration and never
//! mutated afterwards.
//!
//! # Layout
//!
//! ```text
//! Hierarchy
//!  ├── platforms:  [Platform]                (no parent)
//!  ├── instances:  [Instance  → PlatformId]
//!  └── components: [Component → InstanceId]
//! ```
//!
//! Nodes live in flat arenas and point at their parent by index. Display
//! strings and normalized path keys are computed once while building, so
//! reads never need a lock.
//!
//! # Path Keys
//!
//! - Display: `"Core - EU West - API"` (parent display + `" - "` + name)
//! - Normalized: `"core-eu-west-api"` (parent key + `"-"` + slug of code)

pub mod config;
pub mod slug;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

use crate::errors::{WeatherError, WeatherResult};

pub use config::{ComponentConfig, HierarchyConfig, InstanceConfig, PlatformConfig};
pub use slug::slugify;

const UNKNOWN_PLATFORM: &str = "unknown platform";
const UNKNOWN_INSTANCE: &str = "unknown instance";
const UNKNOWN_COMPONENT: &str = "unknown component";

const UNKNOWN_PLATFORM_SLUG: &str = "unknown-platform";
const UNKNOWN_INSTANCE_SLUG: &str = "unknown-instance";
const UNKNOWN_COMPONENT_SLUG: &str = "unknown-component";

/// Index of a platform in its hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlatformId(usize);

/// Index of an instance in its hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(usize);

/// Index of a component in its hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(usize);

/// Any node of the hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRef {
    Platform(PlatformId),
    Instance(InstanceId),
    Component(ComponentId),
}

/// Root of an ownership tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub name: String,
    pub code: String,
    instances: Vec<InstanceId>,
    display: String,
    normalized: String,
}

/// Deployment of a platform, owned by exactly one platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    pub name: String,
    pub code: String,
    pub platform: PlatformId,
    components: Vec<ComponentId>,
    display: String,
    normalized: String,
}

/// Leaf of the tree, owned by exactly one instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub name: String,
    pub code: String,
    pub instance: InstanceId,
    display: String,
    normalized: String,
}

impl Platform {
    /// Instances owned by this platform
    pub fn instances(&self) -> &[InstanceId] {
        &self.instances
    }
}

impl Instance {
    /// Components owned by this instance
    pub fn components(&self) -> &[ComponentId] {
        &self.components
    }
}

/// Weak reference from an event to a component, by ancestry codes
///
/// Events do not own the components they list. The path may name a component
/// that is absent from the loaded hierarchy; it then matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentPath {
    pub platform: String,
    pub instance: String,
    pub component: String,
}

impl ComponentPath {
    pub fn new(
        platform: impl Into<String>,
        instance: impl Into<String>,
        component: impl Into<String>,
    ) -> Self {
        Self {
            platform: platform.into(),
            instance: instance.into(),
            component: component.into(),
        }
    }
}

impl fmt::Display for ComponentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.platform, self.instance, self.component)
    }
}

/// Check a component's ancestry codes against a (possibly partial) path
///
/// An empty code at any level is a wildcard. This answers platform-level
/// (`"core", "", ""`), instance-level (`"core", "eu-west", ""`) and
/// component-level queries with one function.
pub fn component_matches_path(
    component: &ComponentPath,
    platform_code: &str,
    instance_code: &str,
    component_code: &str,
) -> bool {
    let level_matches = |actual: &str, wanted: &str| wanted.is_empty() || actual == wanted;

    level_matches(&component.platform, platform_code)
        && level_matches(&component.instance, instance_code)
        && level_matches(&component.component, component_code)
}

fn display_path(parent: Option<&str>, name: &str, sentinel: &str) -> String {
    if name.is_empty() {
        return sentinel.to_string();
    }
    match parent {
        Some(parent) => format!("{} - {}", parent, name),
        None => name.to_string(),
    }
}

fn normalized_path(parent: Option<&str>, code: &str, display: &str, sentinel: &str) -> String {
    let mut base = slugify(code);
    if base.is_empty() {
        base = slugify(display);
    }
    if base.is_empty() {
        base = sentinel.to_string();
    }
    match parent {
        Some(parent) => format!("{}-{}", parent, base),
        None => base,
    }
}

/// Immutable platform → instance → component tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hierarchy {
    platforms: Vec<Platform>,
    instances: Vec<Instance>,
    components: Vec<Component>,
}

impl Hierarchy {
    /// Start building a hierarchy
    pub fn builder() -> HierarchyBuilder {
        HierarchyBuilder::default()
    }

    /// Build the tree described by a hierarchy source document
    pub fn from_config(config: &HierarchyConfig) -> WeatherResult<Self> {
        let mut builder = Self::builder();

        for platform in &config.platforms {
            let platform_id = builder.add_platform(&platform.name, &platform.code);
            for instance in &platform.instances {
                let instance_id = builder.add_instance(platform_id, &instance.name, &instance.code);
                for component in &instance.components {
                    builder.add_component(instance_id, &component.name, &component.code);
                }
            }
        }

        builder.build()
    }

    pub fn platform(&self, id: PlatformId) -> &Platform {
        &self.platforms[id.0]
    }

    pub fn instance(&self, id: InstanceId) -> &Instance {
        &self.instances[id.0]
    }

    pub fn component(&self, id: ComponentId) -> &Component {
        &self.components[id.0]
    }

    /// All platforms in load order
    pub fn platform_ids(&self) -> impl Iterator<Item = PlatformId> + '_ {
        (0..self.platforms.len()).map(PlatformId)
    }

    /// All instances in load order
    pub fn instance_ids(&self) -> impl Iterator<Item = InstanceId> + '_ {
        (0..self.instances.len()).map(InstanceId)
    }

    /// All components in load order
    pub fn component_ids(&self) -> impl Iterator<Item = ComponentId> + '_ {
        (0..self.components.len()).map(ComponentId)
    }

    pub fn node_count(&self) -> usize {
        self.platforms.len() + self.instances.len() + self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    /// Parent of a node, `None` for platforms
    pub fn parent(&self, node: NodeRef) -> Option<NodeRef> {
        match node {
            NodeRef::Platform(_) => None,
            NodeRef::Instance(id) => Some(NodeRef::Platform(self.instance(id).platform)),
            NodeRef::Component(id) => Some(NodeRef::Instance(self.component(id).instance)),
        }
    }

    /// Hierarchical display string, e.g. `"Core - EU West - API"`
    pub fn display(&self, node: NodeRef) -> &str {
        match node {
            NodeRef::Platform(id) => &self.platform(id).display,
            NodeRef::Instance(id) => &self.instance(id).display,
            NodeRef::Component(id) => &self.component(id).display,
        }
    }

    /// Normalized path key, e.g. `"core-eu-west-api"`
    pub fn normalize(&self, node: NodeRef) -> &str {
        match node {
            NodeRef::Platform(id) => &self.platform(id).normalized,
            NodeRef::Instance(id) => &self.instance(id).normalized,
            NodeRef::Component(id) => &self.component(id).normalized,
        }
    }

    /// Ancestry codes of a component
    pub fn component_path(&self, id: ComponentId) -> ComponentPath {
        let component = self.component(id);
        let instance = self.instance(component.instance);
        let platform = self.platform(instance.platform);
        ComponentPath::new(&platform.code, &instance.code, &component.code)
    }

    /// Find the component a path points at, if it is part of this tree
    pub fn resolve(&self, path: &ComponentPath) -> Option<ComponentId> {
        self.component_ids().find(|id| {
            let component = self.component(*id);
            let instance = self.instance(component.instance);
            let platform = self.platform(instance.platform);
            platform.code == path.platform
                && instance.code == path.instance
                && component.code == path.component
        })
    }
}

/// Incremental construction of a [`Hierarchy`]
///
/// Parents must be added before their children; display strings and path keys
/// are computed as each node is added.
#[derive(Debug, Default)]
pub struct HierarchyBuilder {
    hierarchy: Hierarchy,
}

impl HierarchyBuilder {
    pub fn add_platform(&mut self, name: &str, code: &str) -> PlatformId {
        let display = display_path(None, name, UNKNOWN_PLATFORM);
        let normalized = normalized_path(None, code, &display, UNKNOWN_PLATFORM_SLUG);

        let id = PlatformId(self.hierarchy.platforms.len());
        self.hierarchy.platforms.push(Platform {
            name: name.to_string(),
            code: code.to_string(),
            instances: Vec::new(),
            display,
            normalized,
        });
        id
    }

    pub fn add_instance(&mut self, platform: PlatformId, name: &str, code: &str) -> InstanceId {
        let id = InstanceId(self.hierarchy.instances.len());
        let parent = &mut self.hierarchy.platforms[platform.0];

        let display = display_path(Some(&parent.display), name, UNKNOWN_INSTANCE);
        let normalized = normalized_path(
            Some(&parent.normalized),
            code,
            &display,
            UNKNOWN_INSTANCE_SLUG,
        );
        parent.instances.push(id);

        self.hierarchy.instances.push(Instance {
            name: name.to_string(),
            code: code.to_string(),
            platform,
            components: Vec::new(),
            display,
            normalized,
        });
        id
    }

    pub fn add_component(&mut self, instance: InstanceId, name: &str, code: &str) -> ComponentId {
        let id = ComponentId(self.hierarchy.components.len());
        let parent = &mut self.hierarchy.instances[instance.0];

        let display = display_path(Some(&parent.display), name, UNKNOWN_COMPONENT);
        let normalized = normalized_path(
            Some(&parent.normalized),
            code,
            &display,
            UNKNOWN_COMPONENT_SLUG,
        );
        parent.components.push(id);

        self.hierarchy.components.push(Component {
            name: name.to_string(),
            code: code.to_string(),
            instance,
            display,
            normalized,
        });
        id
    }

    /// Finish building
    ///
    /// # Errors
    /// `WeatherError::Hierarchy` when two nodes of the same level share a
    /// normalized path key, since matching would be ambiguous.
    pub fn build(self) -> WeatherResult<Hierarchy> {
        let hierarchy = self.hierarchy;

        check_unique("platform", hierarchy.platforms.iter().map(|p| p.normalized.as_str()))?;
        check_unique("instance", hierarchy.instances.iter().map(|i| i.normalized.as_str()))?;
        check_unique(
            "component",
            hierarchy.components.iter().map(|c| c.normalized.as_str()),
        )?;

        debug!(
            platforms = hierarchy.platforms.len(),
            instances = hierarchy.instances.len(),
            components = hierarchy.components.len(),
            "Hierarchy built"
        );

        Ok(hierarchy)
    }
}

fn check_unique<'a>(level: &str, keys: impl Iterator<Item = &'a str>) -> WeatherResult<()> {
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key) {
            return Err(WeatherError::Hierarchy(format!(
                "duplicate {} path: {}",
                level, key
            )));
        }
    }
    Ok(())
}
