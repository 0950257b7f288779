//! YAML route manifests.
//!
//! A manifest lists modules and their routes so that a route table can be
//! inspected, diagnosed and hot-reloaded without compiling a host application:
//!
//! ```yaml
//! resolver:
//!   trace_enabled: true
//! modules:
//!   - key: users
//!     routes:
//!       - { method: GET, path: /users, handler: list_users }
//!       - { method: GET, path: "/users/{id}", handler: get_user }
//!       - { method: POST, path: /users }
//! ```
//!
//! Conditions and hooks are code, so manifest routes never carry them.

use super::cache::RouteCache;
use super::module::RouteModule;
use super::types::RouteDescription;
use crate::matcher::TemplateMatcher;
use crate::runtime_config::ResolverConfig;
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteManifest {
    /// Optional resolver settings
    #[serde(default)]
    pub resolver: Option<ResolverConfig>,
    /// Modules in registration order
    #[serde(default)]
    pub modules: Vec<ModuleManifest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleManifest {
    pub key: String,
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub method: String,
    pub path: String,
    /// Defaults to `<method> <path>` when omitted
    #[serde(default)]
    pub handler: Option<String>,
}

impl RouteEntry {
    #[must_use]
    pub fn handler_name(&self) -> String {
        self.handler
            .clone()
            .unwrap_or_else(|| format!("{} {}", self.method.to_ascii_uppercase(), self.path))
    }
}

impl RouteManifest {
    /// Parse and validate a manifest from YAML text.
    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        let manifest: RouteManifest =
            serde_yaml::from_str(content).context("Failed to parse route manifest")?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Read, parse and validate a manifest file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read route manifest {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid route manifest {}", path.display()))
    }

    /// Module keys must be unique, every route must name a method and every
    /// template must compile.
    ///
    /// Template problems surface as [`crate::error::ResolveError::MalformedTemplate`].
    pub fn validate(&self) -> anyhow::Result<()> {
        let mut keys = HashSet::new();
        for module in &self.modules {
            if module.key.trim().is_empty() {
                bail!("module key must not be empty");
            }
            if !keys.insert(module.key.as_str()) {
                bail!("duplicate module key '{}'", module.key);
            }
            for route in &module.routes {
                if route.method.trim().is_empty() {
                    bail!(
                        "route '{}' in module '{}' has no method",
                        route.path,
                        module.key
                    );
                }
                TemplateMatcher::validate(&route.path)?;
            }
        }
        Ok(())
    }

    /// Resolver settings from the manifest, or the defaults.
    #[must_use]
    pub fn resolver_config(&self) -> ResolverConfig {
        self.resolver.unwrap_or_default()
    }

    #[must_use]
    pub fn to_modules(&self) -> Vec<RouteModule> {
        self.modules
            .iter()
            .map(|m| {
                m.routes.iter().fold(RouteModule::new(m.key.as_str()), |module, r| {
                    module.route(RouteDescription::new(
                        r.method.trim(),
                        r.path.as_str(),
                        r.handler_name(),
                    ))
                })
            })
            .collect()
    }

    #[must_use]
    pub fn to_cache(&self) -> RouteCache {
        RouteCache::new(self.to_modules())
    }
}
