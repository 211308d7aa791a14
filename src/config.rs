//! Settings and per-invocation configuration
//!
//! `NearbySettings` is parsed from an optional TOML file; `Invocation` is the
//! explicit, fully-resolved configuration for one command run.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::inventory::Locator;

/// Default label key carrying a node's failure domain
pub const DEFAULT_ZONE_LABEL: &str = "topology.kubernetes.io/zone";

/// Default label key prefix marking node roles
pub const DEFAULT_ROLE_PREFIX: &str = "node-role.kubernetes.io/";

/// Namespace used when nothing else names one
pub const FALLBACK_NAMESPACE: &str = "default";

/// Label keys used to group and describe nodes
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LabelSettings {
    /// Label key holding a node's zone (default: `topology.kubernetes.io/zone`)
    #[serde(default = "default_zone_label")]
    pub zone: String,
    /// Prefix of role label keys (default: `node-role.kubernetes.io/`)
    #[serde(default = "default_role_prefix")]
    pub role_prefix: String,
}

fn default_zone_label() -> String {
    DEFAULT_ZONE_LABEL.to_string()
}

fn default_role_prefix() -> String {
    DEFAULT_ROLE_PREFIX.to_string()
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            zone: default_zone_label(),
            role_prefix: default_role_prefix(),
        }
    }
}

/// Fallbacks for values not given on the command line
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct DefaultSettings {
    /// Namespace for `pods` when `--namespace` is not given.
    /// Takes precedence over the kubeconfig context namespace.
    #[serde(default)]
    pub namespace: Option<String>,
}

/// Top-level settings parsed from a TOML file
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct NearbySettings {
    /// Label configuration
    #[serde(default)]
    pub labels: LabelSettings,
    /// Defaults
    #[serde(default)]
    pub defaults: DefaultSettings,
}

impl NearbySettings {
    /// Load settings from `path`, or the defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::from_path)
    }

    /// Parse a settings file from a path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse settings content from a string
    pub fn parse(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content).context("Failed to parse settings")?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.labels.zone.trim().is_empty() {
            bail!("labels.zone cannot be empty");
        }
        if !self.labels.role_prefix.ends_with('/') {
            bail!(
                "labels.role_prefix '{}' must end with '/'",
                self.labels.role_prefix
            );
        }
        if let Some(ns) = &self.defaults.namespace {
            if ns.trim().is_empty() {
                bail!("defaults.namespace cannot be empty");
            }
        }
        Ok(())
    }
}

/// Everything one command run needs, resolved once and passed down
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Anchor to resolve
    pub locator: Locator,
    /// Widen pod queries to every namespace
    pub all_namespaces: bool,
    /// Loaded settings
    pub settings: NearbySettings,
}

/// Pick the namespace for a pod lookup.
///
/// The flag wins, then the settings default, then the kubeconfig context
/// namespace, then `default`.
#[must_use]
pub fn resolve_namespace(
    flag: Option<&str>,
    settings: &NearbySettings,
    context_namespace: Option<&str>,
) -> String {
    flag.or(settings.defaults.namespace.as_deref())
        .or(context_namespace)
        .filter(|ns| !ns.is_empty())
        .unwrap_or(FALLBACK_NAMESPACE)
        .to_string()
}
