//! Inventory model and directory access
//!
//! Pods and nodes are both represented as [`Entity`] values. The
//! [`Directory`] trait is the only way the core reads the inventory, so the
//! Kubernetes-backed and in-memory sources are interchangeable.

pub mod cluster;
pub mod memory;

use std::collections::BTreeMap;
use std::fmt;

use anyhow::Result;
use chrono::{DateTime, Utc};

pub use cluster::KubeDirectory;
pub use memory::InMemoryDirectory;

/// Which kind of inventory item an entity or locator refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A pod (workload instance)
    Workload,
    /// A cluster node
    Node,
}

/// Key used to look up the anchor entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// A pod, addressed by name within a namespace
    Workload {
        /// Pod name
        name: String,
        /// Namespace the pod lives in
        namespace: String,
    },
    /// A node, addressed by name
    Node {
        /// Node name
        name: String,
    },
}

impl Locator {
    /// Locator for a pod
    #[must_use]
    pub fn workload(name: &str, namespace: &str) -> Self {
        Self::Workload {
            name: name.to_string(),
            namespace: namespace.to_string(),
        }
    }

    /// Locator for a node
    #[must_use]
    pub fn node(name: &str) -> Self {
        Self::Node {
            name: name.to_string(),
        }
    }

    /// Kind of entity this locator addresses
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Workload { .. } => EntityKind::Workload,
            Self::Node { .. } => EntityKind::Node,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Workload { name, namespace } => write!(f, "pod {namespace}/{name}"),
            Self::Node { name } => write!(f, "node {name}"),
        }
    }
}

/// Grouping value shared by colocated entities
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementKey {
    /// Pods scheduled onto the named node
    NodeName(String),
    /// Nodes carrying `label=value`
    Zone {
        /// Label key holding the zone
        label: String,
        /// Zone value
        value: String,
    },
}

impl fmt::Display for PlacementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeName(node) => write!(f, "spec.nodeName={node}"),
            Self::Zone { label, value } => write!(f, "{label}={value}"),
        }
    }
}

/// Namespace restriction for workload queries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Only entities in this namespace
    Namespace(String),
    /// Any namespace; node queries always use this
    AllNamespaces,
}

impl Scope {
    /// Returns true if an entity in `namespace` falls inside this scope
    #[must_use]
    pub fn admits(&self, namespace: &str) -> bool {
        match self {
            Self::Namespace(ns) => ns == namespace,
            Self::AllNamespaces => true,
        }
    }
}

/// A `{type, status}` condition as reported by the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    /// Condition type, e.g. `Ready`
    pub kind: String,
    /// `True`, `False` or `Unknown`
    pub status: String,
}

impl Condition {
    /// Build a condition from its type and status
    #[must_use]
    pub fn new(kind: &str, status: &str) -> Self {
        Self {
            kind: kind.to_string(),
            status: status.to_string(),
        }
    }
}

/// Observed state of a single container
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ContainerState {
    /// Waiting to start, with the reason reported by the kubelet
    Waiting {
        /// e.g. `CrashLoopBackOff`, `ContainerCreating`
        reason: String,
    },
    /// Currently running
    Running,
    /// Exited, with its termination reason
    Terminated {
        /// e.g. `Completed`, `Error`, `OOMKilled`
        reason: String,
    },
    /// No state reported yet
    #[default]
    Unknown,
}

/// One container of a pod
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubUnit {
    /// Container name
    pub name: String,
    /// Readiness probe result
    pub ready: bool,
    /// Number of restarts so far
    pub restart_count: i32,
    /// Current state
    pub state: ContainerState,
}

/// One inventory item, either a pod or a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    /// What this entity is
    pub kind: EntityKind,
    /// Name, unique within its namespace (or cluster for nodes)
    pub name: String,
    /// Namespace; empty for nodes
    pub namespace: String,
    /// Labels, sorted by key
    pub labels: BTreeMap<String, String>,
    /// Node the pod is scheduled onto; `None` for unscheduled pods and nodes
    pub placement: Option<String>,
    /// Creation timestamp
    pub creation_time: Option<DateTime<Utc>>,
    /// Pod phase (`Pending`, `Running`, ...); empty for nodes
    pub phase: String,
    /// Conditions in API order
    pub conditions: Vec<Condition>,
    /// Containers in API order; empty for nodes
    pub sub_units: Vec<SubUnit>,
    /// Kubelet version for nodes; empty for pods
    pub version: String,
}

impl Entity {
    /// An empty pod entity with the given name and namespace
    #[must_use]
    pub fn workload(name: &str, namespace: &str) -> Self {
        Self {
            kind: EntityKind::Workload,
            name: name.to_string(),
            namespace: namespace.to_string(),
            labels: BTreeMap::new(),
            placement: None,
            creation_time: None,
            phase: String::new(),
            conditions: Vec::new(),
            sub_units: Vec::new(),
            version: String::new(),
        }
    }

    /// An empty node entity with the given name
    #[must_use]
    pub fn node(name: &str) -> Self {
        Self {
            kind: EntityKind::Node,
            ..Self::workload(name, "")
        }
    }

    /// Returns true if this entity is addressed by `locator`
    #[must_use]
    pub fn matches(&self, locator: &Locator) -> bool {
        match locator {
            Locator::Workload { name, namespace } => {
                self.kind == EntityKind::Workload
                    && &self.name == name
                    && &self.namespace == namespace
            }
            Locator::Node { name } => self.kind == EntityKind::Node && &self.name == name,
        }
    }

    /// Returns true if this entity carries the given placement key
    #[must_use]
    pub fn has_placement(&self, key: &PlacementKey) -> bool {
        match key {
            PlacementKey::NodeName(node) => {
                self.kind == EntityKind::Workload && self.placement.as_deref() == Some(node.as_str())
            }
            PlacementKey::Zone { label, value } => {
                self.kind == EntityKind::Node && self.label(label) == Some(value.as_str())
            }
        }
    }

    /// Value of a label, if set
    #[must_use]
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }
}

/// Read-only access to the cluster inventory
///
/// Implementations report collaborator failures as opaque `anyhow` errors;
/// a missing entity is `Ok(None)`, not an error.
pub trait Directory {
    /// Fetch the entity addressed by `locator`
    fn get(&self, locator: &Locator) -> Result<Option<Entity>>;

    /// List every entity carrying `key`, restricted to `scope`, in source order
    fn list(&self, key: &PlacementKey, scope: &Scope) -> Result<Vec<Entity>>;
}
