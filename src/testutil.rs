//! Shared test utilities
//!
//! Common helpers used across test modules. Only compiled in test builds.

use chrono::{DateTime, TimeZone, Utc};

use crate::inventory::{Condition, ContainerState, Entity, SubUnit};

/// Label key carrying a node's zone in test fixtures
pub const ZONE_LABEL: &str = "topology.kubernetes.io/zone";

/// Fixed "now" used by report tests so ages are deterministic
#[must_use]
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

/// Create a running pod with one ready container, created an hour before [`test_now`].
#[must_use]
pub fn make_test_pod(name: &str, namespace: &str, node: Option<&str>) -> Entity {
    let mut pod = Entity::workload(name, namespace);
    pod.placement = node.map(str::to_string);
    pod.phase = "Running".to_string();
    pod.creation_time = Some(test_now() - chrono::Duration::hours(1));
    pod.sub_units = vec![SubUnit {
        name: "app".to_string(),
        ready: true,
        restart_count: 0,
        state: ContainerState::Running,
    }];
    pod
}

/// Create a Ready node on kubelet 1.19.10, created an hour before [`test_now`].
///
/// The zone label is only set when `zone` is given.
#[must_use]
pub fn make_test_node(name: &str, zone: Option<&str>) -> Entity {
    let mut node = Entity::node(name);
    if let Some(zone) = zone {
        node.labels.insert(ZONE_LABEL.to_string(), zone.to_string());
    }
    node.creation_time = Some(test_now() - chrono::Duration::hours(1));
    node.conditions = vec![Condition::new("Ready", "True")];
    node.version = "1.19.10".to_string();
    node
}
