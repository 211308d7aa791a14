//! Report assembly
//!
//! Turns resolved entities into display rows and renders them as a table.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::status::{classify, node_status};
use crate::error::Result;
use crate::inventory::{Entity, SubUnit};
use crate::output::{age_since, render_columns};

/// Placeholder for an empty role list
const NO_ROLES: &str = "<none>";

/// Placeholder for a missing zone label
const UNKNOWN_ZONE: &str = "<unknown>";

/// Which report to build; each kind declares its own columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Pods sharing a node
    Workloads,
    /// Nodes sharing a zone
    Nodes,
}

impl ReportKind {
    /// Header row for this report
    #[must_use]
    pub const fn header(self) -> &'static [&'static str] {
        match self {
            Self::Workloads => &["NAMESPACE", "NAME", "READY", "STATUS", "RESTARTS", "AGE"],
            Self::Nodes => &["NAME", "STATUS", "ROLES", "AGE", "VERSION", "ZONE"],
        }
    }
}

/// Inputs shared by every row of a report
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    /// Reference time for ages
    pub now: DateTime<Utc>,
    /// Label key holding a node's zone
    pub zone_label: &'a str,
    /// Label key prefix marking node roles
    pub role_prefix: &'a str,
}

/// Header plus one row per entity, in input order
#[must_use]
pub fn build_rows(
    kind: ReportKind,
    entities: &[Entity],
    ctx: &ReportContext<'_>,
) -> Vec<Vec<String>> {
    let header: Vec<String> = kind.header().iter().map(ToString::to_string).collect();
    let mut rows = Vec::with_capacity(entities.len() + 1);
    rows.push(header);
    rows.extend(entities.iter().map(|entity| match kind {
        ReportKind::Workloads => workload_row(entity, ctx),
        ReportKind::Nodes => node_row(entity, ctx),
    }));
    rows
}

/// Build and render a report as aligned text
pub fn build_report(
    kind: ReportKind,
    entities: &[Entity],
    ctx: &ReportContext<'_>,
) -> Result<String> {
    render_columns(&build_rows(kind, entities, ctx))
}

fn workload_row(pod: &Entity, ctx: &ReportContext<'_>) -> Vec<String> {
    let states: Vec<_> = pod.sub_units.iter().map(|c| c.state.clone()).collect();
    vec![
        pod.namespace.clone(),
        pod.name.clone(),
        readiness(&pod.sub_units),
        classify(&pod.phase, &states),
        restart_total(&pod.sub_units).to_string(),
        age_since(pod.creation_time, ctx.now),
    ]
}

fn node_row(node: &Entity, ctx: &ReportContext<'_>) -> Vec<String> {
    vec![
        node.name.clone(),
        node_status(&node.conditions),
        roles(&node.labels, ctx.role_prefix),
        age_since(node.creation_time, ctx.now),
        node.version.clone(),
        node.label(ctx.zone_label).unwrap_or(UNKNOWN_ZONE).to_string(),
    ]
}

/// `ready/total` container count
#[must_use]
pub fn readiness(containers: &[SubUnit]) -> String {
    let ready = containers.iter().filter(|c| c.ready).count();
    format!("{ready}/{}", containers.len())
}

/// Sum of container restarts
#[must_use]
pub fn restart_total(containers: &[SubUnit]) -> i64 {
    containers.iter().map(|c| i64::from(c.restart_count)).sum()
}

/// Comma-separated roles taken from `<prefix><role>` label keys, or `<none>`
#[must_use]
pub fn roles(labels: &BTreeMap<String, String>, prefix: &str) -> String {
    let roles: Vec<&str> = labels
        .keys()
        .filter_map(|key| key.strip_prefix(prefix))
        .filter(|role| !role.is_empty() && !role.contains('/'))
        .collect();
    if roles.is_empty() {
        NO_ROLES.to_string()
    } else {
        roles.join(",")
    }
}
