//! Colocation core
//!
//! Resolves an anchor pod or node to its neighbours, derives display fields
//! and renders the final report.

pub mod report;
pub mod resolver;
pub mod status;

use chrono::{DateTime, Utc};

use crate::config::Invocation;
use crate::error::Result;
use crate::inventory::{Directory, EntityKind};

pub use report::{build_report, build_rows, ReportContext, ReportKind};
pub use resolver::Resolver;
pub use status::{classify, node_status};

/// Resolve the invocation's anchor and render its report.
///
/// `now` is the reference time for ages; the binary passes the wall clock.
pub fn run(
    invocation: &Invocation,
    directory: &dyn Directory,
    now: DateTime<Utc>,
) -> Result<String> {
    let labels = &invocation.settings.labels;
    let resolver = Resolver::new(directory, &labels.zone);
    let entities = resolver.resolve(&invocation.locator, invocation.all_namespaces)?;

    let kind = match invocation.locator.kind() {
        EntityKind::Workload => ReportKind::Workloads,
        EntityKind::Node => ReportKind::Nodes,
    };
    let ctx = ReportContext {
        now,
        zone_label: &labels.zone,
        role_prefix: &labels.role_prefix,
    };
    build_report(kind, &entities, &ctx)
}
