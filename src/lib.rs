//! kubectl-nearby - find what runs next to a pod or node
//!
//! Given a pod, lists the pods scheduled onto the same node; given a node,
//! lists the nodes sharing its zone label. The cluster is read through the
//! [`inventory::Directory`] trait, so the core runs unchanged against a live
//! API server or an in-memory fixture.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod error;
pub mod inventory;
pub mod nearby;
pub mod output;

#[cfg(test)]
pub mod testutil;

// Re-export commonly used types
pub use config::{Invocation, NearbySettings};
pub use error::NearbyError;
pub use inventory::{Directory, Entity, InMemoryDirectory, KubeDirectory, Locator};
pub use nearby::{build_report, run, ReportContext, ReportKind, Resolver};
pub use output::{format_age, render_columns};
