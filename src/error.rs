//! Errors surfaced by the colocation core
//!
//! Collaborator failures (API access, kubeconfig loading) travel through
//! [`NearbyError::Directory`] untouched; the core never interprets them.

use thiserror::Error;

use crate::inventory::Locator;

/// Failures produced while resolving and rendering a report
#[derive(Debug, Error)]
pub enum NearbyError {
    /// The named anchor entity does not exist in the directory
    #[error("{0} not found")]
    AnchorNotFound(Locator),

    /// The anchor exists but lacks the attribute its peers are grouped by
    #[error("unable to find {attribute} on {locator}")]
    MissingPlacementKey {
        /// The anchor that was looked up
        locator: Locator,
        /// Human-readable name of the missing attribute
        attribute: String,
    },

    /// The table renderer was handed no rows at all
    #[error("cannot render a table without rows")]
    EmptyInput,

    /// The directory collaborator failed
    #[error("inventory lookup failed")]
    Directory(#[source] anyhow::Error),
}

/// Convenience alias for results carrying a [`NearbyError`]
pub type Result<T> = std::result::Result<T, NearbyError>;
