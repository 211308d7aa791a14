//! Colocation resolution
//!
//! Turns one named anchor into the set of entities sharing its placement:
//! pods on the same node, or nodes in the same zone.

use tracing::{debug, info};

use crate::error::{NearbyError, Result};
use crate::inventory::{Directory, Entity, EntityKind, Locator, PlacementKey, Scope};

/// Resolves anchors against a [`Directory`]
pub struct Resolver<'a> {
    directory: &'a dyn Directory,
    zone_label: &'a str,
}

impl<'a> Resolver<'a> {
    /// Create a resolver reading from `directory`, grouping nodes by `zone_label`
    #[must_use]
    pub fn new(directory: &'a dyn Directory, zone_label: &'a str) -> Self {
        Self {
            directory,
            zone_label,
        }
    }

    /// Find every entity colocated with the one addressed by `locator`.
    ///
    /// Workload queries are limited to the anchor's namespace unless
    /// `all_namespaces` is set; node queries are always cluster-wide. The
    /// result keeps the directory's order and always contains the anchor.
    pub fn resolve(&self, locator: &Locator, all_namespaces: bool) -> Result<Vec<Entity>> {
        let anchor = self
            .directory
            .get(locator)
            .map_err(NearbyError::Directory)?
            .ok_or_else(|| NearbyError::AnchorNotFound(locator.clone()))?;

        let key = self.placement_key(&anchor, locator)?;
        let scope = match anchor.kind {
            EntityKind::Workload if !all_namespaces => Scope::Namespace(anchor.namespace.clone()),
            _ => Scope::AllNamespaces,
        };
        debug!(%locator, %key, ?scope, "resolving colocated entities");

        let mut matches = self
            .directory
            .list(&key, &scope)
            .map_err(NearbyError::Directory)?;

        // The list may lag behind the get; the anchor still belongs in its own result.
        if !matches.iter().any(|e| e.matches(locator)) {
            debug!(%locator, "anchor missing from listing, adding it");
            matches.insert(0, anchor);
        }

        info!(%locator, count = matches.len(), "resolved colocated entities");
        Ok(matches)
    }

    /// Derive the grouping key of an anchor
    pub fn placement_key(&self, anchor: &Entity, locator: &Locator) -> Result<PlacementKey> {
        match anchor.kind {
            EntityKind::Workload => anchor
                .placement
                .as_ref()
                .filter(|node| !node.is_empty())
                .map(|node| PlacementKey::NodeName(node.clone()))
                .ok_or_else(|| NearbyError::MissingPlacementKey {
                    locator: locator.clone(),
                    attribute: "an assigned node".to_string(),
                }),
            EntityKind::Node => anchor
                .label(self.zone_label)
                .map(|zone| PlacementKey::Zone {
                    label: self.zone_label.to_string(),
                    value: zone.to_string(),
                })
                .ok_or_else(|| NearbyError::MissingPlacementKey {
                    locator: locator.clone(),
                    attribute: format!("label '{}'", self.zone_label),
                }),
        }
    }
}
