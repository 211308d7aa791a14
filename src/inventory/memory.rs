//! In-memory directory backed by a fixed entity list
//!
//! Applies the same matching rules as the API server's field and label
//! selectors, preserving insertion order.

use anyhow::Result;

use super::{Directory, Entity, Locator, PlacementKey, Scope};

/// A [`Directory`] over a snapshot of entities held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    entities: Vec<Entity>,
}

impl InMemoryDirectory {
    /// Create a directory from a list of entities
    #[must_use]
    pub const fn new(entities: Vec<Entity>) -> Self {
        Self { entities }
    }

    /// Add an entity, keeping insertion order
    pub fn insert(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Builder-style variant of [`Self::insert`]
    #[must_use]
    pub fn with(mut self, entity: Entity) -> Self {
        self.insert(entity);
        self
    }
}

impl Directory for InMemoryDirectory {
    fn get(&self, locator: &Locator) -> Result<Option<Entity>> {
        Ok(self.entities.iter().find(|e| e.matches(locator)).cloned())
    }

    fn list(&self, key: &PlacementKey, scope: &Scope) -> Result<Vec<Entity>> {
        Ok(self
            .entities
            .iter()
            .filter(|e| e.has_placement(key) && scope.admits(&e.namespace))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{make_test_node, make_test_pod};

    fn fixture() -> InMemoryDirectory {
        InMemoryDirectory::default()
            .with(make_test_pod("web-1", "shop", Some("node-a-1")))
            .with(make_test_pod("db-1", "billing", Some("node-a-1")))
            .with(make_test_pod("web-2", "shop", Some("node-b-1")))
            .with(make_test_node("node-a-1", Some("us-east4-a")))
            .with(make_test_node("node-b-1", Some("us-east4-b")))
    }

    #[test]
    fn test_get_existing_pod() {
        let dir = fixture();
        let pod = dir.get(&Locator::workload("web-1", "shop")).unwrap();
        assert_eq!(pod.unwrap().name, "web-1");
    }

    #[test]
    fn test_get_wrong_namespace_is_none() {
        let dir = fixture();
        assert!(dir.get(&Locator::workload("web-1", "billing")).unwrap().is_none());
    }

    #[test]
    fn test_get_does_not_confuse_pods_and_nodes() {
        let dir = fixture();
        assert!(dir.get(&Locator::node("web-1")).unwrap().is_none());
    }

    #[test]
    fn test_list_by_node_name_in_namespace() {
        let dir = fixture();
        let key = PlacementKey::NodeName("node-a-1".to_string());
        let pods = dir
            .list(&key, &Scope::Namespace("shop".to_string()))
            .unwrap();
        let names: Vec<&str> = pods.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["web-1"]);
    }

    #[test]
    fn test_list_by_node_name_all_namespaces_keeps_order() {
        let dir = fixture();
        let key = PlacementKey::NodeName("node-a-1".to_string());
        let pods = dir.list(&key, &Scope::AllNamespaces).unwrap();
        let names: Vec<&str> = pods.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["web-1", "db-1"]);
    }

    #[test]
    fn test_list_by_zone_only_returns_nodes() {
        let dir = fixture();
        let key = PlacementKey::Zone {
            label: "topology.kubernetes.io/zone".to_string(),
            value: "us-east4-a".to_string(),
        };
        let nodes = dir.list(&key, &Scope::AllNamespaces).unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].name, "node-a-1");
    }

    #[test]
    fn test_empty_directory_finds_nothing() {
        let dir = InMemoryDirectory::default();
        assert!(dir.get(&Locator::node("node-a-1")).unwrap().is_none());
        let key = PlacementKey::NodeName("node-a-1".to_string());
        assert!(dir.list(&key, &Scope::AllNamespaces).unwrap().is_empty());
    }
}
