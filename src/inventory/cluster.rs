//! Kubernetes-backed directory
//!
//! Wraps a `kube` client and a current-thread Tokio runtime so the core can
//! treat the API server as a synchronous, read-only [`Directory`].

use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use k8s_openapi::api::core::v1::{ContainerState as ApiContainerState, ContainerStatus, Node, Pod};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, Time};
use kube::api::{Api, ListParams};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use tokio::runtime::Runtime;
use tracing::debug;

use super::{Condition, ContainerState, Directory, Entity, Locator, PlacementKey, Scope, SubUnit};

/// Read-only view of a live cluster
pub struct KubeDirectory {
    runtime: Runtime,
    client: Client,
    default_namespace: String,
}

impl KubeDirectory {
    /// Connect using an explicit kubeconfig file, or kube's standard inference
    /// (`KUBECONFIG`, `~/.kube/config`, in-cluster) when `kubeconfig` is `None`.
    pub fn connect(kubeconfig: Option<&Path>) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to start the async runtime")?;

        let config = runtime.block_on(load_config(kubeconfig))?;
        let default_namespace = config.default_namespace.clone();
        debug!(cluster_url = %config.cluster_url, namespace = %default_namespace, "loaded kubeconfig");

        // Client construction spawns its request buffer, so it needs the runtime context.
        let client = runtime
            .block_on(async move { Client::try_from(config) })
            .context("Could not initialize Kubernetes client")?;

        Ok(Self {
            runtime,
            client,
            default_namespace,
        })
    }

    /// Namespace of the active kubeconfig context (`default` when unset)
    #[must_use]
    pub fn default_namespace(&self) -> &str {
        &self.default_namespace
    }

    fn pods(&self, scope: &Scope) -> Api<Pod> {
        match scope {
            Scope::Namespace(ns) => Api::namespaced(self.client.clone(), ns),
            Scope::AllNamespaces => Api::all(self.client.clone()),
        }
    }

    fn nodes(&self) -> Api<Node> {
        Api::all(self.client.clone())
    }
}

impl Directory for KubeDirectory {
    fn get(&self, locator: &Locator) -> Result<Option<Entity>> {
        debug!(%locator, "fetching anchor");
        match locator {
            Locator::Workload { name, namespace } => {
                let api = self.pods(&Scope::Namespace(namespace.clone()));
                let pod = self
                    .runtime
                    .block_on(api.get_opt(name))
                    .with_context(|| format!("unable to fetch pod {namespace}/{name}"))?;
                Ok(pod.map(pod_entity))
            }
            Locator::Node { name } => {
                let node = self
                    .runtime
                    .block_on(self.nodes().get_opt(name))
                    .with_context(|| format!("unable to fetch node {name}"))?;
                Ok(node.map(node_entity))
            }
        }
    }

    fn list(&self, key: &PlacementKey, scope: &Scope) -> Result<Vec<Entity>> {
        match key {
            PlacementKey::NodeName(node) => {
                let selector = format!("spec.nodeName={node}");
                debug!(field_selector = %selector, ?scope, "listing pods");
                let params = ListParams::default().fields(&selector);
                let pods = self
                    .runtime
                    .block_on(self.pods(scope).list(&params))
                    .with_context(|| format!("unable to list pods on node {node}"))?;
                Ok(pods.items.into_iter().map(pod_entity).collect())
            }
            PlacementKey::Zone { label, value } => {
                let selector = format!("{label}={value}");
                debug!(label_selector = %selector, "listing nodes");
                let params = ListParams::default().labels(&selector);
                let nodes = self
                    .runtime
                    .block_on(self.nodes().list(&params))
                    .with_context(|| format!("unable to list nodes in zone {value}"))?;
                Ok(nodes.items.into_iter().map(node_entity).collect())
            }
        }
    }
}

async fn load_config(kubeconfig: Option<&Path>) -> Result<Config> {
    let Some(path) = kubeconfig else {
        return Config::infer()
            .await
            .context("Could not infer a Kubernetes client configuration");
    };

    if !path.exists() {
        bail!("kubeconfig file not found: {}", path.display());
    }
    let kubeconfig = Kubeconfig::read_from(path)
        .with_context(|| format!("Failed to read kubeconfig: {}", path.display()))?;
    Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
        .await
        .with_context(|| format!("Failed to load kubeconfig: {}", path.display()))
}

fn timestamp(time: Option<&Time>) -> Option<DateTime<Utc>> {
    time.map(|t| t.0)
}

fn base_entity(meta: ObjectMeta, mut entity: Entity) -> Entity {
    entity.creation_time = timestamp(meta.creation_timestamp.as_ref());
    entity.labels = meta.labels.unwrap_or_default();
    entity
}

fn pod_entity(pod: Pod) -> Entity {
    let name = pod.metadata.name.clone().unwrap_or_default();
    let namespace = pod.metadata.namespace.clone().unwrap_or_default();
    let mut entity = base_entity(pod.metadata, Entity::workload(&name, &namespace));

    entity.placement = pod.spec.and_then(|spec| spec.node_name);
    if let Some(status) = pod.status {
        entity.phase = status.phase.unwrap_or_default();
        entity.conditions = status
            .conditions
            .unwrap_or_default()
            .into_iter()
            .map(|c| Condition {
                kind: c.type_,
                status: c.status,
            })
            .collect();
        entity.sub_units = status
            .container_statuses
            .unwrap_or_default()
            .into_iter()
            .map(sub_unit)
            .collect();
    }
    entity
}

fn node_entity(node: Node) -> Entity {
    let name = node.metadata.name.clone().unwrap_or_default();
    let mut entity = base_entity(node.metadata, Entity::node(&name));

    if let Some(status) = node.status {
        entity.version = status
            .node_info
            .map(|info| info.kubelet_version)
            .unwrap_or_default();
        entity.conditions = status
            .conditions
            .unwrap_or_default()
            .into_iter()
            .map(|c| Condition {
                kind: c.type_,
                status: c.status,
            })
            .collect();
    }
    entity
}

fn sub_unit(status: ContainerStatus) -> SubUnit {
    SubUnit {
        state: container_state(status.state.as_ref()),
        name: status.name,
        ready: status.ready,
        restart_count: status.restart_count,
    }
}

fn container_state(state: Option<&ApiContainerState>) -> ContainerState {
    let Some(state) = state else {
        return ContainerState::Unknown;
    };
    if let Some(waiting) = &state.waiting {
        ContainerState::Waiting {
            reason: waiting.reason.clone().unwrap_or_default(),
        }
    } else if state.running.is_some() {
        ContainerState::Running
    } else if let Some(terminated) = &state.terminated {
        ContainerState::Terminated {
            reason: terminated.reason.clone().unwrap_or_default(),
        }
    } else {
        ContainerState::Unknown
    }
}
