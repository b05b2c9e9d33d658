//! Cluster and service state for the emulated container service.
//!
//! The backend maintains a mapping from cluster names to the services
//! registered in them. All state lives behind a shared lock so clones of
//! the backend observe the same emulated world.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use tracing::debug;

use stratus_core::{ApiError, ApiResult};

/// A service running inside a cluster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EcsService {
    pub service_name: String,
    pub desired_count: i32,
}

/// Internal state for a single cluster.
#[derive(Default)]
struct ClusterEntry {
    services: HashMap<String, EcsService>,
}

/// In-memory emulation of the container-service control plane.
///
/// Cheap to clone; all clones share the same state.
#[derive(Clone, Default)]
pub struct EcsBackend {
    clusters: Arc<RwLock<HashMap<String, ClusterEntry>>>,
}

impl EcsBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cluster. Creating a name that already exists leaves its
    /// services in place.
    pub fn create_cluster(&self, name: &str) {
        let mut clusters = self.clusters.write().expect("clusters lock");
        clusters.entry(name.to_string()).or_default();
        debug!(cluster = name, "cluster created");
    }

    /// Create or replace a service inside an existing cluster.
    pub fn create_service(
        &self,
        cluster: &str,
        name: &str,
        desired_count: i32,
    ) -> ApiResult<EcsService> {
        let mut clusters = self.clusters.write().expect("clusters lock");
        let entry = clusters.get_mut(cluster).ok_or(ApiError::ClusterNotFound)?;
        let service = EcsService {
            service_name: name.to_string(),
            desired_count,
        };
        entry.services.insert(name.to_string(), service.clone());
        debug!(cluster, service = name, "service created");
        Ok(service)
    }

    /// Whether a cluster with this name exists.
    pub fn cluster_exists(&self, name: &str) -> bool {
        let clusters = self.clusters.read().expect("clusters lock");
        clusters.contains_key(name)
    }

    /// Whether a service with this name exists inside the given cluster.
    pub fn service_exists(&self, cluster: &str, name: &str) -> bool {
        let clusters = self.clusters.read().expect("clusters lock");
        clusters
            .get(cluster)
            .is_some_and(|entry| entry.services.contains_key(name))
    }

    /// List all cluster names, sorted.
    pub fn list_clusters(&self) -> Vec<String> {
        let clusters = self.clusters.read().expect("clusters lock");
        let mut names: Vec<String> = clusters.keys().cloned().collect();
        names.sort();
        names
    }
}
