//! Cross-service resource resolution.
//!
//! After structural validation passes, namespaces whose resource ids point
//! at another emulated service get an existence check against that
//! service's state. Resolution failures carry their own error code and are
//! never merged into the validation aggregate.

use tracing::debug;

use stratus_core::{ApiError, ApiResult};
use stratus_ecs::EcsBackend;

/// Confirms that a referenced resource exists in its owning service.
pub trait ResourceResolver: Send + Sync {
    /// `Ok(())` when the reference resolves, or when the namespace carries
    /// no cross-service reference; a namespace-specific not-found error
    /// otherwise.
    fn resolve(&self, namespace: &str, resource_id: &str) -> ApiResult<()>;
}

/// Resolver backed by the emulated container service.
///
/// Only the `ecs` namespace encodes a cross-service reference
/// (`service/<cluster>/<service>`); every other namespace resolves
/// trivially.
pub struct EcsResolver {
    backend: EcsBackend,
}

impl EcsResolver {
    pub fn new(backend: EcsBackend) -> Self {
        Self { backend }
    }
}

impl ResourceResolver for EcsResolver {
    fn resolve(&self, namespace: &str, resource_id: &str) -> ApiResult<()> {
        if namespace != "ecs" {
            return Ok(());
        }
        let mut parts = resource_id.splitn(3, '/');
        let (cluster, service) = match (parts.next(), parts.next(), parts.next()) {
            (Some("service"), Some(cluster), Some(service)) => (cluster, service),
            _ => return Err(ApiError::ClusterNotFound),
        };
        if !self.backend.cluster_exists(cluster) || !self.backend.service_exists(cluster, service)
        {
            debug!(cluster, service, "ecs reference did not resolve");
            return Err(ApiError::ClusterNotFound);
        }
        Ok(())
    }
}

/// Resolver that accepts every reference. Lets the scaling service be
/// wired up without sibling emulations when only structural validation is
/// under test.
pub struct NullResolver;

impl ResourceResolver for NullResolver {
    fn resolve(&self, _namespace: &str, _resource_id: &str) -> ApiResult<()> {
        Ok(())
    }
}
