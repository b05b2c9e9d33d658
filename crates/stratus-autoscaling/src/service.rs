//! Scaling service — orchestrates registration and description.
//!
//! Per-request pipeline: structural validation first (aggregating every
//! violation), then cross-service resolution for namespaces that need it,
//! and only then the registry write. Rejected requests never touch the
//! registry.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use stratus_core::{ApiResult, DEFAULT_ACCOUNT_ID};

use crate::registry::TargetRegistry;
use crate::resolver::ResourceResolver;
use crate::types::{
    DescribeScalableTargetsRequest, DescribeScalableTargetsResponse,
    RegisterScalableTargetRequest, RegisterScalableTargetResponse, ScalableTarget, TargetIdent,
};
use crate::validate::{self, Violation};

/// Emulated application auto scaling control plane for one region/account
/// scope.
pub struct ScalingService {
    region: String,
    account_id: String,
    registry: TargetRegistry,
    resolver: Arc<dyn ResourceResolver>,
}

impl ScalingService {
    /// Build a service with injected registry and resolver.
    pub fn new(
        region: &str,
        registry: TargetRegistry,
        resolver: Arc<dyn ResourceResolver>,
    ) -> Self {
        Self {
            region: region.to_string(),
            account_id: DEFAULT_ACCOUNT_ID.to_string(),
            registry,
            resolver,
        }
    }

    /// Register a new scalable target or update an existing one (upsert).
    pub fn register_scalable_target(
        &self,
        req: RegisterScalableTargetRequest,
    ) -> ApiResult<RegisterScalableTargetResponse> {
        let mut violations = validate::validate(
            &req.service_namespace,
            Some(&req.resource_id),
            Some(&req.scalable_dimension),
        );

        let ident = TargetIdent {
            service_namespace: req.service_namespace.clone(),
            resource_id: req.resource_id.clone(),
            scalable_dimension: req.scalable_dimension.clone(),
        };
        let existing = self.registry.get(&ident)?;

        // A first registration must pin both capacity bounds; an update may
        // omit them and keep the stored values.
        if existing.is_none() {
            if req.min_capacity.is_none() {
                violations.push(capacity_null_violation("minCapacity"));
            }
            if req.max_capacity.is_none() {
                violations.push(capacity_null_violation("maxCapacity"));
            }
        }
        if let (Some(min), Some(max)) = (req.min_capacity, req.max_capacity)
            && min > max
        {
            violations.push(Violation::new(
                "minCapacity",
                format!(
                    "Value '{min}' at 'minCapacity' failed to satisfy constraint: \
                     Member must have value less than or equal to {max}"
                ),
            ));
        }

        validate::reject(violations)?;
        self.resolver
            .resolve(&req.service_namespace, &req.resource_id)?;

        let target = match existing {
            Some(current) => ScalableTarget {
                service_namespace: ident.service_namespace.clone(),
                resource_id: ident.resource_id.clone(),
                scalable_dimension: ident.scalable_dimension.clone(),
                min_capacity: req.min_capacity.unwrap_or(current.min_capacity),
                max_capacity: req.max_capacity.unwrap_or(current.max_capacity),
                role_arn: req.role_arn.unwrap_or(current.role_arn),
                suspended_state: req.suspended_state.unwrap_or(current.suspended_state),
                creation_time: current.creation_time,
            },
            None => ScalableTarget {
                service_namespace: ident.service_namespace.clone(),
                resource_id: ident.resource_id.clone(),
                scalable_dimension: ident.scalable_dimension.clone(),
                min_capacity: req.min_capacity.unwrap_or_default(),
                max_capacity: req.max_capacity.unwrap_or_default(),
                role_arn: req
                    .role_arn
                    .unwrap_or_else(|| self.service_linked_role_arn(&ident.service_namespace)),
                suspended_state: req.suspended_state.unwrap_or_default(),
                creation_time: epoch_secs(),
            },
        };
        self.registry.upsert(&target)?;
        debug!(
            namespace = %ident.service_namespace,
            resource = %ident.resource_id,
            "scalable target registered"
        );

        Ok(RegisterScalableTargetResponse {
            scalable_target_arn: self.target_arn(&ident),
        })
    }

    /// List registered targets in a namespace, narrowed by the optional
    /// dimension and resource-id filters.
    pub fn describe_scalable_targets(
        &self,
        req: DescribeScalableTargetsRequest,
    ) -> ApiResult<DescribeScalableTargetsResponse> {
        validate::reject(validate::validate(
            &req.service_namespace,
            None,
            req.scalable_dimension.as_deref(),
        ))?;

        let targets = self.registry.query(
            &req.service_namespace,
            req.scalable_dimension.as_deref(),
            req.resource_ids.as_deref(),
        )?;
        Ok(DescribeScalableTargetsResponse {
            scalable_targets: targets,
        })
    }

    fn target_arn(&self, ident: &TargetIdent) -> String {
        format!(
            "arn:aws:application-autoscaling:{}:{}:scalable-target/{}/{}/{}",
            self.region,
            self.account_id,
            ident.service_namespace,
            ident.resource_id,
            ident.scalable_dimension
        )
    }

    fn service_linked_role_arn(&self, namespace: &str) -> String {
        format!(
            "arn:aws:iam::{}:role/aws-service-role/application-autoscaling.amazonaws.com\
             /AWSServiceRoleForApplicationAutoScaling_{namespace}",
            self.account_id
        )
    }
}

fn capacity_null_violation(field: &'static str) -> Violation {
    Violation::new(
        field,
        format!("Value null at '{field}' failed to satisfy constraint: Member must not be null"),
    )
}

fn epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
