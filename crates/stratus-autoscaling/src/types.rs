//! Domain and wire types for the application auto scaling emulation.
//!
//! Wire types carry the provider's PascalCase field names via serde
//! renames; the same representation is used for registry storage.

use serde::{Deserialize, Serialize};

/// Suspension flags carried on a scalable target.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct SuspendedState {
    #[serde(default)]
    pub dynamic_scaling_in_suspended: bool,
    #[serde(default)]
    pub dynamic_scaling_out_suspended: bool,
    #[serde(default)]
    pub scheduled_scaling_suspended: bool,
}

/// Identity of a scalable target within one region/account scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetIdent {
    pub service_namespace: String,
    pub resource_id: String,
    pub scalable_dimension: String,
}

impl TargetIdent {
    /// Composite key for the targets table.
    pub fn table_key(&self) -> String {
        format!(
            "{}|{}|{}",
            self.service_namespace, self.resource_id, self.scalable_dimension
        )
    }
}

/// A registered scalable target.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ScalableTarget {
    pub service_namespace: String,
    pub resource_id: String,
    pub scalable_dimension: String,
    pub min_capacity: i32,
    pub max_capacity: i32,
    #[serde(rename = "RoleARN")]
    pub role_arn: String,
    pub suspended_state: SuspendedState,
    /// Unix timestamp (seconds) of the first registration.
    pub creation_time: u64,
}

impl ScalableTarget {
    pub fn ident(&self) -> TargetIdent {
        TargetIdent {
            service_namespace: self.service_namespace.clone(),
            resource_id: self.resource_id.clone(),
            scalable_dimension: self.scalable_dimension.clone(),
        }
    }

    /// Composite key for the targets table.
    pub fn table_key(&self) -> String {
        self.ident().table_key()
    }
}

// ── Request / response bodies ──────────────────────────────────────

/// RegisterScalableTarget request.
///
/// The identifying strings default to empty so a missing field reaches the
/// validator (and reports a constraint violation) instead of failing to
/// parse.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct RegisterScalableTargetRequest {
    #[serde(default)]
    pub service_namespace: String,
    #[serde(default)]
    pub resource_id: String,
    #[serde(default)]
    pub scalable_dimension: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_capacity: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_capacity: Option<i32>,
    #[serde(rename = "RoleARN", default, skip_serializing_if = "Option::is_none")]
    pub role_arn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suspended_state: Option<SuspendedState>,
}

/// RegisterScalableTarget response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegisterScalableTargetResponse {
    #[serde(rename = "ScalableTargetARN")]
    pub scalable_target_arn: String,
}

/// DescribeScalableTargets request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeScalableTargetsRequest {
    #[serde(default)]
    pub service_namespace: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scalable_dimension: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_ids: Option<Vec<String>>,
}

/// DescribeScalableTargets response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeScalableTargetsResponse {
    pub scalable_targets: Vec<ScalableTarget>,
}
