//! Namespace compatibility matrix.
//!
//! Maps each service namespace to the shape its resource ids must take and
//! the scalable dimensions it supports, per the provider's public API
//! reference. Compiled once at first use, read-only thereafter. Lookups
//! answer `None` for unknown namespaces; callers decide how to report.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

/// Validation rule for one namespace.
pub struct ValidationRule {
    /// Scalable dimensions this namespace supports.
    pub dimensions: &'static [&'static str],
    /// Resource-id pattern as written in the API reference.
    pub shape_pattern: &'static str,
    shape: Regex,
}

impl ValidationRule {
    /// Whether the resource id matches this namespace's required shape.
    pub fn matches_shape(&self, resource_id: &str) -> bool {
        self.shape.is_match(resource_id)
    }
}

/// (namespace, dimensions, resource-id pattern), in reference order.
const RULES: &[(&str, &[&str], &str)] = &[
    ("ecs", &["ecs:service:DesiredCount"], r"^service/[^/]+/[^/]+$"),
    (
        "elasticmapreduce",
        &["elasticmapreduce:instancegroup:InstanceCount"],
        r"^instancegroup/[^/]+/[^/]+$",
    ),
    (
        "ec2",
        &["ec2:spot-fleet-request:TargetCapacity"],
        r"^spot-fleet-request/sfr-[0-9a-fA-F-]+$",
    ),
    (
        "appstream",
        &["appstream:fleet:DesiredCapacity"],
        r"^fleet/[^/]+$",
    ),
    (
        "dynamodb",
        &[
            "dynamodb:table:ReadCapacityUnits",
            "dynamodb:table:WriteCapacityUnits",
            "dynamodb:index:ReadCapacityUnits",
            "dynamodb:index:WriteCapacityUnits",
        ],
        r"^table/[^/]+(/index/[^/]+)?$",
    ),
    (
        "rds",
        &["rds:cluster:ReadReplicaCount", "rds:cluster:Capacity"],
        r"^cluster:[^:]+$",
    ),
    (
        "sagemaker",
        &["sagemaker:variant:DesiredInstanceCount"],
        r"^endpoint/[^/]+/variant/[^/]+$",
    ),
    (
        "custom-resource",
        &["custom-resource:ResourceType:Property"],
        r"^.+$",
    ),
    (
        "comprehend",
        &[
            "comprehend:document-classifier-endpoint:DesiredInferenceUnits",
            "comprehend:entity-recognizer-endpoint:DesiredInferenceUnits",
        ],
        r"^arn:aws:comprehend:.+$",
    ),
    (
        "lambda",
        &["lambda:function:ProvisionedConcurrency"],
        r"^function:[^:]+(:[^:]+)?$",
    ),
    (
        "cassandra",
        &[
            "cassandra:table:ReadCapacityUnits",
            "cassandra:table:WriteCapacityUnits",
        ],
        r"^keyspace/[^/]+/table/[^/]+$",
    ),
    (
        "kafka",
        &["kafka:broker-storage:VolumeSize"],
        r"^arn:aws:kafka:.+$",
    ),
];

static MATRIX: LazyLock<HashMap<&'static str, ValidationRule>> = LazyLock::new(|| {
    RULES
        .iter()
        .map(|&(namespace, dimensions, pattern)| {
            let rule = ValidationRule {
                dimensions,
                shape_pattern: pattern,
                shape: Regex::new(pattern).expect("matrix pattern"),
            };
            (namespace, rule)
        })
        .collect()
});

/// Look up the full rule for a namespace.
pub fn rule(namespace: &str) -> Option<&'static ValidationRule> {
    MATRIX.get(namespace)
}

/// Dimensions permitted for a namespace. `None` means the namespace is
/// unknown.
pub fn allowed_dimensions(namespace: &str) -> Option<&'static [&'static str]> {
    MATRIX.get(namespace).map(|r| r.dimensions)
}

/// Resource-id shape for a namespace. `None` means the namespace is
/// unknown.
pub fn resource_shape(namespace: &str) -> Option<&'static Regex> {
    MATRIX.get(namespace).map(|r| &r.shape)
}

/// All known namespaces, in reference order.
pub fn namespaces() -> impl Iterator<Item = &'static str> {
    RULES.iter().map(|&(namespace, _, _)| namespace)
}

/// The full dimension vocabulary across every namespace, in reference
/// order.
pub fn all_dimensions() -> impl Iterator<Item = &'static str> {
    RULES.iter().flat_map(|&(_, dimensions, _)| dimensions.iter().copied())
}

/// Whether any namespace defines this dimension value.
pub fn is_known_dimension(dimension: &str) -> bool {
    all_dimensions().any(|d| d == dimension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_namespace_has_dimensions() {
        let dims = allowed_dimensions("ecs").unwrap();
        assert_eq!(dims, &["ecs:service:DesiredCount"]);
    }

    #[test]
    fn unknown_namespace_answers_none() {
        assert!(allowed_dimensions("banana").is_none());
        assert!(resource_shape("banana").is_none());
        assert!(rule("banana").is_none());
    }

    #[test]
    fn ecs_shape_requires_service_prefix() {
        let rule = rule("ecs").unwrap();
        assert!(rule.matches_shape("service/default/web"));
        assert!(!rule.matches_shape("banana/default/web"));
        assert!(!rule.matches_shape("service/default"));
        assert!(!rule.matches_shape("service/default/web/extra"));
    }

    #[test]
    fn dynamodb_shape_accepts_table_and_index() {
        let rule = rule("dynamodb").unwrap();
        assert!(rule.matches_shape("table/orders"));
        assert!(rule.matches_shape("table/orders/index/by-user"));
        assert!(!rule.matches_shape("orders"));
    }

    #[test]
    fn rds_shape_is_colon_scoped() {
        let rule = rule("rds").unwrap();
        assert!(rule.matches_shape("cluster:my-db"));
        assert!(!rule.matches_shape("service/default/web"));
    }

    #[test]
    fn lambda_shape_allows_qualifier() {
        let rule = rule("lambda").unwrap();
        assert!(rule.matches_shape("function:checkout"));
        assert!(rule.matches_shape("function:checkout:prod"));
        assert!(!rule.matches_shape("checkout"));
    }

    #[test]
    fn dimension_vocabulary_spans_namespaces() {
        assert!(is_known_dimension("ecs:service:DesiredCount"));
        assert!(is_known_dimension("dynamodb:index:WriteCapacityUnits"));
        assert!(!is_known_dimension("bar"));
    }

    #[test]
    fn namespaces_lists_reference_order() {
        let all: Vec<&str> = namespaces().collect();
        assert_eq!(all.first(), Some(&"ecs"));
        assert!(all.contains(&"rds"));
        assert_eq!(all.len(), RULES.len());
    }
}
