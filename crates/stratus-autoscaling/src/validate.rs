//! Request parameter validation and error aggregation.
//!
//! Checks run independently and never short-circuit: every failing check
//! contributes one violation, reported in the order namespace, dimension,
//! resource id. If the namespace is unknown the per-namespace checks have
//! no comparison basis and are skipped; the dimension is then checked
//! against the global vocabulary instead, so a garbage dimension still
//! reports alongside the unknown namespace.

use stratus_core::{ApiError, ApiResult};

use crate::matrix;

/// One failed check: the request field at fault and the constraint text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

impl Violation {
    pub fn new(field: &'static str, message: String) -> Self {
        Self { field, message }
    }
}

fn enum_set(values: impl Iterator<Item = &'static str>) -> String {
    values.collect::<Vec<_>>().join(", ")
}

fn namespace_violation(namespace: &str) -> Violation {
    Violation::new(
        "serviceNamespace",
        format!(
            "Value '{namespace}' at 'serviceNamespace' failed to satisfy constraint: \
             Member must satisfy enum value set: [{}]",
            enum_set(matrix::namespaces())
        ),
    )
}

fn dimension_violation(dimension: &str) -> Violation {
    Violation::new(
        "scalableDimension",
        format!(
            "Value '{dimension}' at 'scalableDimension' failed to satisfy constraint: \
             Member must satisfy enum value set: [{}]",
            enum_set(matrix::all_dimensions())
        ),
    )
}

fn resource_id_violation(resource_id: &str, pattern: &str) -> Violation {
    Violation::new(
        "resourceId",
        format!(
            "Value '{resource_id}' at 'resourceId' failed to satisfy constraint: \
             Member must satisfy regular expression pattern: {pattern}"
        ),
    )
}

/// Validate the identifying parameters of one request.
///
/// `resource_id` and `dimension` are optional because the describe
/// operation omits them; absent fields contribute no violations.
pub fn validate(
    namespace: &str,
    resource_id: Option<&str>,
    dimension: Option<&str>,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    match matrix::rule(namespace) {
        Some(rule) => {
            if let Some(dim) = dimension
                && !rule.dimensions.contains(&dim)
            {
                violations.push(dimension_violation(dim));
            }
            if let Some(rid) = resource_id
                && !rule.matches_shape(rid)
            {
                violations.push(resource_id_violation(rid, rule.shape_pattern));
            }
        }
        None => {
            violations.push(namespace_violation(namespace));
            if let Some(dim) = dimension
                && !matrix::is_known_dimension(dim)
            {
                violations.push(dimension_violation(dim));
            }
        }
    }

    violations
}

/// Render violations into the aggregated provider message.
///
/// Returns `None` when there is nothing to report.
pub fn format_violations(violations: &[Violation]) -> Option<String> {
    if violations.is_empty() {
        return None;
    }
    let noun = if violations.len() == 1 { "error" } else { "errors" };
    let joined = violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    Some(format!(
        "{} validation {noun} detected: {joined}",
        violations.len()
    ))
}

/// Fail with the aggregated validation error if any violations were
/// collected.
pub fn reject(violations: Vec<Violation>) -> ApiResult<()> {
    match format_violations(&violations) {
        Some(message) => Err(ApiError::Validation(message)),
        None => Ok(()),
    }
}

/// True when the identifying parameters are mutually consistent; the
/// aggregated validation failure otherwise.
pub fn target_params_are_valid(
    namespace: &str,
    resource_id: &str,
    dimension: &str,
) -> ApiResult<bool> {
    reject(validate(namespace, Some(resource_id), Some(dimension)))?;
    Ok(true)
}
