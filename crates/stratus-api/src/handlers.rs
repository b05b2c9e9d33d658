//! Target-dispatch handler.
//!
//! Success responses are the operation's JSON body; failures serialize the
//! provider error envelope with the error's HTTP status.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use stratus_autoscaling::{DescribeScalableTargetsRequest, RegisterScalableTargetRequest};
use stratus_core::{ApiError, ApiResult, DEFAULT_ACCOUNT_ID};

use crate::ApiState;

/// POST / — route on the `X-Amz-Target` header.
pub async fn dispatch(
    State(state): State<ApiState>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let target = headers
        .get("x-amz-target")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    debug!(%target, "dispatching request");

    match route(&state, &target, &body) {
        Ok(value) => (StatusCode::OK, Json(value)).into_response(),
        Err(err) => error_response(&err),
    }
}

fn route(state: &ApiState, target: &str, body: &str) -> ApiResult<Value> {
    match target {
        "AnyScaleFrontendService.RegisterScalableTarget" => {
            let req: RegisterScalableTargetRequest = parse(body)?;
            to_value(state.scaling.register_scalable_target(req)?)
        }
        "AnyScaleFrontendService.DescribeScalableTargets" => {
            let req: DescribeScalableTargetsRequest = parse(body)?;
            to_value(state.scaling.describe_scalable_targets(req)?)
        }
        "AmazonEC2ContainerServiceV20141113.CreateCluster" => {
            let req: CreateClusterRequest = parse(body)?;
            let name = req.cluster_name.unwrap_or_else(|| "default".to_string());
            state.ecs.create_cluster(&name);
            Ok(serde_json::json!({
                "cluster": {
                    "clusterArn": cluster_arn(&state.region, &name),
                    "clusterName": name,
                    "status": "ACTIVE"
                }
            }))
        }
        "AmazonEC2ContainerServiceV20141113.CreateService" => {
            let req: CreateServiceRequest = parse(body)?;
            let cluster = req.cluster.unwrap_or_else(|| "default".to_string());
            let service = state.ecs.create_service(
                &cluster,
                &req.service_name,
                req.desired_count.unwrap_or(0),
            )?;
            Ok(serde_json::json!({
                "service": {
                    "serviceName": service.service_name,
                    "desiredCount": service.desired_count,
                    "status": "ACTIVE"
                }
            }))
        }
        "AmazonEC2ContainerServiceV20141113.ListClusters" => {
            let arns: Vec<String> = state
                .ecs
                .list_clusters()
                .iter()
                .map(|name| cluster_arn(&state.region, name))
                .collect();
            Ok(serde_json::json!({ "clusterArns": arns }))
        }
        other => Err(ApiError::UnknownOperation(other.to_string())),
    }
}

fn error_response(err: &ApiError) -> Response {
    let status = StatusCode::from_u16(err.http_status())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(err.to_envelope())).into_response()
}

/// Parse a request body; an empty body reads as an empty object so that
/// field-level validation reports the missing members.
fn parse<T: serde::de::DeserializeOwned>(body: &str) -> ApiResult<T> {
    let body = if body.trim().is_empty() { "{}" } else { body };
    serde_json::from_str(body)
        .map_err(|e| ApiError::Validation(format!("1 validation error detected: {e}")))
}

fn to_value<T: serde::Serialize>(value: T) -> ApiResult<Value> {
    serde_json::to_value(value).map_err(|e| ApiError::Internal(e.to_string()))
}

fn cluster_arn(region: &str, name: &str) -> String {
    format!("arn:aws:ecs:{region}:{DEFAULT_ACCOUNT_ID}:cluster/{name}")
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateClusterRequest {
    #[serde(default)]
    cluster_name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateServiceRequest {
    #[serde(default)]
    cluster: Option<String>,
    #[serde(default)]
    service_name: String,
    #[serde(default)]
    desired_count: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use stratus_autoscaling::{EcsResolver, ScalingService, TargetRegistry};
    use stratus_ecs::EcsBackend;

    fn test_state() -> ApiState {
        let ecs = EcsBackend::new();
        let registry = TargetRegistry::open_in_memory().unwrap();
        let resolver = Arc::new(EcsResolver::new(ecs.clone()));
        ApiState {
            region: "us-east-1".to_string(),
            scaling: Arc::new(ScalingService::new("us-east-1", registry, resolver)),
            ecs,
        }
    }

    async fn call(state: ApiState, target: &str, body: Value) -> (StatusCode, Value) {
        let mut headers = HeaderMap::new();
        headers.insert("x-amz-target", target.parse().unwrap());
        let resp = dispatch(State(state), headers, body.to_string()).await;
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        (status, json)
    }

    #[tokio::test]
    async fn register_and_describe_over_http() {
        let state = test_state();
        state.ecs.create_cluster("default");
        state.ecs.create_service("default", "sample-webapp", 1).unwrap();

        let (status, body) = call(
            state.clone(),
            "AnyScaleFrontendService.RegisterScalableTarget",
            serde_json::json!({
                "ServiceNamespace": "ecs",
                "ResourceId": "service/default/sample-webapp",
                "ScalableDimension": "ecs:service:DesiredCount",
                "MinCapacity": 1,
                "MaxCapacity": 4,
                "RoleARN": "test:arn"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(
            body["ScalableTargetARN"]
                .as_str()
                .unwrap()
                .starts_with("arn:aws:application-autoscaling:")
        );

        let (status, body) = call(
            state,
            "AnyScaleFrontendService.DescribeScalableTargets",
            serde_json::json!({ "ServiceNamespace": "ecs" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let targets = body["ScalableTargets"].as_array().unwrap();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0]["ResourceId"], "service/default/sample-webapp");
        assert_eq!(targets[0]["MinCapacity"], 1);
    }

    #[tokio::test]
    async fn invalid_dimension_returns_validation_envelope() {
        let state = test_state();
        let (status, body) = call(
            state,
            "AnyScaleFrontendService.DescribeScalableTargets",
            serde_json::json!({
                "ServiceNamespace": "ecs",
                "ScalableDimension": "foo"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["Error"]["Code"], "ValidationException");
        assert!(
            body["Error"]["Message"]
                .as_str()
                .unwrap()
                .contains("1 validation error detected")
        );
        assert_eq!(body["ResponseMetadata"]["HTTPStatusCode"], 400);
    }

    #[tokio::test]
    async fn invalid_namespace_returns_validation_envelope() {
        let state = test_state();
        let (status, body) = call(
            state,
            "AnyScaleFrontendService.DescribeScalableTargets",
            serde_json::json!({
                "ServiceNamespace": "foo",
                "ScalableDimension": "ecs:service:DesiredCount"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["Error"]["Code"], "ValidationException");
        assert!(
            body["Error"]["Message"]
                .as_str()
                .unwrap()
                .contains("1 validation error detected")
        );
    }

    #[tokio::test]
    async fn two_invalid_parameters_aggregate() {
        let state = test_state();
        let (status, body) = call(
            state,
            "AnyScaleFrontendService.DescribeScalableTargets",
            serde_json::json!({
                "ServiceNamespace": "foo",
                "ScalableDimension": "bar"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(
            body["Error"]["Message"]
                .as_str()
                .unwrap()
                .contains("2 validation errors detected")
        );
    }

    #[tokio::test]
    async fn missing_ecs_service_returns_cluster_not_found() {
        let state = test_state();
        state.ecs.create_cluster("default");

        let (status, body) = call(
            state.clone(),
            "AnyScaleFrontendService.RegisterScalableTarget",
            serde_json::json!({
                "ServiceNamespace": "ecs",
                "ResourceId": "service/default/foo",
                "ScalableDimension": "ecs:service:DesiredCount",
                "MinCapacity": 1,
                "MaxCapacity": 1
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["Error"]["Code"], "ClusterNotFoundException");
        assert_eq!(body["Error"]["Message"], "Cluster not found.");
        assert_eq!(body["ResponseMetadata"]["HTTPStatusCode"], 400);

        // The rejected target was not registered.
        let (_, body) = call(
            state,
            "AnyScaleFrontendService.DescribeScalableTargets",
            serde_json::json!({ "ServiceNamespace": "ecs" }),
        )
        .await;
        assert!(body["ScalableTargets"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn seed_cluster_and_service_over_http() {
        let state = test_state();

        let (status, body) = call(
            state.clone(),
            "AmazonEC2ContainerServiceV20141113.CreateCluster",
            serde_json::json!({ "clusterName": "default" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cluster"]["clusterName"], "default");

        let (status, body) = call(
            state.clone(),
            "AmazonEC2ContainerServiceV20141113.CreateService",
            serde_json::json!({
                "cluster": "default",
                "serviceName": "web",
                "desiredCount": 2
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"]["serviceName"], "web");

        let (status, body) = call(
            state,
            "AmazonEC2ContainerServiceV20141113.ListClusters",
            serde_json::json!({}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let arns = body["clusterArns"].as_array().unwrap();
        assert_eq!(arns.len(), 1);
        assert!(arns[0].as_str().unwrap().ends_with("cluster/default"));
    }

    #[tokio::test]
    async fn create_service_without_cluster_fails() {
        let state = test_state();
        let (status, body) = call(
            state,
            "AmazonEC2ContainerServiceV20141113.CreateService",
            serde_json::json!({ "cluster": "nope", "serviceName": "web" }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["Error"]["Code"], "ClusterNotFoundException");
    }

    #[tokio::test]
    async fn unknown_target_is_rejected() {
        let state = test_state();
        let (status, body) = call(
            state,
            "FooService.Bar",
            serde_json::json!({}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["Error"]["Code"], "UnknownOperationException");
    }
}
