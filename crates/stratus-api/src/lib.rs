//! stratus-api — HTTP front for the Stratus emulated services.
//!
//! Speaks the provider's target-dispatch JSON protocol: every operation is
//! a POST to `/` naming the operation in the `X-Amz-Target` header, so an
//! SDK client pointed at the listener exercises the emulation end to end.
//!
//! # Dispatch targets
//!
//! | Target | Description |
//! |---|---|
//! | `AnyScaleFrontendService.RegisterScalableTarget` | Register/update a scalable target |
//! | `AnyScaleFrontendService.DescribeScalableTargets` | List registered targets |
//! | `AmazonEC2ContainerServiceV20141113.CreateCluster` | Seed an emulated cluster |
//! | `AmazonEC2ContainerServiceV20141113.CreateService` | Seed a service in a cluster |
//! | `AmazonEC2ContainerServiceV20141113.ListClusters` | List emulated clusters |

pub mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::routing::post;

use stratus_autoscaling::ScalingService;
use stratus_ecs::EcsBackend;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub region: String,
    pub scaling: Arc<ScalingService>,
    pub ecs: EcsBackend,
}

/// Build the target-dispatch router.
pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/", post(handlers::dispatch))
        .with_state(state)
}
