//! stratus-autoscaling — emulated application auto scaling control plane.
//!
//! Validates registration requests against a per-namespace compatibility
//! matrix, cross-checks referenced workloads against sibling emulated
//! services, and stores accepted targets in an embedded registry.
//!
//! # Request pipeline
//!
//! ```text
//! Received → Validating → (Rejected:Validation | Resolving)
//!                       → (Rejected:NotFound   | Registered)
//! ```
//!
//! Structural validation aggregates every violation into one
//! provider-shaped error; referential (not-found) failures report alone.
//! The registry is only mutated after both gates pass.

pub mod error;
pub mod matrix;
pub mod registry;
pub mod resolver;
pub mod service;
pub mod types;
pub mod validate;

pub use error::{RegistryError, RegistryResult};
pub use registry::TargetRegistry;
pub use resolver::{EcsResolver, NullResolver, ResourceResolver};
pub use service::ScalingService;
pub use types::*;
pub use validate::{Violation, format_violations, target_params_are_valid, validate};
