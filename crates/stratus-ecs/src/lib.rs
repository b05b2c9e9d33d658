//! stratus-ecs — emulated container-service backend.
//!
//! Holds clusters and the services they host, entirely in memory. Sibling
//! emulations (application auto scaling) consult it through the existence
//! queries; test code and the API layer seed it through the create
//! operations.

pub mod backend;

pub use backend::{EcsBackend, EcsService};
