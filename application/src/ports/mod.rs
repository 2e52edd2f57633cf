//! Port definitions (interfaces for external dependencies)
//!
//! These traits define the boundaries between the application layer
//! and the infrastructure/presentation layers.

pub mod audit_logger;
pub mod model_client;
pub mod model_client_factory;
pub mod progress;
