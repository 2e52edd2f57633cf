//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod run_audit;
pub mod run_batch;
pub(crate) mod shared;
