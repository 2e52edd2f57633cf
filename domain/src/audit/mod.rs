//! Audit subdomain: criteria, conversations, reports and their scoring.
//!
//! - [`criterion`]: checklist items and the model roles that evaluate them
//! - [`conversation`]: the structured email thread produced by the Structure stage
//! - [`report`]: per-criterion results as returned by the model
//! - [`scoring`]: merging results with criteria and computing the overall score
//! - [`summary`]: text summaries derived from scored steps
//! - [`outcome`]: what one audit returns

pub mod conversation;
pub mod criterion;
pub mod outcome;
pub mod report;
pub mod scoring;
pub mod summary;

use serde::{Deserialize, Deserializer};

/// Deserialize `null` as the type's default (schemas allow null for optional fields).
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
