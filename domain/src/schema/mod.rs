//! Output schemas as first-class values.
//!
//! A [`Schema`] describes the shape a model response must have. The same
//! value is rendered into provider requests (as JSON Schema) and used to
//! validate the returned payload, so the instruction and the check can
//! never drift apart.
//!
//! Typed report structs tie themselves to their schema through
//! [`StructuredOutput`].

pub mod entities;
mod json_schema;
pub mod validation;

pub use entities::{Field, FieldType, Schema};
pub use validation::SchemaViolation;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// A Rust type whose JSON form is described by a [`Schema`].
///
/// The schema must be at least as strict as the type's `Deserialize`
/// impl: anything that validates must deserialize.
pub trait StructuredOutput: Serialize + DeserializeOwned {
    fn schema() -> Schema;
}
