//! Parse + validate step of the extraction protocol.

use super::fence::strip_code_fences;
use crate::schema::{Schema, SchemaViolation};
use serde_json::Value;
use thiserror::Error;

/// Why a response could not be turned into a validated object.
///
/// This is a soft failure: it travels inside [`Extraction::Unvalidated`]
/// next to the raw text and is never raised on its own.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedResponse {
    #[error("response is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("response does not match schema '{schema}': {violation}")]
    SchemaMismatch {
        schema: String,
        violation: SchemaViolation,
    },
}

/// Outcome of one extraction attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// Parsed and validated against the requested schema.
    Structured(Value),
    /// The raw block exactly as the provider returned it.
    Unvalidated {
        raw: String,
        error: MalformedResponse,
    },
}

/// Strictly parse one response block against `schema`.
///
/// Exactly one attempt: fences are stripped, the JSON parsed, the value
/// validated. On any failure the original (unstripped) text is returned.
pub fn extract_structured(raw: &str, schema: &Schema) -> Extraction {
    let unvalidated = |error: MalformedResponse| Extraction::Unvalidated {
        raw: raw.to_string(),
        error,
    };

    let value: Value = match serde_json::from_str(strip_code_fences(raw)) {
        Ok(value) => value,
        Err(e) => return unvalidated(MalformedResponse::InvalidJson(e.to_string())),
    };

    match schema.validate(&value) {
        Ok(()) => Extraction::Structured(value),
        Err(violation) => unvalidated(MalformedResponse::SchemaMismatch {
            schema: schema.name().to_string(),
            violation,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Field, FieldType};
    use serde_json::json;

    fn order_schema() -> Schema {
        Schema::new("Order")
            .field(Field::required("item", FieldType::String))
            .field(Field::required("quantity", FieldType::Integer))
    }

    #[test]
    fn test_well_formed_payload_round_trips() {
        let raw = r#"{"item": "Widget", "quantity": 4}"#;
        let extraction = extract_structured(raw, &order_schema());
        assert_eq!(
            extraction,
            Extraction::Structured(json!({"item": "Widget", "quantity": 4}))
        );
    }

    #[test]
    fn test_fenced_payload_parses_like_unfenced() {
        let plain = r#"{"item": "Widget", "quantity": 4}"#;
        let fenced = format!("```json\n{}\n```", plain);
        assert_eq!(
            extract_structured(&fenced, &order_schema()),
            extract_structured(plain, &order_schema())
        );
    }

    #[test]
    fn test_wrong_type_returns_raw_text() {
        let raw = r#"{"item": "Widget", "quantity": "NaN"}"#;
        match extract_structured(raw, &order_schema()) {
            Extraction::Unvalidated { raw: text, error } => {
                assert_eq!(text, raw);
                assert!(matches!(error, MalformedResponse::SchemaMismatch { .. }));
            }
            other => panic!("expected Unvalidated, got {:?}", other),
        }
    }

    #[test]
    fn test_syntax_error_returns_raw_text() {
        let raw = "Sure! Here is the JSON: {\"item\": ";
        match extract_structured(raw, &order_schema()) {
            Extraction::Unvalidated { raw: text, error } => {
                assert_eq!(text, raw);
                assert!(matches!(error, MalformedResponse::InvalidJson(_)));
            }
            other => panic!("expected Unvalidated, got {:?}", other),
        }
    }

    #[test]
    fn test_fenced_invalid_payload_keeps_fences_in_raw() {
        let raw = "```json\n{\"item\": 1}\n```";
        let Extraction::Unvalidated { raw: text, .. } = extract_structured(raw, &order_schema())
        else {
            panic!("expected Unvalidated");
        };
        assert_eq!(text, raw);
    }

    #[test]
    fn test_non_object_json_is_a_mismatch() {
        let extraction = extract_structured("[1, 2, 3]", &order_schema());
        assert!(matches!(
            extraction,
            Extraction::Unvalidated {
                error: MalformedResponse::SchemaMismatch { .. },
                ..
            }
        ));
    }
}
