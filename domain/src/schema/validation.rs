//! Strict validation of JSON payloads against a [`Schema`].
//!
//! Rules:
//! - the payload must be an object
//! - required fields must be present and non-null; optional ones may be
//!   absent or null
//! - `integer` accepts numbers without a fractional part, `number` any number
//! - arrays are checked element-wise, nested objects recursively
//! - unknown fields are ignored
//!
//! Validation stops at the first violation and reports its JSON path.

use super::entities::{FieldType, Schema};
use serde_json::Value;
use thiserror::Error;

/// First point at which a payload diverges from its schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{path}: expected {expected}, found {found}")]
pub struct SchemaViolation {
    /// JSON path of the offending value (`$` for the root)
    pub path: String,
    pub expected: String,
    pub found: String,
}

impl SchemaViolation {
    fn new(path: &str, expected: impl Into<String>, found: &Value) -> Self {
        Self {
            path: if path.is_empty() {
                "$".to_string()
            } else {
                path.to_string()
            },
            expected: expected.into(),
            found: describe(found).to_string(),
        }
    }
}

impl Schema {
    /// Check `value` against this schema.
    pub fn validate(&self, value: &Value) -> Result<(), SchemaViolation> {
        validate_object(self, value, "")
    }
}

fn validate_object(schema: &Schema, value: &Value, path: &str) -> Result<(), SchemaViolation> {
    let Value::Object(map) = value else {
        return Err(SchemaViolation::new(
            path,
            format!("object '{}'", schema.name()),
            value,
        ));
    };

    for field in schema.fields() {
        let field_path = if path.is_empty() {
            field.name().to_string()
        } else {
            format!("{}.{}", path, field.name())
        };

        match map.get(field.name()) {
            None | Some(Value::Null) if field.is_required() => {
                return Err(SchemaViolation::new(
                    &field_path,
                    format!("required {}", field.field_type().json_type()),
                    map.get(field.name()).unwrap_or(&Value::Null),
                ));
            }
            None | Some(Value::Null) => {}
            Some(v) => validate_value(field.field_type(), v, &field_path)?,
        }
    }

    Ok(())
}

fn validate_value(
    field_type: &FieldType,
    value: &Value,
    path: &str,
) -> Result<(), SchemaViolation> {
    let ok = match (field_type, value) {
        (FieldType::String, Value::String(_)) => true,
        (FieldType::Boolean, Value::Bool(_)) => true,
        (FieldType::Number, Value::Number(_)) => true,
        // 2.0 would not decode into an integer type
        (FieldType::Integer, Value::Number(n)) => n.is_i64() || n.is_u64(),
        (FieldType::Array(item), Value::Array(items)) => {
            for (index, element) in items.iter().enumerate() {
                validate_value(item, element, &format!("{}[{}]", path, index))?;
            }
            true
        }
        (FieldType::Object(inner), Value::Object(_)) => {
            validate_object(inner, value, path)?;
            true
        }
        _ => false,
    };

    if ok {
        Ok(())
    } else {
        Err(SchemaViolation::new(path, field_type.json_type(), value))
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use crate::schema::{Field, FieldType, Schema};
    use serde_json::json;

    fn order_schema() -> Schema {
        Schema::new("Order")
            .field(Field::required("item", FieldType::String))
            .field(Field::required("quantity", FieldType::Integer))
            .field(Field::optional("note", FieldType::String))
    }

    #[test]
    fn test_valid_payload() {
        let schema = order_schema();
        assert!(schema.validate(&json!({"item": "Widget", "quantity": 3})).is_ok());
        assert!(
            schema
                .validate(&json!({"item": "Widget", "quantity": 3, "note": null}))
                .is_ok()
        );
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let schema = order_schema();
        let payload = json!({"item": "Widget", "quantity": 3, "colour": "blue"});
        assert!(schema.validate(&payload).is_ok());
    }

    #[test]
    fn test_wrong_type_reports_path() {
        let err = order_schema()
            .validate(&json!({"item": "Widget", "quantity": "NaN"}))
            .unwrap_err();
        assert_eq!(err.path, "quantity");
        assert_eq!(err.expected, "integer");
        assert_eq!(err.found, "string");
    }

    #[test]
    fn test_missing_required_field() {
        let err = order_schema().validate(&json!({"item": "Widget"})).unwrap_err();
        assert_eq!(err.path, "quantity");
        assert_eq!(err.found, "null");
    }

    #[test]
    fn test_null_required_field_is_rejected() {
        let err = order_schema()
            .validate(&json!({"item": null, "quantity": 1}))
            .unwrap_err();
        assert_eq!(err.path, "item");
    }

    #[test]
    fn test_integer_rejects_floats() {
        let schema = order_schema();
        assert!(schema.validate(&json!({"item": "a", "quantity": 2})).is_ok());
        assert!(schema.validate(&json!({"item": "a", "quantity": -3})).is_ok());
        assert!(schema.validate(&json!({"item": "a", "quantity": 2.0})).is_err());
        assert!(schema.validate(&json!({"item": "a", "quantity": 2.5})).is_err());
    }

    #[test]
    fn test_number_accepts_integers() {
        let schema = Schema::new("S").field(Field::required("score", FieldType::Number));
        assert!(schema.validate(&json!({"score": 1})).is_ok());
        assert!(schema.validate(&json!({"score": 0.25})).is_ok());
        assert!(schema.validate(&json!({"score": true})).is_err());
    }

    #[test]
    fn test_root_must_be_object() {
        let err = order_schema().validate(&json!([1, 2])).unwrap_err();
        assert_eq!(err.path, "$");
        assert_eq!(err.found, "array");
    }

    #[test]
    fn test_nested_array_path() {
        let row = Schema::new("Row").field(Field::required("score", FieldType::Number));
        let schema = Schema::new("Report").field(Field::required(
            "results",
            FieldType::array_of(FieldType::Object(row)),
        ));

        let err = schema
            .validate(&json!({"results": [{"score": 1}, {"score": 0.5}, {"score": "high"}]}))
            .unwrap_err();
        assert_eq!(err.path, "results[2].score");
        assert_eq!(err.to_string(), "results[2].score: expected number, found string");
    }

    #[test]
    fn test_array_of_strings() {
        let schema =
            Schema::new("S").field(Field::required("cc", FieldType::array_of(FieldType::String)));
        assert!(schema.validate(&json!({"cc": []})).is_ok());
        assert!(schema.validate(&json!({"cc": ["a@x.com", "b@x.com"]})).is_ok());
        let err = schema.validate(&json!({"cc": ["a@x.com", 7]})).unwrap_err();
        assert_eq!(err.path, "cc[1]");
    }
}
