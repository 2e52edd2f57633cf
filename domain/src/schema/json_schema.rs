//! JSON Schema rendering.
//!
//! Produces the provider-facing form of a [`Schema`]. No `title` keyword is
//! ever emitted: the schema name is metadata for humans and logs, and some
//! providers echo it back or wrap their output in it.

use super::entities::{FieldType, Schema};
use serde_json::{Map, Value, json};

impl Schema {
    /// Render as a JSON Schema object (`"type": "object"`).
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        for field in self.fields() {
            let mut prop = match render_type(field.field_type()) {
                Value::Object(map) => map,
                _ => Map::new(),
            };
            if let Some(description) = field.description() {
                prop.insert("description".to_string(), json!(description));
            }
            properties.insert(field.name().to_string(), Value::Object(prop));
        }

        let required: Vec<&str> = self.required_fields().collect();

        let mut schema = Map::new();
        schema.insert("type".to_string(), json!("object"));
        if let Some(description) = self.description() {
            schema.insert("description".to_string(), json!(description));
        }
        schema.insert("properties".to_string(), Value::Object(properties));
        schema.insert("required".to_string(), json!(required));
        Value::Object(schema)
    }
}

fn render_type(field_type: &FieldType) -> Value {
    match field_type {
        FieldType::Array(item) => json!({
            "type": "array",
            "items": render_type(item),
        }),
        FieldType::Object(inner) => inner.to_json_schema(),
        scalar => json!({ "type": scalar.json_type() }),
    }
}
