//! Rendering a [`Schema`] as a Gemini `responseSchema`.
//!
//! Gemini accepts an OpenAPI 3.0 subset with upper-case type names. Optional
//! fields are emitted as `nullable` and left out of `required`;
//! `propertyOrdering` keeps the model's output in declaration order, which
//! noticeably helps on long field catalogs.

use super::{Schema, SchemaKind};
use serde_json::{json, Map, Value};

impl Schema {
    /// Render this schema in the provider's response-schema dialect.
    pub fn to_response_schema(&self) -> Value {
        let mut node = match &self.kind {
            SchemaKind::Number { minimum, maximum } => {
                let mut m = Map::new();
                m.insert("type".into(), json!("NUMBER"));
                if let Some(min) = minimum {
                    m.insert("minimum".into(), json!(min));
                }
                if let Some(max) = maximum {
                    m.insert("maximum".into(), json!(max));
                }
                m
            }
            SchemaKind::String { .. } => {
                let mut m = Map::new();
                m.insert("type".into(), json!("STRING"));
                m
            }
            SchemaKind::Enum(values) => {
                let mut m = Map::new();
                m.insert("type".into(), json!("STRING"));
                m.insert("format".into(), json!("enum"));
                m.insert("enum".into(), json!(values));
                m
            }
            SchemaKind::Array(items) => {
                let mut m = Map::new();
                m.insert("type".into(), json!("ARRAY"));
                m.insert("items".into(), items.to_response_schema());
                m
            }
            SchemaKind::Object(fields) => {
                let mut properties = Map::new();
                for field in fields {
                    let mut prop = field.schema.to_response_schema();
                    if !field.required {
                        if let Some(obj) = prop.as_object_mut() {
                            obj.insert("nullable".into(), json!(true));
                        }
                    }
                    properties.insert(field.name.clone(), prop);
                }
                let required: Vec<&str> = fields
                    .iter()
                    .filter(|f| f.is_mandatory())
                    .map(|f| f.name.as_str())
                    .collect();
                let ordering: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();

                let mut m = Map::new();
                m.insert("type".into(), json!("OBJECT"));
                m.insert("properties".into(), Value::Object(properties));
                if !required.is_empty() {
                    m.insert("required".into(), json!(required));
                }
                m.insert("propertyOrdering".into(), json!(ordering));
                m
            }
        };

        if let Some(desc) = &self.description {
            node.insert("description".into(), json!(desc));
        }
        Value::Object(node)
    }
}
