//! Validation and coercion of decoded model output.
//!
//! The validator walks a JSON value alongside its [`Schema`] and produces a
//! *new* value containing exactly the declared keys, with string defaults
//! filled in and missing optional fields set to `null`.
//! Violations are collected rather than short-circuited so a single failure
//! message lists every field the model got wrong.

use super::{Schema, SchemaKind};
use crate::error::{ValidationError, ValidationIssue};
use serde_json::{Map, Value};

impl Schema {
    /// Validate `value` and return the coerced copy.
    ///
    /// Coercion rules:
    /// - undeclared object keys are dropped;
    /// - absent or null strings with a default take the default;
    /// - optional fields that are absent or null come out as null, so the
    ///   output key set depends only on the schema.
    pub fn validate(&self, value: &Value) -> Result<Value, ValidationError> {
        let mut issues = Vec::new();
        let out = check(self, value, "$", &mut issues);
        if issues.is_empty() {
            Ok(out)
        } else {
            Err(ValidationError { issues })
        }
    }
}

fn check(schema: &Schema, value: &Value, path: &str, issues: &mut Vec<ValidationIssue>) -> Value {
    match &schema.kind {
        SchemaKind::Number { minimum, maximum } => {
            let Some(n) = value.as_f64() else {
                issues.push(mismatch(path, schema, value));
                return Value::Null;
            };
            if let Some(min) = minimum {
                if n < *min {
                    issues.push(issue(path, format!("must be ≥ {min}, got {n}")));
                }
            }
            if let Some(max) = maximum {
                if n > *max {
                    issues.push(issue(path, format!("must be ≤ {max}, got {n}")));
                }
            }
            value.clone()
        }

        SchemaKind::String { default } => match (value, default) {
            (Value::String(_), _) => value.clone(),
            (Value::Null, Some(d)) => Value::String(d.clone()),
            _ => {
                issues.push(mismatch(path, schema, value));
                Value::Null
            }
        },

        SchemaKind::Enum(allowed) => match value.as_str() {
            Some(s) if allowed.iter().any(|a| a == s) => value.clone(),
            Some(s) => {
                issues.push(issue(
                    path,
                    format!("expected one of [{}], got \"{s}\"", allowed.join(", ")),
                ));
                Value::Null
            }
            None => {
                issues.push(mismatch(path, schema, value));
                Value::Null
            }
        },

        SchemaKind::Array(items) => {
            let Some(arr) = value.as_array() else {
                issues.push(mismatch(path, schema, value));
                return Value::Null;
            };
            Value::Array(
                arr.iter()
                    .enumerate()
                    .map(|(i, item)| check(items, item, &format!("{path}[{i}]"), issues))
                    .collect(),
            )
        }

        SchemaKind::Object(fields) => {
            let Some(obj) = value.as_object() else {
                issues.push(mismatch(path, schema, value));
                return Value::Null;
            };
            let mut out = Map::new();
            for field in fields {
                let field_path = format!("{path}.{}", field.name);
                let given = obj.get(&field.name);
                if let (None | Some(Value::Null), Some(d)) = (given, field.schema.default_value()) {
                    out.insert(field.name.clone(), Value::String(d.to_string()));
                    continue;
                }
                match given {
                    None | Some(Value::Null) if !field.required => {
                        out.insert(field.name.clone(), Value::Null);
                    }
                    None => {
                        issues.push(issue(&field_path, "required field is missing".into()));
                    }
                    Some(v) => {
                        let checked = check(&field.schema, v, &field_path, issues);
                        out.insert(field.name.clone(), checked);
                    }
                }
            }
            Value::Object(out)
        }
    }
}

fn issue(path: &str, message: String) -> ValidationIssue {
    ValidationIssue {
        path: path.to_string(),
        message,
    }
}

fn mismatch(path: &str, schema: &Schema, value: &Value) -> ValidationIssue {
    issue(
        path,
        format!("expected {}, got {}", schema.type_name(), json_type(value)),
    )
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
