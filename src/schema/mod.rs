//! Structural schema descriptions for model output.
//!
//! A [`Schema`] is plain data: field names, primitive types, optionality,
//! numeric bounds, string defaults and descriptions. Two things are derived
//! from the same description:
//!
//! 1. [`Schema::validate`] (in [`validate`]): checks and coerces a decoded
//!    JSON value, returning every violation at once;
//! 2. [`Schema::to_response_schema`] (in [`gemini`]): the provider's
//!    response-schema dialect, so the model is asked for exactly the shape
//!    we later validate.
//!
//! The Rust types callers deserialise validated values into (see
//! [`crate::catalog`]) are declared separately; a schema is never a type.

pub mod gemini;
pub mod validate;

/// A node in a schema tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub kind: SchemaKind,
    pub description: Option<String>,
}

/// The shape a [`Schema`] node accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    /// Any finite JSON number, optionally bounded (inclusive).
    Number {
        minimum: Option<f64>,
        maximum: Option<f64>,
    },
    /// A JSON string; `default` is substituted when the value is absent or null.
    String { default: Option<String> },
    /// A string drawn from a fixed set.
    Enum(Vec<String>),
    /// A JSON object with declared fields; undeclared keys are stripped.
    Object(Vec<Field>),
    /// A JSON array whose items all match the inner schema.
    Array(Box<Schema>),
}

/// A named member of an object schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub schema: Schema,
    /// Optional fields accept an absent key or `null`; both validate to `null`.
    pub required: bool,
}

impl Field {
    pub fn required(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
            required: true,
        }
    }

    pub fn optional(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
            required: false,
        }
    }

    /// Whether the model must emit this field.
    ///
    /// Fields with a default never have to be present.
    pub fn is_mandatory(&self) -> bool {
        self.required && self.schema.default_value().is_none()
    }
}

impl Schema {
    fn of(kind: SchemaKind) -> Self {
        Self {
            kind,
            description: None,
        }
    }

    pub fn number() -> Self {
        Self::of(SchemaKind::Number {
            minimum: None,
            maximum: None,
        })
    }

    pub fn string() -> Self {
        Self::of(SchemaKind::String { default: None })
    }

    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::of(SchemaKind::Enum(values.into_iter().map(Into::into).collect()))
    }

    pub fn object(fields: impl IntoIterator<Item = Field>) -> Self {
        Self::of(SchemaKind::Object(fields.into_iter().collect()))
    }

    pub fn array(items: Schema) -> Self {
        Self::of(SchemaKind::Array(Box::new(items)))
    }

    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Require `value >= 0`. No-op on non-numeric schemas.
    pub fn non_negative(self) -> Self {
        self.min(0.0)
    }

    pub fn min(mut self, bound: f64) -> Self {
        if let SchemaKind::Number { minimum, .. } = &mut self.kind {
            *minimum = Some(bound);
        }
        self
    }

    pub fn max(mut self, bound: f64) -> Self {
        if let SchemaKind::Number { maximum, .. } = &mut self.kind {
            *maximum = Some(bound);
        }
        self
    }

    /// Substitute `value` when the string is absent or null.
    pub fn default_value_of(mut self, value: impl Into<String>) -> Self {
        if let SchemaKind::String { default } = &mut self.kind {
            *default = Some(value.into());
        }
        self
    }

    pub fn default_value(&self) -> Option<&str> {
        match &self.kind {
            SchemaKind::String { default } => default.as_deref(),
            _ => None,
        }
    }

    /// Declared fields when this is an object schema.
    pub fn fields(&self) -> Option<&[Field]> {
        match &self.kind {
            SchemaKind::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// Human-readable name of the accepted type, used in validation messages.
    pub fn type_name(&self) -> &'static str {
        match self.kind {
            SchemaKind::Number { .. } => "number",
            SchemaKind::String { .. } => "string",
            SchemaKind::Enum(_) => "enum string",
            SchemaKind::Object(_) => "object",
            SchemaKind::Array(_) => "array",
        }
    }
}
