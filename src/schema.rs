// Output schema descriptors
// One Schema value serves two duties: it renders the responseSchema sent to
// the model, and it validates whatever the model sends back. Generated
// content is untrusted, so every flow re-checks output against the same
// descriptor it requested.

use serde_json::{json, Map, Value};

use crate::error::{ValidationError, Violations};

/// Structural type of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

impl SchemaType {
    /// Type name in the generateContent responseSchema dialect.
    fn wire_name(self) -> &'static str {
        match self {
            SchemaType::String => "STRING",
            SchemaType::Number => "NUMBER",
            SchemaType::Integer => "INTEGER",
            SchemaType::Boolean => "BOOLEAN",
            SchemaType::Array => "ARRAY",
            SchemaType::Object => "OBJECT",
        }
    }

    fn expectation(self) -> &'static str {
        match self {
            SchemaType::String => "must be a string",
            SchemaType::Number => "must be a number",
            SchemaType::Integer => "must be an integer",
            SchemaType::Boolean => "must be a boolean",
            SchemaType::Array => "must be an array",
            SchemaType::Object => "must be an object",
        }
    }
}

/// A structural record schema: field names, types, and constraints.
#[derive(Debug, Clone)]
pub struct Schema {
    kind: SchemaType,
    description: Option<String>,
    properties: Vec<(String, Schema)>,
    required: Vec<String>,
    items: Option<Box<Schema>>,
    enum_values: Vec<String>,
    non_empty: bool,
    minimum: Option<f64>,
}

impl Schema {
    fn new(kind: SchemaType) -> Self {
        Self {
            kind,
            description: None,
            properties: Vec::new(),
            required: Vec::new(),
            items: None,
            enum_values: Vec::new(),
            non_empty: false,
            minimum: None,
        }
    }

    pub fn object() -> Self {
        Self::new(SchemaType::Object)
    }

    pub fn array(items: Schema) -> Self {
        let mut s = Self::new(SchemaType::Array);
        s.items = Some(Box::new(items));
        s
    }

    pub fn string() -> Self {
        Self::new(SchemaType::String)
    }

    pub fn number() -> Self {
        Self::new(SchemaType::Number)
    }

    pub fn integer() -> Self {
        Self::new(SchemaType::Integer)
    }

    pub fn boolean() -> Self {
        Self::new(SchemaType::Boolean)
    }

    /// Attach a description forwarded to the model on the wire.
    pub fn describe(mut self, text: &str) -> Self {
        self.description = Some(text.to_string());
        self
    }

    /// Add a required property to an object schema.
    pub fn field(mut self, name: &str, schema: Schema) -> Self {
        self.required.push(name.to_string());
        self.properties.push((name.to_string(), schema));
        self
    }

    /// Restrict a string to a fixed set of values.
    pub fn one_of(mut self, values: &[String]) -> Self {
        self.enum_values = values.to_vec();
        self
    }

    /// Require a string to be non-empty.
    pub fn non_empty(mut self) -> Self {
        self.non_empty = true;
        self
    }

    /// Require a numeric value to be at least `min`.
    pub fn minimum(mut self, min: f64) -> Self {
        self.minimum = Some(min);
        self
    }

    /// Render the schema in the generateContent responseSchema format.
    pub fn to_wire(&self) -> Value {
        let mut node = Map::new();
        node.insert("type".to_string(), json!(self.kind.wire_name()));
        if let Some(desc) = &self.description {
            node.insert("description".to_string(), json!(desc));
        }
        if !self.enum_values.is_empty() {
            node.insert("enum".to_string(), json!(self.enum_values));
        }
        if !self.properties.is_empty() {
            let mut props = Map::new();
            for (name, schema) in &self.properties {
                props.insert(name.clone(), schema.to_wire());
            }
            node.insert("properties".to_string(), Value::Object(props));
        }
        if !self.required.is_empty() {
            node.insert("required".to_string(), json!(self.required));
        }
        if let Some(items) = &self.items {
            node.insert("items".to_string(), items.to_wire());
        }
        Value::Object(node)
    }

    /// Check a parsed value against the schema, collecting every violation.
    /// The value itself is never modified; the caller decides how to
    /// deserialize it further.
    pub fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        let mut out = Violations::new();
        self.check("", value, &mut out);
        out.into_result()
    }

    fn check(&self, path: &str, value: &Value, out: &mut Violations) {
        let label = if path.is_empty() { "response" } else { path };

        match self.kind {
            SchemaType::Object => {
                let Some(map) = value.as_object() else {
                    out.push(label, self.kind.expectation());
                    return;
                };
                for name in &self.required {
                    if !map.contains_key(name) {
                        out.push(join(path, name), "is required");
                    }
                }
                for (name, schema) in &self.properties {
                    if let Some(child) = map.get(name) {
                        schema.check(&join(path, name), child, out);
                    }
                }
            }
            SchemaType::Array => {
                let Some(elements) = value.as_array() else {
                    out.push(label, self.kind.expectation());
                    return;
                };
                if let Some(items) = &self.items {
                    for (i, element) in elements.iter().enumerate() {
                        items.check(&format!("{}[{}]", label, i), element, out);
                    }
                }
            }
            SchemaType::String => {
                let Some(s) = value.as_str() else {
                    out.push(label, self.kind.expectation());
                    return;
                };
                if self.non_empty && s.is_empty() {
                    out.push(label, "must be a non-empty string");
                }
                if !self.enum_values.is_empty() && !self.enum_values.iter().any(|v| v == s) {
                    out.push(label, "must be one of the allowed values");
                }
            }
            SchemaType::Number => {
                let Some(n) = value.as_f64() else {
                    out.push(label, self.kind.expectation());
                    return;
                };
                if let Some(min) = self.minimum {
                    if n < min {
                        out.push(label, format!("must be at least {}", min));
                    }
                }
            }
            SchemaType::Integer => {
                let Some(n) = value.as_i64() else {
                    out.push(label, self.kind.expectation());
                    return;
                };
                if let Some(min) = self.minimum {
                    if (n as f64) < min {
                        out.push(label, format!("must be at least {}", min));
                    }
                }
            }
            SchemaType::Boolean => {
                if !value.is_boolean() {
                    out.push(label, self.kind.expectation());
                }
            }
        }
    }
}

fn join(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", path, name)
    }
}
