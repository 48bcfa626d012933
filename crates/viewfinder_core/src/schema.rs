//! Output schemas for structured generation.
//!
//! A schema is handed to the provider to constrain its output and is also
//! used locally to validate whatever comes back, since providers do not
//! always honor the constraint.

use serde_json::{Map, Value, json};

/// Value type of a schema field.
#[derive(Debug, Clone, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum FieldType {
    /// Free text
    String,
    /// Whole number
    Integer,
    /// True or false
    Boolean,
    /// List of strings
    #[strum(serialize = "string array")]
    StringArray,
    /// Nested object
    Object(Vec<SchemaField>),
    /// List of nested objects
    #[strum(serialize = "object array")]
    ObjectArray(Vec<SchemaField>),
}

/// One named field of an object schema.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct SchemaField {
    name: String,
    field_type: FieldType,
    #[getter(skip)]
    required: bool,
    description: String,
}

impl SchemaField {
    /// A field that must be present and non-null.
    pub fn required(
        name: impl Into<String>,
        field_type: FieldType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: true,
            description: description.into(),
        }
    }

    /// Whether the field must be present and non-null.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// A field that may be absent or null.
    pub fn optional(
        name: impl Into<String>,
        field_type: FieldType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: false,
            description: description.into(),
        }
    }
}

/// Named object schema describing one stage's expected output.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use viewfinder_core::{FieldType, OutputSchema, SchemaField};
///
/// let schema = OutputSchema::new(
///     "greeting",
///     "A short greeting",
///     vec![
///         SchemaField::required("text", FieldType::String, "The greeting"),
///         SchemaField::optional("volume", FieldType::Integer, "Loudness"),
///     ],
/// );
///
/// assert!(schema.validate(&json!({"text": "hi"})).is_empty());
/// assert_eq!(
///     schema.validate(&json!({"volume": 3})),
///     vec!["text: missing required field".to_string()]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct OutputSchema {
    name: String,
    description: String,
    fields: Vec<SchemaField>,
}

impl OutputSchema {
    /// Creates a schema for a top-level object.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        fields: Vec<SchemaField>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            fields,
        }
    }

    /// Render as a JSON Schema object with lowercase type names.
    pub fn to_json_schema(&self) -> Value {
        let mut schema = object_schema(&self.fields);
        if let Value::Object(map) = &mut schema {
            map.insert("description".into(), Value::String(self.description.clone()));
        }
        schema
    }

    /// Human-readable field listing for inclusion in prompts.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        describe_fields(&self.fields, 0, &mut out);
        out
    }

    /// Check a parsed value against the schema.
    ///
    /// Returns one message per violation, prefixed with the JSON path of the
    /// offending field. An empty list means the value conforms.
    pub fn validate(&self, value: &Value) -> Vec<String> {
        let mut violations = Vec::new();
        validate_object(&self.fields, value, "", &mut violations);
        violations
    }
}

fn object_schema(fields: &[SchemaField]) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();
    for field in fields {
        let mut property = type_schema(&field.field_type);
        if let Value::Object(map) = &mut property {
            map.insert(
                "description".into(),
                Value::String(field.description.clone()),
            );
        }
        properties.insert(field.name.clone(), property);
        if field.required {
            required.push(Value::String(field.name.clone()));
        }
    }
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

fn type_schema(field_type: &FieldType) -> Value {
    match field_type {
        FieldType::String => json!({"type": "string"}),
        FieldType::Integer => json!({"type": "integer"}),
        FieldType::Boolean => json!({"type": "boolean"}),
        FieldType::StringArray => json!({"type": "array", "items": {"type": "string"}}),
        FieldType::Object(fields) => object_schema(fields),
        FieldType::ObjectArray(fields) => json!({"type": "array", "items": object_schema(fields)}),
    }
}

fn describe_fields(fields: &[SchemaField], depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    for field in fields {
        let requirement = if field.required { "required" } else { "optional" };
        out.push_str(&format!(
            "{}- {} ({}, {}): {}\n",
            indent, field.name, field.field_type, requirement, field.description
        ));
        match &field.field_type {
            FieldType::Object(nested) | FieldType::ObjectArray(nested) => {
                describe_fields(nested, depth + 1, out)
            }
            _ => {}
        }
    }
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

fn validate_object(fields: &[SchemaField], value: &Value, path: &str, out: &mut Vec<String>) {
    let Some(map) = value.as_object() else {
        let at = if path.is_empty() { "value" } else { path };
        out.push(format!("{}: expected object", at));
        return;
    };

    for field in fields {
        let field_path = join_path(path, &field.name);
        match map.get(&field.name) {
            None | Some(Value::Null) => {
                if field.required {
                    out.push(format!("{}: missing required field", field_path));
                }
            }
            Some(v) => validate_value(&field.field_type, v, &field_path, out),
        }
    }
}

fn validate_value(field_type: &FieldType, value: &Value, path: &str, out: &mut Vec<String>) {
    match field_type {
        FieldType::String if !value.is_string() => {
            out.push(format!("{}: expected string", path));
        }
        FieldType::Integer if !(value.is_i64() || value.is_u64()) => {
            out.push(format!("{}: expected integer", path));
        }
        FieldType::Boolean if !value.is_boolean() => {
            out.push(format!("{}: expected boolean", path));
        }
        FieldType::StringArray => match value.as_array() {
            Some(items) => {
                for (i, item) in items.iter().enumerate() {
                    if !item.is_string() {
                        out.push(format!("{}[{}]: expected string", path, i));
                    }
                }
            }
            None => out.push(format!("{}: expected array", path)),
        },
        FieldType::Object(fields) => validate_object(fields, value, path, out),
        FieldType::ObjectArray(fields) => match value.as_array() {
            Some(items) => {
                for (i, item) in items.iter().enumerate() {
                    validate_object(fields, item, &format!("{}[{}]", path, i), out);
                }
            }
            None => out.push(format!("{}: expected array", path)),
        },
        _ => {}
    }
}
