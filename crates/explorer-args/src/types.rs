#![forbid(unsafe_code)]

//! Declared arg types.
//!
//! A [`TypeDescriptor`] is the closed set of semantic types a control can
//! declare. The JSON form matches what story metadata carries:
//!
//! ```json
//! { "name": "array", "value": { "name": "object", "value": { "on": { "name": "boolean" } } } }
//! ```
//!
//! A bare string (`"number"`) is accepted as shorthand for `{ "name": "number" }`.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::ArgsError;

/// Field name to declared type, for the children of an `object` type.
pub type FieldTypes = BTreeMap<String, TypeDescriptor>;

/// Arg name to its declaration.
pub type ArgSchema = BTreeMap<String, ArgType>;

/// Semantic type of an arg.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    /// Text.
    String,
    /// Floating point number.
    Number,
    /// `true` / `false`.
    Boolean,
    /// Callback; never representable as a control value.
    Function,
    /// Nested record with typed fields.
    Object(FieldTypes),
    /// Homogeneous list.
    Array(Box<TypeDescriptor>),
    /// Any other tag (`enum`, `symbol`, ...); values pass through untouched.
    Other(String),
}

impl TypeDescriptor {
    /// Build an `object` type from `(field, type)` pairs.
    #[must_use]
    pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, TypeDescriptor)>) -> Self {
        Self::Object(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Build an `array` type.
    #[must_use]
    pub fn array(element: TypeDescriptor) -> Self {
        Self::Array(Box::new(element))
    }

    /// The tag name used in the JSON form.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Function => "function",
            Self::Object(_) => "object",
            Self::Array(_) => "array",
            Self::Other(name) => name,
        }
    }

    /// Nesting depth; scalars are 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Object(fields) => 1 + fields.values().map(Self::depth).max().unwrap_or(0),
            Self::Array(element) => 1 + element.depth(),
            _ => 1,
        }
    }

    /// Build a descriptor from its JSON form.
    pub fn from_json(value: &Value) -> Result<Self, ArgsError> {
        descriptor_from_json(value, "$")
    }

    /// Render the JSON form.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut map = serde_json::Map::new();
        map.insert("name".to_owned(), Value::String(self.name().to_owned()));
        match self {
            Self::Object(fields) => {
                let fields = fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect::<serde_json::Map<_, _>>();
                map.insert("value".to_owned(), Value::Object(fields));
            }
            Self::Array(element) => {
                map.insert("value".to_owned(), element.to_json());
            }
            _ => {}
        }
        Value::Object(map)
    }
}

fn descriptor_from_json(value: &Value, path: &str) -> Result<TypeDescriptor, ArgsError> {
    let (name, inner) = match value {
        Value::String(name) => (name.as_str(), None),
        Value::Object(map) => {
            let name = map
                .get("name")
                .and_then(Value::as_str)
                .ok_or_else(|| ArgsError::invalid_schema(path, "type is missing a string `name`"))?;
            (name, map.get("value"))
        }
        other => {
            return Err(ArgsError::invalid_schema(
                path,
                format!("expected a type object or name, found {}", json_kind(other)),
            ));
        }
    };

    Ok(match name {
        "string" => TypeDescriptor::String,
        "number" => TypeDescriptor::Number,
        "boolean" => TypeDescriptor::Boolean,
        "function" => TypeDescriptor::Function,
        "object" => {
            let Some(Value::Object(fields)) = inner else {
                return Err(ArgsError::invalid_schema(
                    path,
                    "`object` type needs a `value` map of field types",
                ));
            };
            let mut out = FieldTypes::new();
            for (field, ty) in fields {
                let child = format!("{path}.{field}");
                out.insert(field.clone(), descriptor_from_json(ty, &child)?);
            }
            TypeDescriptor::Object(out)
        }
        "array" => {
            let Some(element) = inner else {
                return Err(ArgsError::invalid_schema(
                    path,
                    "`array` type needs a `value` element type",
                ));
            };
            TypeDescriptor::array(descriptor_from_json(element, &format!("{path}[]"))?)
        }
        other => TypeDescriptor::Other(other.to_owned()),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl Serialize for TypeDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = match self {
            Self::Object(_) | Self::Array(_) => 2,
            _ => 1,
        };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("name", self.name())?;
        match self {
            Self::Object(fields) => map.serialize_entry("value", fields)?,
            Self::Array(element) => map.serialize_entry("value", element)?,
            _ => {}
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TypeDescriptor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(&value).map_err(D::Error::custom)
    }
}

/// Declaration of one arg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgType {
    /// Declared semantic type.
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,

    /// Display name, if the story gives one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ArgType {
    /// Declare an arg of the given type.
    #[must_use]
    pub fn new(ty: TypeDescriptor) -> Self {
        Self {
            ty,
            name: None,
            description: None,
        }
    }

    /// Attach a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl From<TypeDescriptor> for ArgType {
    fn from(ty: TypeDescriptor) -> Self {
        Self::new(ty)
    }
}

/// Parse an arg schema from JSON.
///
/// ```
/// use explorer_args::{parse_schema, TypeDescriptor};
///
/// let schema = parse_schema(r#"{ "count": { "type": { "name": "number" } } }"#).unwrap();
/// assert_eq!(schema["count"].ty, TypeDescriptor::Number);
/// ```
pub fn parse_schema(json: &str) -> Result<ArgSchema, ArgsError> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Object(entries) = value else {
        return Err(ArgsError::invalid_schema(
            "$",
            format!("schema root must be an object, found {}", json_kind(&value)),
        ));
    };
    let mut schema = ArgSchema::new();
    for (key, entry) in entries {
        let path = format!("$.{key}");
        let Value::Object(mut decl) = entry else {
            return Err(ArgsError::invalid_schema(&path, "arg declaration must be an object"));
        };
        let Some(ty) = decl.remove("type") else {
            return Err(ArgsError::invalid_schema(&path, "arg declaration is missing `type`"));
        };
        let ty = descriptor_from_json(&ty, &format!("{path}.type"))?;
        let text = |v: Option<Value>| match v {
            Some(Value::String(s)) => Some(s),
            _ => None,
        };
        schema.insert(
            key,
            ArgType {
                ty,
                name: text(decl.remove("name")),
                description: text(decl.remove("description")),
            },
        );
    }
    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalar_names() {
        for (name, expected) in [
            ("string", TypeDescriptor::String),
            ("number", TypeDescriptor::Number),
            ("boolean", TypeDescriptor::Boolean),
            ("function", TypeDescriptor::Function),
        ] {
            assert_eq!(TypeDescriptor::from_json(&json!({ "name": name })).unwrap(), expected);
            assert_eq!(TypeDescriptor::from_json(&json!(name)).unwrap(), expected);
        }
    }

    #[test]
    fn unknown_names_are_other() {
        let ty = TypeDescriptor::from_json(&json!({ "name": "enum", "value": ["a", "b"] })).unwrap();
        assert_eq!(ty, TypeDescriptor::Other("enum".to_owned()));
        assert_eq!(ty.name(), "enum");
    }

    #[test]
    fn nested_object_and_array() {
        let ty = TypeDescriptor::from_json(&json!({
            "name": "object",
            "value": {
                "arr": { "name": "array", "value": { "name": "number" } },
                "obj": { "name": "object", "value": { "bool": { "name": "boolean" } } }
            }
        }))
        .unwrap();
        let expected = TypeDescriptor::object([
            ("arr", TypeDescriptor::array(TypeDescriptor::Number)),
            ("obj", TypeDescriptor::object([("bool", TypeDescriptor::Boolean)])),
        ]);
        assert_eq!(ty, expected);
        assert_eq!(ty.depth(), 3);
    }

    #[test]
    fn object_without_fields_is_rejected() {
        let err = TypeDescriptor::from_json(&json!({ "name": "object" })).unwrap_err();
        assert!(matches!(err, ArgsError::InvalidSchema { .. }));
        assert!(err.to_string().contains("`object`"));
    }

    #[test]
    fn array_without_element_reports_path() {
        let err = TypeDescriptor::from_json(&json!({
            "name": "object",
            "value": { "items": { "name": "array" } }
        }))
        .unwrap_err();
        assert!(err.to_string().contains("$.items"), "{err}");
    }

    #[test]
    fn serde_round_trip_matches_json_form() {
        let ty = TypeDescriptor::array(TypeDescriptor::object([("on", TypeDescriptor::Boolean)]));
        let text = serde_json::to_string(&ty).unwrap();
        let back: TypeDescriptor = serde_json::from_str(&text).unwrap();
        assert_eq!(back, ty);
        assert_eq!(serde_json::to_value(&ty).unwrap(), ty.to_json());
    }

    #[test]
    fn parse_schema_reads_metadata() {
        let schema = parse_schema(
            r#"{
                "label": { "name": "label", "description": "Button text", "type": { "name": "string" } },
                "onClick": { "type": "function" }
            }"#,
        )
        .unwrap();
        assert_eq!(schema.len(), 2);
        assert_eq!(schema["label"].ty, TypeDescriptor::String);
        assert_eq!(schema["label"].description.as_deref(), Some("Button text"));
        assert_eq!(schema["onClick"].ty, TypeDescriptor::Function);
    }

    #[test]
    fn parse_schema_rejects_missing_type() {
        let err = parse_schema(r#"{ "a": { "name": "a" } }"#).unwrap_err();
        assert!(err.to_string().contains("$.a"), "{err}");
    }

    #[test]
    fn parse_schema_rejects_bad_json() {
        assert!(matches!(parse_schema("{"), Err(ArgsError::Parse(_))));
        assert!(matches!(parse_schema("[]"), Err(ArgsError::InvalidSchema { .. })));
    }
}
