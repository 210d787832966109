#![forbid(unsafe_code)]

//! Schema-driven coercion of raw control values.
//!
//! # Rules
//!
//! | Declared type | Result |
//! |---------------|--------|
//! | `string` | `String(x)` of the value |
//! | `number` | `Number(x)` of the value; unparsable input is NaN |
//! | `boolean` | `true` iff the value is the string `"true"` |
//! | `function` | field dropped |
//! | `object` | fields coerced recursively against the field map |
//! | `array` | each element coerced against the element type |
//! | other | value passed through unchanged |
//!
//! Keys missing from the schema never reach the output. Nothing here can
//! fail: bad input degrades to NaN, an empty container, or omission.

use serde_json::Value;

use crate::error::{ArgsError, Result};
use crate::types::{ArgSchema, TypeDescriptor};
use crate::value::{ArgMap, ArgValue};

/// Coerce every declared arg present in `raw` to its declared type.
///
/// ```
/// use explorer_args::{map_args_to_types, ArgMap, ArgSchema, ArgType, ArgValue, TypeDescriptor};
///
/// let raw: ArgMap = [("count".to_owned(), ArgValue::from("42"))].into();
/// let schema: ArgSchema = [("count".to_owned(), ArgType::new(TypeDescriptor::Number))].into();
/// let out = map_args_to_types(&raw, &schema);
/// assert_eq!(out["count"], ArgValue::Number(42.0));
/// ```
#[must_use]
pub fn map_args_to_types(raw: &ArgMap, schema: &ArgSchema) -> ArgMap {
    let out = map_fields(raw, schema.iter().map(|(key, decl)| (key, &decl.ty)));
    tracing::trace!(
        message = "args.coerce",
        declared = schema.len(),
        provided = raw.len(),
        mapped = out.len(),
    );
    out
}

fn map_fields<'a>(
    raw: &ArgMap,
    fields: impl IntoIterator<Item = (&'a String, &'a TypeDescriptor)>,
) -> ArgMap {
    let mut out = ArgMap::new();
    for (key, ty) in fields {
        let Some(value) = raw.get(key) else {
            continue;
        };
        if let Some(mapped) = coerce_value(value, ty) {
            out.insert(key.clone(), mapped);
        }
    }
    out
}

/// Coerce a single value. `None` means the value is dropped.
#[must_use]
pub fn coerce_value(value: &ArgValue, ty: &TypeDescriptor) -> Option<ArgValue> {
    match ty {
        TypeDescriptor::String => Some(ArgValue::String(value.to_js_string())),
        TypeDescriptor::Number => Some(ArgValue::Number(value.to_number())),
        TypeDescriptor::Boolean => Some(ArgValue::Bool(value.as_str() == Some("true"))),
        TypeDescriptor::Function => None,
        TypeDescriptor::Object(fields) => {
            let mapped = match value {
                ArgValue::Object(map) => map_fields(map, fields),
                _ => ArgMap::new(),
            };
            Some(ArgValue::Object(mapped))
        }
        TypeDescriptor::Array(element) => {
            let mapped = value
                .as_array()
                .map(|items| {
                    items
                        .iter()
                        // Dropped elements keep their slot so indices line up.
                        .map(|item| coerce_value(item, element).unwrap_or(ArgValue::Null))
                        .collect()
                })
                .unwrap_or_default();
            Some(ArgValue::Array(mapped))
        }
        TypeDescriptor::Other(_) => Some(value.clone()),
    }
}

/// Parse a raw arg map from JSON.
///
/// The root must be a JSON object.
pub fn parse_args(json: &str) -> Result<ArgMap> {
    let value: Value = serde_json::from_str(json)?;
    match ArgValue::from(value) {
        ArgValue::Object(map) => Ok(map),
        other => Err(ArgsError::invalid_args(format!(
            "root must be an object, found {}",
            other.kind()
        ))),
    }
}
