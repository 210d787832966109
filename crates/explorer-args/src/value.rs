#![forbid(unsafe_code)]

//! Dynamic arg values.
//!
//! Values arriving from UI controls are loosely typed: mostly strings, now
//! and then numbers, booleans, nested lists and maps. [`ArgValue`] models
//! that shape directly, with `Number` as `f64` so the not-a-number sentinel
//! survives coercion.
//!
//! The conversions [`ArgValue::to_js_string`] and [`ArgValue::to_number`]
//! follow the host's (JavaScript) `String(x)` / `Number(x)` rules, since
//! the values were produced there.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A map of field name to value.
pub type ArgMap = BTreeMap<String, ArgValue>;

/// A loosely typed arg value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum ArgValue {
    /// Explicit null.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A number; may be NaN or infinite.
    Number(f64),
    /// A string.
    String(String),
    /// An ordered list.
    Array(Vec<ArgValue>),
    /// A map keyed by field name.
    Object(ArgMap),
}

impl ArgValue {
    /// The not-a-number sentinel.
    pub const NAN: Self = Self::Number(f64::NAN);

    /// Short name of the variant, for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    /// Borrow the string, if this is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The number, if this is one.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Borrow the map, if this is one.
    #[must_use]
    pub const fn as_object(&self) -> Option<&ArgMap> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Borrow the list, if this is one.
    #[must_use]
    pub fn as_array(&self) -> Option<&[ArgValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Whether this is a NaN number.
    #[must_use]
    pub fn is_nan(&self) -> bool {
        matches!(self, Self::Number(n) if n.is_nan())
    }

    /// String conversion with `String(x)` semantics.
    ///
    /// ```
    /// use explorer_args::ArgValue;
    ///
    /// assert_eq!(ArgValue::Number(42.0).to_js_string(), "42");
    /// assert_eq!(ArgValue::Bool(true).to_js_string(), "true");
    /// assert_eq!(
    ///     ArgValue::Array(vec![ArgValue::Number(1.0), ArgValue::Null]).to_js_string(),
    ///     "1,"
    /// );
    /// ```
    #[must_use]
    pub fn to_js_string(&self) -> String {
        match self {
            Self::Null => "null".to_owned(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => number_to_string(*n),
            Self::String(s) => s.clone(),
            Self::Array(items) => items
                .iter()
                .map(|item| match item {
                    // Array join renders holes and nulls as empty.
                    Self::Null => String::new(),
                    other => other.to_js_string(),
                })
                .collect::<Vec<_>>()
                .join(","),
            Self::Object(_) => "[object Object]".to_owned(),
        }
    }

    /// Numeric conversion with `Number(x)` semantics.
    ///
    /// Unparsable input yields NaN rather than an error.
    #[must_use]
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Null => 0.0,
            Self::Bool(b) => f64::from(u8::from(*b)),
            Self::Number(n) => *n,
            Self::String(s) => parse_number(s),
            Self::Array(_) | Self::Object(_) => parse_number(&self.to_js_string()),
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_js_string())
    }
}

impl From<bool> for ArgValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for ArgValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for ArgValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<&str> for ArgValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for ArgValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl<T: Into<ArgValue>> From<Vec<T>> for ArgValue {
    fn from(items: Vec<T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

impl From<ArgMap> for ArgValue {
    fn from(map: ArgMap) -> Self {
        Self::Object(map)
    }
}

impl From<serde_json::Value> for ArgValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<ArgValue> for serde_json::Value {
    /// Non-finite numbers have no JSON form and become `null`.
    fn from(value: ArgValue) -> Self {
        match value {
            ArgValue::Null => Self::Null,
            ArgValue::Bool(b) => Self::Bool(b),
            ArgValue::Number(n) => serde_json::Number::from_f64(n).map_or(Self::Null, Self::Number),
            ArgValue::String(s) => Self::String(s),
            ArgValue::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            ArgValue::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

/// Render a number the way the host prints it.
pub(crate) fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_owned();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    if n == 0.0 {
        // Covers -0 as well.
        return "0".to_owned();
    }
    let abs = n.abs();
    if !(1e-6..1e21).contains(&abs) {
        let s = format!("{n:e}");
        return match s.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => s,
        };
    }
    format!("{n}")
}

/// Parse a string with `Number(s)` semantics.
pub(crate) fn parse_number(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if s.len() > 2 && s.as_bytes()[0] == b'0' {
        let radix = match s.as_bytes()[1] {
            b'x' | b'X' => Some(16),
            b'o' | b'O' => Some(8),
            b'b' | b'B' => Some(2),
            _ => None,
        };
        if let Some(radix) = radix {
            return parse_radix(&s[2..], radix);
        }
    }
    if is_decimal_literal(s) {
        s.parse::<f64>().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
    let mut acc = 0.0f64;
    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(d) => acc = acc * f64::from(radix) + f64::from(d),
            None => return f64::NAN,
        }
    }
    acc
}

/// `[+-]? (digits [. digits?] | . digits) ([eE] [+-]? digits)?`
fn is_decimal_literal(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut mantissa_digits = i - int_start;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        mantissa_digits += i - frac_start;
    }
    if mantissa_digits == 0 {
        return false;
    }
    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }
    i == bytes.len()
}
