#![forbid(unsafe_code)]

//! Arg coercion for story controls.
//!
//! Controls hand back loosely typed values (mostly strings). Given the
//! declared arg types of a story, [`map_args_to_types`] produces values of
//! the declared types, recursing through nested objects and arrays and
//! dropping anything undeclared or not representable (functions).
//!
//! # Example
//!
//! ```
//! use explorer_args::{map_args_to_types, parse_args, parse_schema, ArgValue};
//!
//! let schema = parse_schema(r#"{
//!     "count":   { "type": { "name": "number" } },
//!     "visible": { "type": { "name": "boolean" } },
//!     "onClick": { "type": { "name": "function" } }
//! }"#).unwrap();
//! let raw = parse_args(r#"{ "count": "3", "visible": "true", "onClick": "x", "extra": 1 }"#).unwrap();
//!
//! let args = map_args_to_types(&raw, &schema);
//! assert_eq!(args["count"], ArgValue::Number(3.0));
//! assert_eq!(args["visible"], ArgValue::Bool(true));
//! assert_eq!(args.len(), 2);
//! ```

pub mod coerce;
pub mod error;
pub mod types;
pub mod value;

pub use coerce::{coerce_value, map_args_to_types, parse_args};
pub use error::ArgsError;
pub use types::{ArgSchema, ArgType, FieldTypes, TypeDescriptor, parse_schema};
pub use value::{ArgMap, ArgValue};
