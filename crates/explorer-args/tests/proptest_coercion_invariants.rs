//! Property-based invariant tests for arg coercion.
//!
//! 1. Output keys are a subset of the schema keys
//! 2. Function-typed fields never appear in the output
//! 3. Booleans are true iff the raw value is the string "true"
//! 4. Integer strings parse to their value; non-numeric strings give NaN
//! 5. Every output value has the shape of its declared type, at every depth
//! 6. Coercion is deterministic

use explorer_args::{ArgMap, ArgSchema, ArgType, ArgValue, TypeDescriptor, map_args_to_types};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

fn key_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "b", "c", "d", "e", "f"]).prop_map(str::to_owned)
}

fn descriptor_strategy() -> impl Strategy<Value = TypeDescriptor> {
    let leaf = prop_oneof![
        Just(TypeDescriptor::String),
        Just(TypeDescriptor::Number),
        Just(TypeDescriptor::Boolean),
        Just(TypeDescriptor::Function),
        Just(TypeDescriptor::Other("enum".to_owned())),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(TypeDescriptor::array),
            prop::collection::btree_map(key_strategy(), inner, 0..4).prop_map(TypeDescriptor::Object),
        ]
    })
}

fn value_strategy() -> impl Strategy<Value = ArgValue> {
    let leaf = prop_oneof![
        Just(ArgValue::Null),
        any::<bool>().prop_map(ArgValue::Bool),
        (-1.0e6f64..1.0e6).prop_map(ArgValue::Number),
        prop_oneof![
            Just("true".to_owned()),
            Just("false".to_owned()),
            Just("yes".to_owned()),
            "-?[0-9]{1,6}",
            "[a-z ]{0,8}",
        ]
        .prop_map(ArgValue::String),
    ];
    leaf.prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(ArgValue::Array),
            prop::collection::btree_map(key_strategy(), inner, 0..4).prop_map(ArgValue::Object),
        ]
    })
}

fn schema_strategy() -> impl Strategy<Value = ArgSchema> {
    prop::collection::btree_map(
        key_strategy(),
        descriptor_strategy().prop_map(ArgType::new),
        0..5,
    )
}

fn raw_strategy() -> impl Strategy<Value = ArgMap> {
    prop::collection::btree_map(key_strategy(), value_strategy(), 0..6)
}

/// Whether `value` has the shape `ty` promises after coercion.
fn conforms(value: &ArgValue, ty: &TypeDescriptor) -> bool {
    match ty {
        TypeDescriptor::String => matches!(value, ArgValue::String(_)),
        TypeDescriptor::Number => matches!(value, ArgValue::Number(_)),
        TypeDescriptor::Boolean => matches!(value, ArgValue::Bool(_)),
        TypeDescriptor::Function => false,
        TypeDescriptor::Object(fields) => match value {
            ArgValue::Object(map) => map.iter().all(|(k, v)| {
                fields
                    .get(k)
                    .is_some_and(|field_ty| conforms(v, field_ty))
            }),
            _ => false,
        },
        TypeDescriptor::Array(element) => match value {
            ArgValue::Array(items) => items.iter().all(|item| match **element {
                TypeDescriptor::Function => *item == ArgValue::Null,
                _ => conforms(item, element),
            }),
            _ => false,
        },
        TypeDescriptor::Other(_) => true,
    }
}

// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn output_keys_are_declared_and_not_functions(raw in raw_strategy(), schema in schema_strategy()) {
        let out = map_args_to_types(&raw, &schema);
        for key in out.keys() {
            let decl = schema.get(key);
            prop_assert!(decl.is_some(), "undeclared key {} in output", key);
            prop_assert!(raw.contains_key(key), "key {} was not provided", key);
            prop_assert_ne!(&decl.unwrap().ty, &TypeDescriptor::Function);
        }
        for (key, decl) in &schema {
            if raw.contains_key(key) && decl.ty != TypeDescriptor::Function {
                prop_assert!(out.contains_key(key), "declared key {} missing", key);
            }
        }
    }

    #[test]
    fn output_values_conform_to_declared_types(raw in raw_strategy(), schema in schema_strategy()) {
        let out = map_args_to_types(&raw, &schema);
        for (key, value) in &out {
            let ty = &schema[key].ty;
            prop_assert!(conforms(value, ty), "{} = {:?} does not conform to {:?}", key, value, ty);
        }
    }

    #[test]
    fn booleans_are_true_only_for_the_string_true(value in value_strategy()) {
        let raw: ArgMap = [("a".to_owned(), value.clone())].into();
        let schema: ArgSchema = [("a".to_owned(), ArgType::new(TypeDescriptor::Boolean))].into();
        let out = map_args_to_types(&raw, &schema);
        let expected = value == ArgValue::String("true".to_owned());
        prop_assert_eq!(&out["a"], &ArgValue::Bool(expected));
    }

    #[test]
    fn integer_strings_parse(n in -1_000_000i64..1_000_000) {
        let raw: ArgMap = [("a".to_owned(), ArgValue::String(n.to_string()))].into();
        let schema: ArgSchema = [("a".to_owned(), ArgType::new(TypeDescriptor::Number))].into();
        let out = map_args_to_types(&raw, &schema);
        prop_assert_eq!(&out["a"], &ArgValue::Number(n as f64));
    }

    #[test]
    fn alphabetic_strings_are_nan(s in "[a-zA-Z]{1,12}") {
        prop_assume!(s != "Infinity");
        let raw: ArgMap = [("a".to_owned(), ArgValue::String(s))].into();
        let schema: ArgSchema = [("a".to_owned(), ArgType::new(TypeDescriptor::Number))].into();
        let out = map_args_to_types(&raw, &schema);
        prop_assert!(out["a"].is_nan());
    }

    #[test]
    fn functions_are_always_omitted(value in value_strategy()) {
        let raw: ArgMap = [("a".to_owned(), value)].into();
        let schema: ArgSchema = [("a".to_owned(), ArgType::new(TypeDescriptor::Function))].into();
        prop_assert!(map_args_to_types(&raw, &schema).is_empty());
    }

    #[test]
    fn coercion_is_deterministic(raw in raw_strategy(), schema in schema_strategy()) {
        let first = map_args_to_types(&raw, &schema);
        let second = map_args_to_types(&raw, &schema);
        // NaN != NaN, so compare the JSON-facing rendering.
        prop_assert_eq!(format!("{first:?}"), format!("{second:?}"));
    }
}
