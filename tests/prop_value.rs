//! Property tests for the value tree and the parser.
//!
//! Documents are generated as `Value` trees, written out as text by a small
//! encoder local to this file, and parsed back.
use proptest::prelude::*;
use simple_json_core::{parse_str, ErrorCode, Value};
use std::collections::BTreeMap;
use std::fmt::Write;

// ============================================================================
// Strategies
// ============================================================================

fn arb_key() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z_][a-zA-Z0-9_]{0,15}").unwrap()
}

fn arb_string() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,30}",
        Just(String::new()),
        Just("say \"hi\"".to_string()),
        Just("path\\to\\file".to_string()),
        Just("line1\nline2\ttab".to_string()),
        Just("caf\u{00e9} \u{4f60}\u{597d} \u{1F600}".to_string()),
        "\\PC{0,12}",
    ]
}

/// Scalars that can be written as document text.
fn arb_scalar() -> BoxedStrategy<Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::Integer),
        (-1.0e12f64..1.0e12f64).prop_map(Value::Fraction),
        any::<bool>().prop_map(Value::Boolean),
        Just(Value::Null),
        arb_string().prop_map(Value::String),
    ]
    .boxed()
}

/// Every scalar the API can build, including non-finite fractions.
fn arb_any_scalar() -> BoxedStrategy<Value> {
    prop_oneof![
        arb_scalar(),
        Just(Value::Fraction(f64::NAN)),
        Just(Value::Fraction(f64::INFINITY)),
        Just(Value::Fraction(f64::NEG_INFINITY)),
    ]
    .boxed()
}

fn arb_tree(scalar: BoxedStrategy<Value>) -> impl Strategy<Value = Value> {
    scalar.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(Value::Array),
            prop::collection::btree_map(arb_key(), inner, 0..8).prop_map(Value::Object),
        ]
    })
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_tree(arb_scalar())
}

fn arb_any_value() -> impl Strategy<Value = Value> {
    arb_tree(arb_any_scalar())
}

// ============================================================================
// Encoder
// ============================================================================

fn encode(value: &Value) -> String {
    let mut out = String::new();
    encode_into(value, &mut out);
    out
}

fn encode_into(value: &Value, out: &mut String) {
    match value {
        Value::Uninitialized => {}
        Value::Integer(n) => write!(out, "{n}").unwrap(),
        Value::Fraction(x) => write!(out, "{x:?}").unwrap(),
        Value::Boolean(b) => write!(out, "{b}").unwrap(),
        Value::Null => out.push_str("null"),
        Value::String(s) => encode_string(s, out),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                encode_into(item, out);
            }
            out.push(']');
        }
        Value::Object(members) => {
            out.push('{');
            for (i, (key, item)) in members.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                encode_string(key, out);
                out.push_str(": ");
                encode_into(item, out);
            }
            out.push('}');
        }
    }
}

fn encode_string(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            c if (c as u32) < 0x20 => write!(out, "\\u{:04x}", c as u32).unwrap(),
            c => out.push(c),
        }
    }
    out.push('"');
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_parse_reads_back_what_was_written(value in arb_value()) {
        let text = encode(&value);
        let result = parse_str(&text);
        prop_assert!(!result.is_error(), "{text}: {}", result.error_info);
        prop_assert_eq!(result.value, value);
    }

    #[test]
    fn prop_clone_is_equal_and_independent(value in arb_any_value()) {
        let original = value.clone();
        let mut copy = value.clone();
        prop_assert_eq!(&copy, &original);

        match &mut copy {
            Value::Array(items) => items.push(Value::Null),
            Value::Object(members) => {
                members.insert("\u{0}extra".to_string(), Value::Null);
            }
            other => *other = Value::Uninitialized,
        }
        prop_assert_ne!(&copy, &original);
        prop_assert_eq!(value, original);
    }

    #[test]
    fn prop_integer_never_equals_fraction(n in -1_000_000i64..1_000_000i64) {
        prop_assert_ne!(Value::Integer(n), Value::Fraction(n as f64));
    }

    #[test]
    fn prop_duplicate_keys_keep_last_value(
        key in arb_key(),
        values in prop::collection::vec(any::<i64>(), 1..6),
    ) {
        let members: Vec<String> = values
            .iter()
            .map(|n| format!("\"{key}\": {n}"))
            .collect();
        let text = format!("{{{}}}", members.join(", "));
        let result = parse_str(&text);
        prop_assert!(!result.is_error());

        let mut expected = BTreeMap::new();
        expected.insert(key, Value::Integer(*values.last().unwrap()));
        prop_assert_eq!(result.value, Value::Object(expected));
    }

    #[test]
    fn prop_first_error_wins(value in arb_value(), junk in "[\\]}:, a-z]{1,8}") {
        // A document with a missing separator fails there, whatever follows.
        let prefix = format!("[{} ", encode(&value));
        let text = format!("{prefix}0{junk}");
        let result = parse_str(&text);
        prop_assert_eq!(
            result.error_info.error_code(),
            ErrorCode::MissingCommaOrSquareBracket
        );
        prop_assert_eq!(result.error_info.offset(), prefix.len());
        prop_assert_eq!(result.value, Value::Array(vec![value]));
    }
}
