#![allow(
    clippy::needless_pass_by_value,
    reason = "Proptest macros generate code with these patterns"
)]

use proptest::prelude::*;

use super::*;
use crate::value::Value;

/// Hashable scalar values across all four hashable kinds.
fn hashable_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        (-3i64..3).prop_map(Value::int),
        any::<bool>().prop_map(Value::Bool),
        prop::char::range('0', '3').prop_map(Value::Char),
        "[0-3]{0,2}".prop_map(Value::string),
    ]
}

/// Equality of the underlying magnitude within one kind.
fn same_magnitude(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Char(x), Value::Char(y)) => x == y,
        (Value::Str(x), Value::Str(y)) => x == y,
        _ => false,
    }
}

proptest! {
    #[test]
    fn keys_equal_iff_tag_and_magnitude_equal(a in hashable_value(), b in hashable_value()) {
        let ka = a.hash_key();
        let kb = b.hash_key();
        prop_assert!(ka.is_some() && kb.is_some());
        let expected = a.type_tag() == b.type_tag() && same_magnitude(&a, &b);
        prop_assert_eq!(ka == kb, expected);
    }

    #[test]
    fn key_tag_matches_value_tag(v in hashable_value()) {
        let key = v.hash_key();
        prop_assert_eq!(key.map(|k| k.type_tag()), Some(v.type_tag()));
    }

    #[test]
    fn floats_never_hash(f in any::<f64>()) {
        prop_assert!(Value::float(f).hash_key().is_none());
    }
}

#[test]
fn integer_and_float_five_differ() {
    assert_eq!(Value::int(5).hash_key(), Some(HashKey::Int(5)));
    assert_eq!(Value::float(5.0).hash_key(), None);
}

#[test]
fn canonical_order() {
    let mut keys = vec![
        HashKey::Str(Heap::new("a".to_string())),
        HashKey::Char('a'),
        HashKey::Bool(false),
        HashKey::Int(2),
        HashKey::Int(-1),
    ];
    keys.sort();
    let rendered: Vec<String> = keys.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, ["-1", "2", "false", "'a'", "\"a\""]);
}
