use super::*;

#[test]
fn test_array_set_in_place() {
    let mut arr = ArrayValue::new(vec![Value::int(1), Value::int(2)]);
    let old = arr.set(1, Value::int(20)).unwrap();
    assert_eq!(old, Value::int(2));
    assert_eq!(arr.elements(), &[Value::int(1), Value::int(20)]);
}

#[test]
fn test_array_set_out_of_bounds() {
    let mut arr = ArrayValue::new(vec![Value::int(1)]);
    let err = arr.set(3, Value::Void).unwrap_err();
    assert_eq!(err.message(), "index 3 out of bounds for length 1");
    assert_eq!(arr.len(), 1);
}

#[test]
fn test_array_share_flag_taken_once() {
    let mut arr = ArrayValue::default();
    assert!(!arr.take_share_flag());
    arr.mark_shareable();
    assert!(arr.take_share_flag());
    assert!(!arr.take_share_flag());
}

#[test]
fn test_hash_insert_and_get() {
    let mut hash = HashValue::new();
    assert_eq!(hash.insert(Value::int(1), Value::string("one")), Ok(None));
    assert_eq!(
        hash.insert(Value::int(1), Value::string("uno")),
        Ok(Some(Value::string("one")))
    );
    assert_eq!(hash.get(&Value::int(1)), Some(&Value::string("uno")));
    assert_eq!(hash.len(), 1);
}

#[test]
fn test_hash_keys_do_not_collide_across_kinds() {
    let mut hash = HashValue::new();
    hash.insert(Value::int(1), Value::string("int")).unwrap();
    hash.insert(Value::string("1"), Value::string("str")).unwrap();
    hash.insert(Value::Char('1'), Value::string("char")).unwrap();
    hash.insert(Value::Bool(true), Value::string("bool")).unwrap();
    assert_eq!(hash.len(), 4);
    assert_eq!(hash.get(&Value::Char('1')), Some(&Value::string("char")));
}

#[test]
fn test_hash_insert_unhashable() {
    let mut hash = HashValue::new();
    assert_eq!(
        hash.insert(Value::float(1.0), Value::Void),
        Err(AllocError::Unhashable(crate::TypeTag::Float))
    );
    assert!(hash.is_empty());
}

#[test]
fn test_hash_remove() {
    let mut hash = HashValue::new();
    hash.insert(Value::string("k"), Value::int(1)).unwrap();
    let pair = hash.remove(&Value::string("k")).unwrap();
    assert_eq!(pair.key(), &Value::string("k"));
    assert_eq!(pair.value(), Some(&Value::int(1)));
    assert!(!hash.contains_key(&Value::string("k")));
    assert!(hash.remove(&Value::string("k")).is_none());
}

#[test]
fn test_hash_equality_ignores_insertion_order() {
    let mut a = HashValue::new();
    a.insert(Value::int(1), Value::Bool(true)).unwrap();
    a.insert(Value::int(2), Value::Bool(false)).unwrap();
    let mut b = HashValue::new();
    b.insert(Value::int(2), Value::Bool(false)).unwrap();
    b.insert(Value::int(1), Value::Bool(true)).unwrap();
    assert_eq!(a, b);
}
