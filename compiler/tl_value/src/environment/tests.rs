use super::*;

#[test]
fn test_define_lookup() {
    let env = Environment::new();
    env.define("x", Value::int(42), Mutability::Immutable);
    assert_eq!(env.lookup("x"), Some(Value::int(42)));
    assert_eq!(env.lookup("y"), None);
}

#[test]
fn test_shadowing() {
    let parent = Environment::new();
    parent.define("x", Value::int(1), Mutability::Immutable);

    let child = parent.enclosed();
    child.define("x", Value::int(2), Mutability::Immutable);

    assert_eq!(child.lookup("x"), Some(Value::int(2)));
    assert_eq!(parent.lookup("x"), Some(Value::int(1)));
}

#[test]
fn test_assign_walks_outward() {
    let parent = Environment::new();
    parent.define("x", Value::int(1), Mutability::Mutable);

    let child = parent.enclosed();
    assert!(child.assign("x", Value::int(5)).is_ok());
    assert_eq!(parent.lookup("x"), Some(Value::int(5)));
}

#[test]
fn test_assign_immutable() {
    let env = Environment::new();
    env.define("x", Value::int(1), Mutability::Immutable);
    assert_eq!(env.assign("x", Value::int(2)), Err(AssignError::Immutable));
    assert_eq!(env.lookup("x"), Some(Value::int(1)));
}

#[test]
fn test_assign_undefined() {
    let env = Environment::new().enclosed();
    assert_eq!(env.assign("nope", Value::Void), Err(AssignError::Undefined));
}

#[test]
fn test_handles_share_scope() {
    let env = Environment::new();
    let captured = env.clone();
    env.define("late", Value::Bool(true), Mutability::Mutable);

    assert!(captured.ptr_eq(&env));
    assert_eq!(captured.lookup("late"), Some(Value::Bool(true)));
    assert!(!env.enclosed().ptr_eq(&env));
}
