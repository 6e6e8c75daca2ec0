use super::*;
use pretty_assertions::assert_eq;

#[test]
fn signal_tags() {
    assert_eq!(ControlAction::Return(Value::int(1)).type_tag(), TypeTag::Return);
    assert_eq!(ControlAction::Out(Value::Void).type_tag(), TypeTag::Out);
    assert_eq!(ControlAction::Jump.type_tag(), TypeTag::Jump);
    assert_eq!(
        ControlAction::from(EvalError::new("boom")).type_tag(),
        TypeTag::Error
    );
}

#[test]
fn signal_display() {
    assert_eq!(ControlAction::Return(Value::int(7)).to_string(), "7");
    assert_eq!(ControlAction::Out(Value::string("x")).to_string(), "\"x\"");
    assert_eq!(ControlAction::Jump.to_string(), "jump");
    assert_eq!(
        ControlAction::Error(EvalError::new("division by zero")).to_string(),
        "ERROR: division by zero"
    );
}

#[test]
fn is_error() {
    assert!(ControlAction::Error(EvalError::new("x")).is_error());
    assert!(!ControlAction::Jump.is_error());
}

#[test]
fn factory_messages() {
    assert_eq!(
        type_mismatch("NUMERIC", TypeTag::String).message(),
        "type mismatch: expected NUMERIC, got STRING"
    );
    assert_eq!(
        not_callable(TypeTag::Integer).to_string(),
        "INTEGER is not callable"
    );
    assert_eq!(
        unhashable_key(TypeTag::Float).to_string(),
        "FLOAT cannot be used as a hash key"
    );
    assert_eq!(
        index_out_of_bounds(5, 3).to_string(),
        "index 5 out of bounds for length 3"
    );
    assert_eq!(
        arity_mismatch(2, 1).to_string(),
        "expected 2 arguments, got 1"
    );
    assert_eq!(
        signal_outside_boundary(TypeTag::Jump, "function").to_string(),
        "`JUMP` escaped its enclosing function"
    );
    assert_eq!(
        call_depth_exceeded(64).to_string(),
        "maximum call depth exceeded (limit: 64)"
    );
}

#[test]
fn custom_error_kind() {
    let err = EvalError::new("undefined variable: x");
    assert_eq!(
        err.kind(),
        &EvalErrorKind::Custom("undefined variable: x".to_string())
    );
    assert_eq!(err.message(), "undefined variable: x");
}

#[test]
fn structured_kind_is_preserved() {
    let err = cannot_assign_const();
    assert_eq!(err.kind(), &EvalErrorKind::ConstReference);
}
