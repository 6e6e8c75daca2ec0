use super::*;

#[test]
fn signal_tags() {
    assert!(TypeTag::Return.is_signal());
    assert!(TypeTag::Out.is_signal());
    assert!(TypeTag::Jump.is_signal());
    assert!(TypeTag::Error.is_signal());
    assert!(!TypeTag::Void.is_signal());
    assert!(!TypeTag::Reference.is_signal());
}

#[test]
fn numeric_capability() {
    assert!(TypeTag::Integer
        .capabilities()
        .contains(Capabilities::NUMERIC));
    assert!(TypeTag::Float.capabilities().contains(Capabilities::NUMERIC));
    assert!(!TypeTag::String
        .capabilities()
        .contains(Capabilities::NUMERIC));
}

#[test]
fn float_is_not_hashable() {
    assert!(!TypeTag::Float
        .capabilities()
        .contains(Capabilities::HASHABLE));
    assert!(!TypeTag::Void.capabilities().contains(Capabilities::HASHABLE));
}

#[test]
fn letters_are_hashable() {
    let caps = TypeTag::Character.capabilities();
    assert!(caps.contains(Capabilities::LETTER | Capabilities::HASHABLE));
    assert_eq!(caps, TypeTag::String.capabilities());
}

#[test]
fn callables() {
    for tag in [TypeTag::Function, TypeTag::UnderLine, TypeTag::Native] {
        assert_eq!(tag.capabilities(), Capabilities::CALLABLE);
    }
}

#[test]
fn containers_and_signals_have_no_capabilities() {
    for tag in [
        TypeTag::Array,
        TypeTag::Hash,
        TypeTag::Reference,
        TypeTag::Return,
        TypeTag::Error,
    ] {
        assert!(tag.capabilities().is_empty(), "{tag} should be bare");
    }
}

#[test]
fn display_uses_tag_name() {
    assert_eq!(TypeTag::Return.to_string(), "RET");
    assert_eq!(TypeTag::Error.to_string(), "ERR");
    assert_eq!(TypeTag::UnderLine.to_string(), "UNDERLINE");
}
