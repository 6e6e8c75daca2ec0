//! Runtime values for the TLang interpreter.
//!
//! # Handles and Copies
//!
//! Scalars are stored inline (`Str` behind an immutable [`Heap`]). Arrays and
//! hashes live behind [`Shared`] handles, so `Value::clone` aliases them. The
//! language has value semantics for composites, which the evaluator gets by
//! calling [`Value::copy`] at every assignment and parameter-binding boundary:
//!
//! ```text
//! let a = Value::array(vec![Value::int(1)]);
//! let b = a.copy();          // independent elements
//! let c = a.clone();         // same elements as `a`
//! ```
//!
//! Callables copy shallowly: a closure's captured environment is shared by
//! design, never duplicated.
//!
//! # Copy Elision
//!
//! Arrays and hashes carry a one-shot share flag. When set (see
//! [`ArrayValue::mark_shareable`]), the next `copy` hands back the same handle
//! and clears the flag; every later copy is deep again.

mod callable;
mod composite;
mod float;

use std::borrow::Cow;
use std::fmt;

use crate::errors::{unhashable_key, EvalError, EvalResult};
use crate::environment::Environment;
use crate::hash_key::HashKey;
use crate::heap::{Heap, Shared};
use crate::reference::{AllocError, Reference};
use crate::stack::ensure_sufficient_stack;
use crate::tag::{Capabilities, TypeTag};

pub use callable::{BlockBody, FunctionValue, NativeFn, NativeValue, SharedBody, UnderLineValue};
pub use composite::{ArrayValue, HashPair, HashValue};

/// Shared handle to an array.
pub type ArrayRef = Shared<ArrayValue>;

/// Shared handle to a hash.
pub type HashRef = Shared<HashValue>;

/// Numeric view of a value (Numeric capability).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

/// Runtime value in the TLang interpreter.
#[derive(Clone)]
pub enum Value {
    // Scalars
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit float.
    Float(f64),
    /// Boolean.
    Bool(bool),
    /// Single code point.
    Char(char),
    /// Immutable string.
    Str(Heap<String>),
    /// No value.
    Void,

    // Containers
    /// Mutable ordered sequence.
    Array(ArrayRef),
    /// Mutable map from `HashKey` to value.
    Hash(HashRef),

    // Callables
    /// Function with parameters and a captured environment.
    Function(FunctionValue),
    /// Bare block `_ { ... }` with a captured environment.
    UnderLine(UnderLineValue),
    /// Host callback.
    Native(NativeValue),

    /// Alias to one hash slot, created through the allocation capability.
    Ref(Reference),
}

// Factory Methods

impl Value {
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    #[inline]
    pub fn float(f: f64) -> Self {
        Value::Float(f)
    }

    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    /// Create an array owning `elements`.
    ///
    /// Elements are stored as given; the caller copies them first if they
    /// came from live bindings.
    #[inline]
    pub fn array(elements: Vec<Value>) -> Self {
        Value::Array(Shared::new(ArrayValue::new(elements)))
    }

    /// Create an empty hash.
    #[inline]
    pub fn hash() -> Self {
        Value::Hash(Shared::new(HashValue::new()))
    }

    /// Create a hash from key/value pairs.
    ///
    /// Later pairs overwrite earlier ones with the same key. Fails on the
    /// first key that has no `HashKey`.
    pub fn hash_from<I>(pairs: I) -> Result<Self, EvalError>
    where
        I: IntoIterator<Item = (Value, Value)>,
    {
        let mut hash = HashValue::new();
        for (key, value) in pairs {
            hash.insert(key, value).map_err(|err| match err {
                AllocError::Unhashable(tag) => unhashable_key(tag),
                AllocError::AlreadyPresent => EvalError::new(err.to_string()),
            })?;
        }
        Ok(Value::Hash(Shared::new(hash)))
    }

    /// Create a function value closing over `env`.
    pub fn function(params: Vec<String>, body: SharedBody, env: Environment) -> Self {
        Value::Function(FunctionValue::new(params, body, env))
    }

    /// Create a bare-block value closing over `env`.
    pub fn underline(body: SharedBody, env: Environment) -> Self {
        Value::UnderLine(UnderLineValue::new(body, env))
    }

    /// Wrap a host callback.
    pub fn native<F>(name: &'static str, func: F) -> Self
    where
        F: Fn(&Environment, &[Value]) -> EvalResult + 'static,
    {
        Value::Native(NativeValue::new(name, func))
    }
}

// Value Methods

impl Value {
    /// Kind of this value.
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Int(_) => TypeTag::Integer,
            Value::Float(_) => TypeTag::Float,
            Value::Bool(_) => TypeTag::Boolean,
            Value::Char(_) => TypeTag::Character,
            Value::Str(_) => TypeTag::String,
            Value::Void => TypeTag::Void,
            Value::Array(_) => TypeTag::Array,
            Value::Hash(_) => TypeTag::Hash,
            Value::Function(_) => TypeTag::Function,
            Value::UnderLine(_) => TypeTag::UnderLine,
            Value::Native(_) => TypeTag::Native,
            Value::Ref(_) => TypeTag::Reference,
        }
    }

    /// Upper-case tag name for diagnostics.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_tag().name()
    }

    /// Dispatch capabilities of this value.
    #[inline]
    pub fn capabilities(&self) -> Capabilities {
        self.type_tag().capabilities()
    }

    /// Diagnostic text; identical to `Display`.
    pub fn inspect(&self) -> String {
        self.to_string()
    }

    /// Duplicate this value across an assignment boundary.
    ///
    /// - scalars and callables: the same value (callables share captures)
    /// - arrays and hashes: a deep copy, unless the one-shot share flag is
    ///   set, in which case the flag is cleared and the handle is returned
    /// - references: a deep copy of the aliased value (`Void` if unset)
    ///
    /// Only the outermost container's flag is consulted; nested elements
    /// are always copied.
    pub fn copy(&self) -> Value {
        match self {
            Value::Array(handle) if handle.borrow_mut().take_share_flag() => {
                tracing::trace!("array copy elided");
                self.clone()
            }
            Value::Hash(handle) if handle.borrow_mut().take_share_flag() => {
                tracing::trace!("hash copy elided");
                self.clone()
            }
            _ => self.deep_copy(),
        }
    }

    /// Copy ignoring share flags.
    pub(crate) fn deep_copy(&self) -> Value {
        match self {
            Value::Array(handle) => {
                let copied = ensure_sufficient_stack(|| handle.borrow().deep_copy());
                Value::Array(Shared::new(copied))
            }
            Value::Hash(handle) => {
                let copied = ensure_sufficient_stack(|| handle.borrow().deep_copy());
                Value::Hash(Shared::new(copied))
            }
            Value::Ref(reference) => reference.copy_target(),
            _ => self.clone(),
        }
    }

    /// Whether `target` can be reached from this value.
    ///
    /// A reference into `target` counts as reaching it.
    pub(crate) fn reaches(&self, target: &HashRef) -> bool {
        match self {
            Value::Array(handle) => {
                ensure_sufficient_stack(|| handle.borrow().iter().any(|v| v.reaches(target)))
            }
            Value::Hash(handle) => {
                handle.ptr_eq(target)
                    || ensure_sufficient_stack(|| {
                        handle.borrow().values().any(|v| v.reaches(target))
                    })
            }
            Value::Ref(reference) => {
                reference.slot().origin().ptr_eq(target)
                    || reference.get().is_some_and(|v| v.reaches(target))
            }
            _ => false,
        }
    }

    /// Project onto a map key, if this value is hashable.
    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Value::Int(n) => Some(HashKey::Int(*n)),
            Value::Bool(b) => Some(HashKey::Bool(*b)),
            Value::Char(c) => Some(HashKey::Char(*c)),
            Value::Str(s) => Some(HashKey::Str(s.clone())),
            _ => None,
        }
    }

    /// Numeric view (Numeric capability).
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Int(n) => Some(Number::Int(*n)),
            Value::Float(f) => Some(Number::Float(*f)),
            _ => None,
        }
    }

    /// Plain string view (Letter capability).
    pub fn letter(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::Str(s) => Some(Cow::Borrowed(s.as_str())),
            Value::Char(c) => Some(Cow::Owned(c.to_string())),
            _ => None,
        }
    }

    /// Whether this value can be invoked (Callable capability).
    #[inline]
    pub fn is_callable(&self) -> bool {
        self.capabilities().contains(Capabilities::CALLABLE)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayRef> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_hash(&self) -> Option<&HashRef> {
        match self {
            Value::Hash(h) => Some(h),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            Value::Ref(r) => Some(r),
            _ => None,
        }
    }
}

// Trait Implementations

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(n) => write!(f, "Float({n})"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Char(c) => write!(f, "Char({c:?})"),
            Value::Str(s) => write!(f, "Str({:?})", s.as_str()),
            Value::Void => write!(f, "Void"),
            Value::Array(a) => write!(f, "Array({:?})", a.borrow().elements()),
            Value::Hash(h) => {
                let hash = h.borrow();
                let entries = hash
                    .sorted_pairs()
                    .into_iter()
                    .map(|(_, pair)| (pair.key(), pair.value()));
                write!(f, "Hash(")?;
                f.debug_map().entries(entries).finish()?;
                write!(f, ")")
            }
            Value::Function(func) => write!(f, "Function({func:?})"),
            Value::UnderLine(u) => write!(f, "UnderLine({u:?})"),
            Value::Native(n) => write!(f, "Native({n:?})"),
            Value::Ref(r) => write!(f, "Ref({r:?})"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => f.write_str(&float::format_float(*n)),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Char(c) => write!(f, "'{c}'"),
            Value::Str(s) => write!(f, "{:?}", s.as_str()),
            Value::Void => write!(f, "void"),
            Value::Array(a) => ensure_sufficient_stack(|| {
                write!(f, "[")?;
                for (i, item) in a.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }),
            Value::Hash(h) => ensure_sufficient_stack(|| {
                write!(f, "{{ ")?;
                for (i, (_, pair)) in h.borrow().sorted_pairs().into_iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    match pair.value() {
                        Some(v) => write!(f, "{}: {v}", pair.key())?,
                        None => write!(f, "{}: void", pair.key())?,
                    }
                }
                write!(f, " }}")
            }),
            Value::Function(func) => write!(f, "{func}"),
            Value::UnderLine(u) => write!(f, "{u}"),
            Value::Native(n) => write!(f, "{n}"),
            Value::Ref(r) => write!(f, "{r}"),
        }
    }
}

impl PartialEq for Value {
    /// Structural for data, identity for callables and references.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Void, Value::Void) => true,
            (Value::Array(a), Value::Array(b)) => {
                a.ptr_eq(b) || a.borrow().elements() == b.borrow().elements()
            }
            (Value::Hash(a), Value::Hash(b)) => a.ptr_eq(b) || *a.borrow() == *b.borrow(),
            (Value::Function(a), Value::Function(b)) => a == b,
            (Value::UnderLine(a), Value::UnderLine(b)) => a == b,
            (Value::Native(a), Value::Native(b)) => a == b,
            (Value::Ref(a), Value::Ref(b)) => a.slot().same_slot(b.slot()),
            _ => false,
        }
    }
}
