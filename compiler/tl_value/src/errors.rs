//! Control signals and runtime errors.
//!
//! The evaluator has one return channel. Data travels on the `Ok` side of
//! [`EvalResult`]; control-flow decisions travel on the `Err` side as a
//! [`ControlAction`], so `?` stops local evaluation and bubbles the signal to
//! whichever boundary handles it:
//!
//! | Signal   | Handled at                        |
//! |----------|-----------------------------------|
//! | `Return` | function-call boundary            |
//! | `Out`    | nearest loop or bare block        |
//! | `Jump`   | nearest loop (next iteration)     |
//! | `Error`  | top-level evaluation entry only   |
//!
//! `ControlAction` is deliberately not `Clone`. A signal is in flight exactly
//! once; there is no operation that duplicates it.

use std::fmt;

use crate::tag::TypeTag;
use crate::value::Value;

/// Result of evaluation.
pub type EvalResult<T = Value> = Result<T, ControlAction>;

/// Control-flow outcome carried on the error side of [`EvalResult`].
#[derive(Debug)]
pub enum ControlAction {
    /// `return`: unwound to the function-call boundary.
    Return(Value),
    /// `out`: early exit from the nearest loop or bare block.
    Out(Value),
    /// `jump`: skip to the next loop iteration.
    Jump,
    /// Runtime fault, unwrapped only at top level.
    Error(EvalError),
}

impl ControlAction {
    /// Tag of this signal.
    pub fn type_tag(&self) -> TypeTag {
        match self {
            ControlAction::Return(_) => TypeTag::Return,
            ControlAction::Out(_) => TypeTag::Out,
            ControlAction::Jump => TypeTag::Jump,
            ControlAction::Error(_) => TypeTag::Error,
        }
    }

    /// Whether this is a runtime fault rather than structured control flow.
    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self, ControlAction::Error(_))
    }
}

impl From<EvalError> for ControlAction {
    #[inline]
    fn from(err: EvalError) -> Self {
        ControlAction::Error(err)
    }
}

impl fmt::Display for ControlAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlAction::Return(v) | ControlAction::Out(v) => write!(f, "{v}"),
            ControlAction::Jump => f.write_str("jump"),
            ControlAction::Error(err) => write!(f, "ERROR: {err}"),
        }
    }
}

/// Typed category of a runtime error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: TypeTag },
    #[error("{tag} is not callable")]
    NotCallable { tag: TypeTag },
    #[error("{tag} cannot be used as a hash key")]
    UnhashableKey { tag: TypeTag },
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: i64, len: usize },
    #[error("expected {expected} arguments, got {got}")]
    ArityMismatch { expected: usize, got: usize },
    #[error("cannot assign through a const reference")]
    ConstReference,
    #[error("`{signal}` escaped its enclosing {boundary}")]
    SignalOutsideBoundary {
        signal: TypeTag,
        boundary: &'static str,
    },
    #[error("maximum call depth exceeded (limit: {limit})")]
    CallDepthExceeded { limit: usize },
    /// Catch-all for errors raised by the evaluator with a free-form message.
    #[error("{0}")]
    Custom(String),
}

/// A program-level runtime error.
///
/// Constructed by the evaluator when a language-level fault occurs and
/// carried as [`ControlAction::Error`] until the top-level driver reports it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct EvalError {
    kind: EvalErrorKind,
    message: String,
}

impl EvalError {
    /// Create an error with a free-form message.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: EvalErrorKind::Custom(message.clone()),
            message,
        }
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self { kind, message }
    }

    /// Structured category.
    pub fn kind(&self) -> &EvalErrorKind {
        &self.kind
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cold]
pub fn type_mismatch(expected: impl Into<String>, got: TypeTag) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.into(),
        got,
    })
}

#[cold]
pub fn not_callable(tag: TypeTag) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable { tag })
}

#[cold]
pub fn unhashable_key(tag: TypeTag) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnhashableKey { tag })
}

#[cold]
pub fn index_out_of_bounds(index: i64, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds { index, len })
}

#[cold]
pub fn arity_mismatch(expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch { expected, got })
}

#[cold]
pub fn cannot_assign_const() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ConstReference)
}

/// An `out` or `jump` reached a boundary that cannot absorb it.
#[cold]
pub fn signal_outside_boundary(signal: TypeTag, boundary: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::SignalOutsideBoundary { signal, boundary })
}

#[cold]
pub fn call_depth_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CallDepthExceeded { limit })
}

#[cfg(test)]
mod tests;
