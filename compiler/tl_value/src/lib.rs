//! TLang Value - runtime value model for the TLang interpreter.
//!
//! This crate provides:
//! - Runtime value types (`Value`, `ArrayValue`, `HashValue`, callables)
//! - The type tag and capability flags used for evaluator dispatch
//! - The hash key model used for map keys
//! - The allocation capability (`Allocate`) and the `Reference` alias built on it
//! - The shared binding `Environment` captured by closures
//! - Control signals (`ControlAction`) and the `EvalError` carrier
//!
//! # Value Semantics
//!
//! `Clone` on a [`Value`] duplicates the handle: two clones of an array see
//! the same elements. [`Value::copy`] is the assignment-boundary operation and
//! deep-copies composites. The evaluator calls `copy` whenever a value is
//! bound to a name or passed as an argument; `Reference` is the only way to
//! intentionally share a mutable container slot.
//!
//! # Control Signals
//!
//! `return`, `out`, `jump` and runtime errors travel on the `Err` side of
//! [`EvalResult`], never as `Value` variants. A signal cannot be stored in a
//! container or copied, because `ControlAction` is neither a `Value` nor `Clone`.

mod environment;
mod errors;
mod hash_key;
mod heap;
mod reference;
mod stack;
mod tag;
mod value;

pub use environment::{AssignError, Environment, Mutability};
pub use errors::{
    arity_mismatch, call_depth_exceeded, cannot_assign_const, index_out_of_bounds,
    not_callable, signal_outside_boundary, type_mismatch, unhashable_key, ControlAction,
    EvalError, EvalErrorKind, EvalResult,
};
pub use hash_key::HashKey;
pub use heap::{Heap, Shared};
pub use reference::{AllocError, Allocate, Reference, ReferenceError, Slot, SlotError};
pub use stack::ensure_sufficient_stack;
pub use tag::{Capabilities, TypeTag};
pub use value::{
    ArrayRef, ArrayValue, BlockBody, FunctionValue, HashPair, HashRef, HashValue, NativeFn,
    NativeValue, Number, SharedBody, UnderLineValue, Value,
};
