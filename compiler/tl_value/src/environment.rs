//! Binding environment captured by closures.
//!
//! An [`Environment`] is a handle to one scope in a parent-linked chain.
//! Closures store the handle they were created in; every closure created in
//! the same scope shares it, and later rebinding in that scope is visible to
//! all of them. The value model never inspects bindings itself, it only
//! stores the handle and hands it back to the evaluator.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::heap::Shared;
use crate::value::Value;

/// Whether a variable binding can be reassigned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutability {
    /// Binding can be reassigned.
    Mutable,
    /// Binding cannot be reassigned.
    Immutable,
}

impl Mutability {
    /// Returns `true` if this is `Mutable`.
    #[inline]
    pub fn is_mutable(self) -> bool {
        matches!(self, Mutability::Mutable)
    }
}

/// Error returned by [`Environment::assign`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AssignError {
    /// Variable exists but is immutable.
    #[error("binding is immutable")]
    Immutable,
    /// Variable not found in any scope.
    #[error("binding is undefined")]
    Undefined,
}

#[derive(Debug)]
struct Binding {
    value: Value,
    mutability: Mutability,
}

/// A single scope: bindings plus an optional enclosing scope.
#[derive(Default)]
struct Scope {
    bindings: FxHashMap<String, Binding>,
    parent: Option<Environment>,
}

impl Scope {
    fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(binding) = self.bindings.get(name) {
            return Some(binding.value.clone());
        }
        self.parent.as_ref().and_then(|parent| parent.lookup(name))
    }

    fn assign(&mut self, name: &str, value: Value) -> Result<(), AssignError> {
        if let Some(binding) = self.bindings.get_mut(name) {
            if !binding.mutability.is_mutable() {
                return Err(AssignError::Immutable);
            }
            binding.value = value;
            return Ok(());
        }
        match &self.parent {
            Some(parent) => parent.assign(name, value),
            None => Err(AssignError::Undefined),
        }
    }
}

/// Shared handle to a binding scope.
///
/// Cloning the handle does not copy bindings.
#[derive(Clone)]
pub struct Environment(Shared<Scope>);

impl Environment {
    /// Create a root scope with no parent.
    pub fn new() -> Self {
        Environment(Shared::new(Scope::default()))
    }

    /// Create a child scope whose lookups fall back to `self`.
    #[must_use]
    pub fn enclosed(&self) -> Self {
        Environment(Shared::new(Scope {
            bindings: FxHashMap::default(),
            parent: Some(self.clone()),
        }))
    }

    /// Define (or shadow) a binding in this scope.
    pub fn define(&self, name: impl Into<String>, value: Value, mutability: Mutability) {
        self.0
            .borrow_mut()
            .bindings
            .insert(name.into(), Binding { value, mutability });
    }

    /// Look up a binding, searching enclosing scopes outward.
    ///
    /// Returns a handle clone: composites come back aliased, and the caller
    /// decides whether the use site needs a `copy`.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.0.borrow().lookup(name)
    }

    /// Rebind an existing variable in the nearest scope that defines it.
    pub fn assign(&self, name: &str, value: Value) -> Result<(), AssignError> {
        self.0.borrow_mut().assign(name, value)
    }

    /// Whether both handles refer to the same scope.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.0.ptr_eq(&other.0)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scope = self.0.borrow();
        f.debug_struct("Environment")
            .field("bindings", &scope.bindings.len())
            .field("has_parent", &scope.parent.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests;
