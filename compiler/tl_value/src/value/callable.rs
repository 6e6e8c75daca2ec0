//! Callable values: functions, bare blocks, and host callbacks.
//!
//! Functions and bare blocks hold an opaque body and the environment they
//! were created in. The body is only ever executed by the evaluator, which
//! recovers its own AST type through [`BlockBody::as_any`]. Copying a callable
//! is shallow: the captured environment is shared, never duplicated.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use crate::environment::Environment;
use crate::errors::EvalResult;
use crate::heap::Heap;

use super::Value;

/// Opaque block of statements owned by the evaluator.
pub trait BlockBody: fmt::Display + fmt::Debug {
    fn as_any(&self) -> &dyn Any;
}

/// Shared handle to a block body.
pub type SharedBody = Rc<dyn BlockBody>;

/// Host callback signature.
///
/// Any outcome may be returned, including control signals; callers treat it
/// exactly like the result of evaluating an expression.
pub type NativeFn = dyn Fn(&Environment, &[Value]) -> EvalResult;

// FunctionValue

/// Function value (closure).
#[derive(Clone)]
pub struct FunctionValue {
    params: Heap<Vec<String>>,
    body: SharedBody,
    env: Environment,
}

impl FunctionValue {
    pub fn new(params: Vec<String>, body: SharedBody, env: Environment) -> Self {
        FunctionValue {
            params: Heap::new(params),
            body,
            env,
        }
    }

    /// Parameter names in declaration order.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn body(&self) -> &SharedBody {
        &self.body
    }

    /// Environment captured at creation.
    pub fn env(&self) -> &Environment {
        &self.env
    }
}

impl PartialEq for FunctionValue {
    /// Identity: same body and same captured scope.
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.body, &other.body) && self.env.ptr_eq(&other.env)
    }
}

impl fmt::Display for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "func({}) {}", self.params.join(", "), self.body)
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionValue")
            .field("params", &*self.params)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

// UnderLineValue

/// Bare block `_ { ... }`: a closure without parameters.
#[derive(Clone)]
pub struct UnderLineValue {
    body: SharedBody,
    env: Environment,
}

impl UnderLineValue {
    pub fn new(body: SharedBody, env: Environment) -> Self {
        UnderLineValue { body, env }
    }

    pub fn body(&self) -> &SharedBody {
        &self.body
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }
}

impl PartialEq for UnderLineValue {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.body, &other.body) && self.env.ptr_eq(&other.env)
    }
}

impl fmt::Display for UnderLineValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_ {}", self.body)
    }
}

impl fmt::Debug for UnderLineValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnderLineValue")
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

// NativeValue

/// Host-provided builtin. Has no lexical capture; it receives the caller's
/// environment on each call.
#[derive(Clone)]
pub struct NativeValue {
    name: &'static str,
    func: Rc<NativeFn>,
}

impl NativeValue {
    pub fn new<F>(name: &'static str, func: F) -> Self
    where
        F: Fn(&Environment, &[Value]) -> EvalResult + 'static,
    {
        NativeValue {
            name,
            func: Rc::new(func),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Run the callback.
    pub fn call(&self, env: &Environment, args: &[Value]) -> EvalResult {
        (self.func)(env, args)
    }
}

impl PartialEq for NativeValue {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Display for NativeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("func [Native]")
    }
}

impl fmt::Debug for NativeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeValue({})", self.name)
    }
}
