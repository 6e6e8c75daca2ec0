//! Invoking callables.
//!
//! Arguments cross the call boundary with value semantics: each one is
//! copied before it is bound in the callee's scope. A function's result is
//! handed back as-is and copied when the caller stores it. With copy elision
//! the copy moves to the callee boundary instead, so nested returns of a
//! fresh container are not copied again.

use tl_value::{
    arity_mismatch, call_depth_exceeded, not_callable, Environment, EvalError, EvalResult,
    FunctionValue, Mutability, NativeValue, SharedBody, TypeTag, UnderLineValue, Value,
};

use super::control::{eval_bare_block, finish_call};
use crate::EvalConfig;

/// Evaluates callable bodies on behalf of [`invoke`].
///
/// Implemented by the tree walk, which owns the AST behind `SharedBody`.
pub trait Evaluate {
    /// Call bookkeeping for this evaluation.
    fn machine(&mut self) -> &mut Machine;

    /// Evaluate a function or underline body in `env`.
    fn eval_body(&mut self, body: &SharedBody, env: &Environment) -> EvalResult;
}

/// Per-evaluation call state.
#[derive(Debug, Default)]
pub struct Machine {
    config: EvalConfig,
    depth: usize,
}

impl Machine {
    pub fn new(config: EvalConfig) -> Self {
        Machine { config, depth: 0 }
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Number of calls currently active.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Value to store when binding `value` to a name or slot.
    #[inline]
    pub fn bind_value(&self, value: &Value) -> Value {
        value.copy()
    }

    /// Bind a value whose source is dead (a temporary, a call result the
    /// caller consumes directly); ownership moves without a copy.
    #[inline]
    pub fn bind_owned(&self, value: Value) -> Value {
        value
    }

    /// Prepare a call result for the caller.
    ///
    /// The callee may return a handle that is still bound elsewhere, so with
    /// copy elision on the result is copied here, at the callee boundary,
    /// and the fresh container is marked so the caller's rebinding
    /// (`bind_value`) takes it without a second copy. A result that is
    /// already a marked fresh container passes through without copying.
    pub fn rebind_result(&self, value: Value) -> Value {
        if !self.config.copy_elision() {
            return value;
        }
        let fresh = value.copy();
        match &fresh {
            Value::Array(array) => array.borrow_mut().mark_shareable(),
            Value::Hash(hash) => hash.borrow_mut().mark_shareable(),
            _ => {}
        }
        fresh
    }

    fn enter(&mut self) -> Result<(), EvalError> {
        if self.depth >= self.config.max_call_depth() {
            return Err(call_depth_exceeded(self.config.max_call_depth()));
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

/// Call `callee` with `args`.
///
/// `caller_env` is only visible to natives; functions and underlines run in
/// a scope enclosing the environment they captured.
#[tracing::instrument(level = "debug", skip_all, fields(callee = %callee.type_tag(), args = args.len()))]
pub fn invoke<E>(
    evaluator: &mut E,
    callee: &Value,
    caller_env: &Environment,
    args: &[Value],
) -> EvalResult
where
    E: Evaluate + ?Sized,
{
    match callee {
        Value::Function(func) => call_function(evaluator, func, args),
        Value::UnderLine(underline) => call_underline(evaluator, underline, args),
        Value::Native(native) => call_native(evaluator, native, caller_env, args),
        Value::Ref(reference) => match reference.get() {
            Some(target) if target.is_callable() => {
                invoke(evaluator, &target, caller_env, args)
            }
            Some(target) => Err(not_callable(target.type_tag()).into()),
            None => Err(not_callable(TypeTag::Void).into()),
        },
        other => Err(not_callable(other.type_tag()).into()),
    }
}

/// Verify the argument count matches the function's parameters.
pub fn check_arg_count(func: &FunctionValue, args: &[Value]) -> Result<(), EvalError> {
    if args.len() != func.arity() {
        return Err(arity_mismatch(func.arity(), args.len()));
    }
    Ok(())
}

/// Bind copies of `args` to `func`'s parameters in a fresh scope.
pub fn bind_parameters(machine: &Machine, func: &FunctionValue, args: &[Value]) -> Environment {
    let env = func.env().enclosed();
    for (param, arg) in func.params().iter().zip(args) {
        env.define(param.as_str(), machine.bind_value(arg), Mutability::Mutable);
    }
    env
}

fn call_function<E>(evaluator: &mut E, func: &FunctionValue, args: &[Value]) -> EvalResult
where
    E: Evaluate + ?Sized,
{
    check_arg_count(func, args)?;
    let env = bind_parameters(evaluator.machine(), func, args);

    evaluator.machine().enter()?;
    let result = evaluator.eval_body(func.body(), &env);
    evaluator.machine().leave();

    let value = finish_call(result)?;
    Ok(evaluator.machine().rebind_result(value))
}

/// Underlines take no arguments. `Out` yields their value; `Return` and
/// `Jump` belong to the enclosing function and loop.
fn call_underline<E>(evaluator: &mut E, underline: &UnderLineValue, args: &[Value]) -> EvalResult
where
    E: Evaluate + ?Sized,
{
    if !args.is_empty() {
        return Err(arity_mismatch(0, args.len()).into());
    }
    let env = underline.env().enclosed();

    evaluator.machine().enter()?;
    let result = eval_bare_block(|| evaluator.eval_body(underline.body(), &env));
    evaluator.machine().leave();

    result
}

/// A native's result is treated as if an expression produced it: a signal
/// it returns propagates from the call site unchanged.
fn call_native<E>(
    evaluator: &mut E,
    native: &NativeValue,
    caller_env: &Environment,
    args: &[Value],
) -> EvalResult
where
    E: Evaluate + ?Sized,
{
    let machine = evaluator.machine();
    let args: Vec<Value> = args.iter().map(|arg| machine.bind_value(arg)).collect();
    tracing::trace!(name = native.name(), "calling native");

    machine.enter()?;
    let result = native.call(caller_env, &args);
    machine.leave();

    result.map(|value| machine.rebind_result(value))
}
