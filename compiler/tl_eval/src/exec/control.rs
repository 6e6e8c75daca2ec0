//! Control signal boundaries (blocks, loops, bare blocks, calls, program).
//!
//! Signals travel on the `Err` side of [`EvalResult`], so `?` carries them
//! outward from the statement that raised them. Each construct below is the
//! single place a given signal stops:
//!
//! | signal   | stopped by                         |
//! |----------|------------------------------------|
//! | `Return` | function call, program             |
//! | `Out`    | loop, bare block                   |
//! | `Jump`   | loop (skips to the next iteration) |
//! | `Error`  | nothing; reported by the program   |

use tl_value::{signal_outside_boundary, ControlAction, EvalError, EvalResult, Value};

/// Evaluate statements in order, yielding the last statement's value.
///
/// The first signal stops the block; later statements are never evaluated.
/// An empty block yields `Void`.
pub fn eval_block<S, I, F>(stmts: I, mut eval_fn: F) -> EvalResult
where
    I: IntoIterator<Item = S>,
    F: FnMut(S) -> EvalResult,
{
    let mut last = Value::Void;
    for stmt in stmts {
        last = eval_fn(stmt)?;
    }
    Ok(last)
}

/// What a loop does after one iteration of its body.
#[derive(Debug)]
pub enum LoopAction {
    /// Evaluate the condition again.
    Continue,
    /// Leave the loop with this value.
    Break(Value),
    /// Leave the loop and keep propagating.
    Propagate(ControlAction),
}

/// Classify a loop body result.
pub fn to_loop_action(result: EvalResult) -> LoopAction {
    match result {
        Ok(_) | Err(ControlAction::Jump) => LoopAction::Continue,
        Err(ControlAction::Out(value)) => LoopAction::Break(value),
        Err(action) => LoopAction::Propagate(action),
    }
}

/// Run a `while`-style loop.
///
/// Yields the `Out` payload if the body leaves early, `Void` once the
/// condition turns false.
pub fn eval_loop<C, B>(mut cond: C, mut body: B) -> EvalResult
where
    C: FnMut() -> EvalResult<bool>,
    B: FnMut() -> EvalResult,
{
    loop {
        if !cond()? {
            return Ok(Value::Void);
        }
        match to_loop_action(body()) {
            LoopAction::Continue => {}
            LoopAction::Break(value) => return Ok(value),
            LoopAction::Propagate(action) => return Err(action),
        }
    }
}

/// Evaluate an underline body, where `Out` yields the block's value.
///
/// `Jump` is not caught here; it belongs to the enclosing loop.
pub fn eval_bare_block<F>(body: F) -> EvalResult
where
    F: FnOnce() -> EvalResult,
{
    match body() {
        Err(ControlAction::Out(value)) => Ok(value),
        other => other,
    }
}

/// Close a function call: `Return` becomes the call's value.
///
/// `Out` or `Jump` reaching a function boundary never found its loop, so it
/// becomes an error instead of escaping into the caller's loops.
pub fn finish_call(result: EvalResult) -> EvalResult {
    match result {
        Ok(value) | Err(ControlAction::Return(value)) => Ok(value),
        Err(action @ (ControlAction::Out(_) | ControlAction::Jump)) => {
            tracing::debug!(signal = %action.type_tag(), "signal reached function boundary");
            Err(signal_outside_boundary(action.type_tag(), "function").into())
        }
        Err(error @ ControlAction::Error(_)) => Err(error),
    }
}

/// Close a whole program.
///
/// A top-level `Return` ends the program with its value. An `Error` is
/// surfaced to the host, as is any `Out` or `Jump` that found no loop.
pub fn run_top_level(result: EvalResult) -> Result<Value, EvalError> {
    match result {
        Ok(value) | Err(ControlAction::Return(value)) => Ok(value),
        Err(ControlAction::Error(error)) => Err(error),
        Err(action @ (ControlAction::Out(_) | ControlAction::Jump)) => {
            Err(signal_outside_boundary(action.type_tag(), "program"))
        }
    }
}

#[cfg(test)]
mod tests;
