//! TLang Eval - evaluator boundary for the TLang interpreter.
//!
//! The tree walk itself lives with the parser's AST; this crate provides the
//! pieces every tree walk needs and that must agree with the value model:
//!
//! - `exec::control`: where each control signal stops (block, loop, bare
//!   block, function call, program)
//! - `exec::call`: invoking callables, binding parameters with value
//!   semantics, and the call-depth guard
//! - `EvalConfig`: evaluation policy (copy elision, call depth)
//!
//! # Re-exports
//!
//! Value types from `tl_value` are re-exported for convenience.

mod config;
pub mod exec;

use std::sync::Once;

pub use config::{ConfigError, EvalConfig};
pub use exec::call::{invoke, Evaluate, Machine};
pub use exec::control::{
    eval_bare_block, eval_block, eval_loop, finish_call, run_top_level, to_loop_action,
    LoopAction,
};
pub use tl_value::{ControlAction, Environment, EvalError, EvalResult, TypeTag, Value};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=tl_eval=debug` or
/// `RUST_LOG=tl_value=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
