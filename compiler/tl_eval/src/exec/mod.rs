//! Evaluation boundaries shared by every tree walk.

pub mod call;
pub mod control;
