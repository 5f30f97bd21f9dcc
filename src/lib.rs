//! Boolean gating conditions for stream notifications.
//!
//! A condition such as `(Minecraft.Contains(Mine) || (30 > 30 && X == Y))` is
//! evaluated after its placeholders have been replaced by literal values.
//! Evaluation is fail-closed: a malformed condition is `false`, while an
//! absent or empty one is `true`.
//!
//! ```
//! use notify_condition::evaluate;
//!
//! assert!(evaluate("(30 > 30 && 1 == 1) || (2 == 2)"));
//! assert!(!evaluate("(100 > 101 && (Englisch == English))"));
//! assert!(evaluate(None::<&str>));
//! ```
mod ast;
mod engine;
mod error;
pub mod leaf;
mod lexer;
pub mod operators;
mod parser;
pub mod reducer;
pub mod scanner;

pub use crate::{
    ast::{Group, Node},
    engine::{evaluate, Condition},
    error::ConditionError,
    parser::{check_balance, parse, MAX_DEPTH},
};
