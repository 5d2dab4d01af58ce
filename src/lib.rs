//! Keypad calculator core.
//!
//! Keystrokes accumulate into a guarded expression buffer, complete
//! expressions are evaluated eagerly, and results are folded into a
//! bounded-width display form.

pub mod calculator;
pub mod caret;
pub mod config;
pub mod history;
pub mod service;
pub mod session;

/// Name used for the config and data directories.
pub const APP_NAME: &str = "keycalc";

pub use calculator::{Evaluation, Evaluator, ExpressionBuffer, FendEvaluator, Operator};
pub use session::{Command, Session, SessionState, Snapshot};
