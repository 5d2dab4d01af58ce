//! Calculator core for keypad-driven expressions.
//!
//! This module provides functionality to:
//! - Accumulate keystrokes into a guarded expression buffer
//! - Translate display glyphs into evaluator syntax
//! - Detect whether the buffer holds something worth evaluating
//! - Evaluate expressions using fend
//! - Fold long results into a bounded display form

mod buffer;
mod detection;
mod evaluation;
mod format;
mod normalize;

pub use buffer::{ExpressionBuffer, Operator, PENDING_GLYPHS};
pub use detection::{is_plain_number, looks_like_expression};
pub use evaluation::{EvalError, Evaluation, Evaluator, FendEvaluator};
pub use format::{FoldPolicy, ResultFormatter, trim_zero_fraction};
pub use normalize::normalize_expression;
