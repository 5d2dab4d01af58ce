//! Expression evaluation using fend.
//!
//! Wraps fend behind the [`Evaluator`] trait so the session can be driven
//! by any evaluation capability with the same contract.

use fend_core::Context;
use thiserror::Error;

use super::detection::is_plain_number;

/// Outcome of evaluating a normalized expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Evaluation {
    /// Exact decimal text of a numeric result.
    Value(String),
    /// The expression is not (yet) complete; nothing to show.
    NoResult,
}

impl Evaluation {
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Value(text) => Some(text),
            Self::NoResult => None,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// The evaluator could not parse or compute the expression.
    #[error("evaluator rejected `{expression}`: {message}")]
    Rejected { expression: String, message: String },
}

/// A generic math-expression evaluation capability.
pub trait Evaluator {
    /// Evaluate an expression already in evaluator syntax.
    ///
    /// Incomplete or empty input yields `Ok(Evaluation::NoResult)`. `Err` is
    /// reserved for faults inside the evaluator itself.
    fn evaluate(&mut self, normalized: &str) -> Result<Evaluation, EvalError>;
}

/// Evaluator backed by `fend_core`, one context per session.
pub struct FendEvaluator {
    context: Context,
}

impl FendEvaluator {
    pub fn new() -> Self {
        Self {
            context: Context::new(),
        }
    }
}

impl Default for FendEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator for FendEvaluator {
    fn evaluate(&mut self, normalized: &str) -> Result<Evaluation, EvalError> {
        let expression = normalized.trim();
        if expression.is_empty() {
            return Ok(Evaluation::NoResult);
        }

        let result = fend_core::evaluate(expression, &mut self.context).map_err(|message| {
            EvalError::Rejected {
                expression: expression.to_string(),
                message,
            }
        })?;

        let value = result.get_main_result().trim();
        let value = value.strip_prefix("approx. ").unwrap_or(value);

        if value.is_empty() || !is_plain_number(value) {
            tracing::debug!(expression, value, "non-numeric result ignored");
            return Ok(Evaluation::NoResult);
        }

        Ok(Evaluation::Value(value.to_string()))
    }
}
