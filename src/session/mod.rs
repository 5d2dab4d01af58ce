//! A calculation session: the buffer, its evaluator and the live result.
//!
//! Every command synchronously edits the buffer and, when the buffer holds
//! a complete expression, evaluates and formats it before returning.

mod command;

pub use command::{Command, KeyError, parse_keys};

use serde::Serialize;

use crate::calculator::{
    Evaluation, Evaluator, ExpressionBuffer, FendEvaluator, ResultFormatter, looks_like_expression,
    trim_zero_fraction,
};
use crate::config::Config;
use crate::history::{HistoryEntry, HistoryError, HistorySink};

/// Where the session stands after the last command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Empty,
    Accumulating,
    /// The buffer ends with an operator or a dot.
    PendingOperator,
    HasResult,
}

/// What the presentation layer shows after a command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub expression: String,
    /// Folded result, empty when there is none.
    pub display: String,
    pub state: SessionState,
}

pub struct Session {
    buffer: ExpressionBuffer,
    /// Raw text of the live result, if any.
    result: Option<String>,
    display: String,
    evaluator: Box<dyn Evaluator + Send>,
    formatter: ResultFormatter,
    history: Option<Box<dyn HistorySink + Send>>,
    trim_zero_fraction: bool,
}

impl Session {
    pub fn new(evaluator: impl Evaluator + Send + 'static) -> Self {
        Self {
            buffer: ExpressionBuffer::new(),
            result: None,
            display: String::new(),
            evaluator: Box::new(evaluator),
            formatter: ResultFormatter::default(),
            history: None,
            trim_zero_fraction: true,
        }
    }

    /// A fend-backed session configured from `config`, without history.
    pub fn from_config(config: &Config) -> Self {
        Self::new(FendEvaluator::new())
            .with_formatter(ResultFormatter::new(config.format))
            .with_trim_zero_fraction(config.commit.trim_zero_fraction)
    }

    pub fn with_formatter(mut self, formatter: ResultFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn with_history(mut self, history: impl HistorySink + Send + 'static) -> Self {
        self.history = Some(Box::new(history));
        self
    }

    pub fn with_trim_zero_fraction(mut self, trim: bool) -> Self {
        self.trim_zero_fraction = trim;
        self
    }

    /// Apply one command and return the resulting view.
    pub fn apply(&mut self, command: Command) -> Snapshot {
        match command {
            Command::Digit(digit) if digit.is_ascii_digit() => {
                let mut utf8 = [0; 4];
                self.buffer.append_digit_or_dot(digit.encode_utf8(&mut utf8));
                self.refresh();
            }
            Command::Digit(digit) => {
                tracing::trace!(%digit, expression = %self.buffer, "non-digit key ignored");
            }
            Command::Dot => {
                self.buffer.append_digit_or_dot(".");
                self.refresh();
            }
            Command::Operator(op) => {
                if self.buffer.append_operator(op) {
                    self.refresh();
                } else {
                    tracing::trace!(%op, expression = %self.buffer, "operator rejected");
                }
            }
            Command::ToggleSign => {
                self.buffer.toggle_sign();
                self.refresh();
            }
            Command::Delete => {
                if self.buffer.delete_last_character() {
                    self.refresh();
                }
            }
            Command::Commit => self.commit(),
            Command::Reset => self.reset(),
        }
        self.snapshot()
    }

    /// Apply a sequence of commands, returning the final view.
    pub fn apply_all(&mut self, commands: impl IntoIterator<Item = Command>) -> Snapshot {
        for command in commands {
            self.apply(command);
        }
        self.snapshot()
    }

    pub fn expression(&self) -> &str {
        self.buffer.as_str()
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn state(&self) -> SessionState {
        if self.buffer.is_empty() {
            SessionState::Empty
        } else if !self.buffer.is_evaluable() {
            SessionState::PendingOperator
        } else if self.result.is_some() {
            SessionState::HasResult
        } else {
            SessionState::Accumulating
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            expression: self.buffer.to_string(),
            display: self.display.clone(),
            state: self.state(),
        }
    }

    /// Entries from the attached history sink, empty when there is none.
    pub fn history(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        match &self.history {
            Some(history) => history.entries(),
            None => Ok(Vec::new()),
        }
    }

    pub fn clear_history(&mut self) -> Result<(), HistoryError> {
        match &mut self.history {
            Some(history) => history.clear(),
            None => Ok(()),
        }
    }

    pub fn reset(&mut self) {
        self.buffer.reset();
        self.clear_result();
    }

    fn clear_result(&mut self) {
        self.result = None;
        self.display.clear();
    }

    /// Re-derive the live result from the current buffer.
    fn refresh(&mut self) {
        self.clear_result();

        let expression = self.buffer.as_str();
        if !self.buffer.is_evaluable() || !looks_like_expression(expression) {
            return;
        }

        let normalized = self.buffer.normalize();
        match self.evaluator.evaluate(&normalized) {
            Ok(Evaluation::Value(value)) => {
                tracing::debug!(expression, %normalized, %value, "evaluated");
                self.display = self.formatter.format(&value);
                self.result = Some(value);
            }
            Ok(Evaluation::NoResult) => {
                tracing::debug!(expression, %normalized, "no result");
            }
            Err(err) => {
                tracing::debug!(expression, "evaluation fault: {err}");
            }
        }
    }

    /// Carry the live result forward as the new expression.
    fn commit(&mut self) {
        let Some(result) = self.result.take() else {
            tracing::trace!(expression = %self.buffer, "nothing to commit");
            return;
        };

        if let Some(history) = &mut self.history {
            let entry = HistoryEntry::new(self.buffer.as_str(), result.as_str());
            if let Err(err) = history.record(&entry) {
                tracing::warn!("failed to record history: {err}");
            }
        }

        let carried = if self.trim_zero_fraction {
            trim_zero_fraction(&result)
        } else {
            result.as_str()
        };
        self.buffer.replace(carried);
        self.display.clear();
    }
}
