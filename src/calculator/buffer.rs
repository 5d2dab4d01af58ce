//! The in-progress expression typed on the keypad.
//!
//! The buffer holds display glyphs (`×`, `÷`, `√`, ...) exactly as the user
//! sees them. Every mutation goes through one of the edit operations below,
//! which keep two guards in place: no operator directly after another
//! operator (or a dot), and no evaluation while an operator is pending.

use std::fmt;

use super::normalize::normalize_expression;

/// Characters after which another operator is refused and the buffer is
/// not evaluable.
pub const PENDING_GLYPHS: &[char] = &['%', '+', '-', '÷', '×', '√', '.'];

/// A binary or unary operator key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    /// Truncated remainder, shown as `%` on the keypad.
    Percent,
    SquareRoot,
}

impl Operator {
    /// All operators, in keypad order.
    pub const ALL: [Operator; 6] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Percent,
        Self::SquareRoot,
    ];

    /// The glyph appended to the buffer for this operator.
    pub fn glyph(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '×',
            Self::Divide => '÷',
            Self::Percent => '%',
            Self::SquareRoot => '√',
        }
    }

    /// Look up an operator by its display glyph.
    pub fn from_glyph(glyph: char) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.glyph() == glyph)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// Owned text of the expression being typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpressionBuffer {
    text: String,
}

impl ExpressionBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Append digits and/or dots. Never refused.
    pub fn append_digit_or_dot(&mut self, token: &str) {
        self.text.push_str(token);
    }

    /// Append an operator glyph.
    ///
    /// Returns `false` and leaves the buffer untouched when the buffer is
    /// empty or already ends with a pending glyph.
    pub fn append_operator(&mut self, op: Operator) -> bool {
        if self.text.is_empty() || self.ends_pending() {
            return false;
        }
        self.text.push(op.glyph());
        true
    }

    /// Flip the sign of the whole expression by adding or stripping a
    /// leading `-`. Always accepted, including on an empty buffer.
    pub fn toggle_sign(&mut self) {
        if self.text.starts_with('-') {
            self.text.remove(0);
        } else {
            self.text.insert(0, '-');
        }
    }

    /// Drop trailing whitespace, then exactly one character.
    ///
    /// Returns `false` if there was nothing to delete.
    pub fn delete_last_character(&mut self) -> bool {
        if self.text.is_empty() {
            return false;
        }
        let trimmed = self.text.trim_end().len();
        self.text.truncate(trimmed);
        self.text.pop();
        true
    }

    /// Whether the text can be handed to the evaluator.
    pub fn is_evaluable(&self) -> bool {
        !self.text.is_empty() && !self.ends_pending()
    }

    /// Evaluator-ready form of the current text.
    pub fn normalize(&self) -> String {
        normalize_expression(&self.text)
    }

    /// Replace the whole expression, used when a result is committed.
    pub fn replace(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn reset(&mut self) {
        self.text.clear();
    }

    fn ends_pending(&self) -> bool {
        self.text
            .chars()
            .next_back()
            .is_some_and(|c| PENDING_GLYPHS.contains(&c))
    }
}

impl fmt::Display for ExpressionBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
