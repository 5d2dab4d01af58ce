//! Edit commands and their keyboard mapping.

use thiserror::Error;

use crate::calculator::Operator;

/// A single keypad action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Digit(char),
    Dot,
    Operator(Operator),
    ToggleSign,
    Delete,
    Commit,
    Reset,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("unknown key `{key}` at position {position}")]
    Unknown { key: char, position: usize },
}

impl Command {
    /// Map a typed key to a command.
    ///
    /// Both display glyphs and their ASCII stand-ins are accepted.
    pub fn from_key(key: char) -> Option<Self> {
        let command = match key {
            '0'..='9' => Self::Digit(key),
            '.' => Self::Dot,
            '*' | 'x' => Self::Operator(Operator::Multiply),
            '/' => Self::Operator(Operator::Divide),
            'r' => Self::Operator(Operator::SquareRoot),
            '~' | '±' => Self::ToggleSign,
            '<' => Self::Delete,
            '=' => Self::Commit,
            'c' | 'C' => Self::Reset,
            other => Self::Operator(Operator::from_glyph(other)?),
        };
        Some(command)
    }
}

/// Parse a whole key sequence such as `"12+3="`. Whitespace is skipped.
pub fn parse_keys(input: &str) -> Result<Vec<Command>, KeyError> {
    input
        .chars()
        .enumerate()
        .filter(|(_, key)| !key.is_whitespace())
        .map(|(position, key)| {
            Command::from_key(key).ok_or(KeyError::Unknown { key, position })
        })
        .collect()
}
