//! Expression detection for eager evaluation.
//!
//! Decides whether the buffer is worth sending to the evaluator after an
//! edit. A plain number (optionally signed) has nothing to compute.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Any operator glyph, display or evaluator form.
    static ref OPERATOR: Regex = Regex::new(r"[+\-*/%√÷×]").unwrap();
}

/// Check if the expression contains an operation to evaluate.
///
/// A leading `-` from the sign toggle does not count.
pub fn looks_like_expression(input: &str) -> bool {
    let trimmed = input.trim();
    let body = trimmed.strip_prefix('-').unwrap_or(trimmed);
    OPERATOR.is_match(body)
}

/// Check if the input is just a plain number (no operations).
pub fn is_plain_number(input: &str) -> bool {
    let trimmed = input.trim();
    let to_check = trimmed.strip_prefix('-').unwrap_or(trimmed);

    to_check.chars().all(|c| c.is_ascii_digit() || c == '.')
        && to_check.chars().any(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers_rejected() {
        assert!(!looks_like_expression("123"));
        assert!(!looks_like_expression("42.5"));
        assert!(!looks_like_expression("-123"));
        assert!(!looks_like_expression(""));
    }

    #[test]
    fn test_expressions_accepted() {
        assert!(looks_like_expression("12+3"));
        assert!(looks_like_expression("9÷0"));
        assert!(looks_like_expression("2×4"));
        assert!(looks_like_expression("10%3"));
        assert!(looks_like_expression("2√9"));
        assert!(looks_like_expression("-7-3"));
    }

    #[test]
    fn test_is_plain_number() {
        assert!(is_plain_number("15"));
        assert!(is_plain_number("-0.25"));
        assert!(!is_plain_number("-"));
        assert!(!is_plain_number(""));
        assert!(!is_plain_number("."));
        assert!(!is_plain_number("-."));
        assert!(!is_plain_number("1+1"));
        assert!(!is_plain_number("1.5e10^3"));
    }
}
