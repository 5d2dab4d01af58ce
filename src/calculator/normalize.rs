//! Glyph to evaluator-syntax translation.
//!
//! The output targets the fend dialect: a `sqrt(..)` call for `√`, and the
//! keypad's `%` spelled out as a truncated remainder built from `floor` and
//! `abs`, since fend's own `mod` only takes positive integers.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A root glyph directly after an operand multiplies it (`2√9` is `2×√9`).
    static ref IMPLICIT_ROOT_PRODUCT: Regex = Regex::new(r"([0-9.)])√").unwrap();

    /// A root glyph and the numeric operand that follows it.
    static ref ROOT_OPERAND: Regex = Regex::new(r"√([0-9.]*)").unwrap();
}

/// Map display glyphs to evaluator syntax.
///
/// Deterministic, and idempotent on already normalized text since none of
/// the replaced glyphs survive.
pub fn normalize_expression(expression: &str) -> String {
    let replaced = expression.replace('÷', "/").replace('×', "*");

    let with_products = IMPLICIT_ROOT_PRODUCT.replace_all(&replaced, "${1}*√");
    let with_roots = ROOT_OPERAND.replace_all(&with_products, "sqrt(${1})");
    rewrite_remainders(&with_roots)
}

/// Rewrite every `a%b` as `a - b*trunc(a/b)`.
///
/// `%` binds like `*` and `/`, left to right, and the result takes the sign
/// of the dividend: `-7%3` is `-1` and `5.5%2` is `1.5`.
fn rewrite_remainders(expression: &str) -> String {
    if !expression.contains('%') {
        return expression.to_string();
    }

    split_top_level(expression, &['+', '-'])
        .into_iter()
        .map(|(separator, term)| {
            let mut piece = separator.map(String::from).unwrap_or_default();
            if term.contains('%') {
                piece.push_str(&rewrite_term(term));
            } else {
                piece.push_str(term);
            }
            piece
        })
        .collect()
}

/// Fold a chain of `*`, `/` and `%` factors from the left.
fn rewrite_term(term: &str) -> String {
    let mut factors = split_top_level(term, &['*', '/', '%']).into_iter();
    let Some((_, first)) = factors.next() else {
        return String::new();
    };

    factors.fold(first.to_string(), |acc, (op, factor)| match op {
        Some('%') => remainder(&acc, factor),
        Some(op) => format!("{acc}{op}{factor}"),
        None => acc,
    })
}

/// `trunc(q)` is written `floor(q) + |floor(q)| - floor(|q|)`, which is
/// `floor(q)` for `q ≥ 0` and `ceil(q)` otherwise.
fn remainder(dividend: &str, divisor: &str) -> String {
    let quotient = format!("({dividend})/({divisor})");
    format!(
        "(({dividend})-({divisor})*(floor({quotient})+abs(floor({quotient}))-floor(abs({quotient}))))"
    )
}

/// Split `text` at binary operators from `separators` outside parentheses.
///
/// The first piece has no separator. A separator at the start or right after
/// another operator is a sign and stays inside its piece.
fn split_top_level<'a>(text: &'a str, separators: &[char]) -> Vec<(Option<char>, &'a str)> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut separator = None;
    let mut previous: Option<char> = None;

    for (index, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0
                && separators.contains(&c)
                && previous.is_some_and(|p| !expects_operand(p)) =>
            {
                pieces.push((separator, &text[start..index]));
                separator = Some(c);
                start = index + c.len_utf8();
            }
            _ => {}
        }
        previous = Some(c);
    }

    pieces.push((separator, &text[start..]));
    pieces
}

fn expects_operand(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '%' | '(')
}
