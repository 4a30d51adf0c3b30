//! Duration expression parser.
//!
//! Grammar, after all whitespace is stripped and the text is lowercased:
//!
//! ```text
//! expr     := ""                 -> previous value, unchanged
//!           | ("+" | "-") abs    -> previous +/- abs
//!           | abs
//! abs      := term (("+" | "-") term)*
//! term     := ("+" | "-")? group+
//! group    := digits ("h" | "m" | "s")?    -- unit defaults to seconds
//! ```
//!
//! The result may be negative when a relative edit subtracts more than the
//! previous value. Rejecting that is the caller's job.

use crate::error::ParseError;

const SECS_PER_HOUR: i64 = 3600;
const SECS_PER_MINUTE: i64 = 60;

/// Parse a duration expression into seconds.
///
/// `previous` is the value currently in effect. It is returned unchanged for
/// empty input and is the base for relative (`+`/`-` prefixed) edits.
///
/// ```
/// use break_scheduler_core::duration::parse_duration_expr;
///
/// assert_eq!(parse_duration_expr("1h2m3s", 0), Ok(3723));
/// assert_eq!(parse_duration_expr("+5m", 60), Ok(360));
/// assert_eq!(parse_duration_expr("-90s", 60), Ok(-30));
/// ```
pub fn parse_duration_expr(input: &str, previous: i64) -> Result<i64, ParseError> {
    let cleaned: String = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    parse_cleaned(&cleaned, previous)
}

fn parse_cleaned(expr: &str, previous: i64) -> Result<i64, ParseError> {
    if expr.is_empty() {
        return Ok(previous);
    }

    if let Some(rest) = expr.strip_prefix('+') {
        let magnitude = parse_cleaned(rest, 0)?;
        return previous.checked_add(magnitude).ok_or(ParseError::Overflow);
    }
    if let Some(rest) = expr.strip_prefix('-') {
        let magnitude = parse_cleaned(rest, 0)?;
        return previous.checked_sub(magnitude).ok_or(ParseError::Overflow);
    }

    split_terms(expr)
        .into_iter()
        .try_fold(0i64, |total, term| {
            total
                .checked_add(eval_term(term)?)
                .ok_or(ParseError::Overflow)
        })
}

/// Split before every sign that is not the first character.
fn split_terms(expr: &str) -> Vec<&str> {
    let mut terms = Vec::new();
    let mut start = 0;
    for (idx, ch) in expr.char_indices() {
        if idx > 0 && (ch == '+' || ch == '-') {
            terms.push(&expr[start..idx]);
            start = idx;
        }
    }
    terms.push(&expr[start..]);
    terms
}

fn eval_term(term: &str) -> Result<i64, ParseError> {
    let (sign, body) = match term.strip_prefix('-') {
        Some(body) => (-1, body),
        None => (1, term.strip_prefix('+').unwrap_or(term)),
    };

    let mut chars = body.chars().peekable();
    let mut total: i64 = 0;
    let mut groups = 0usize;

    while let Some(&ch) = chars.peek() {
        if !ch.is_ascii_digit() {
            return Err(ParseError::InvalidUnit {
                term: term.to_string(),
                unit: ch,
            });
        }

        let mut value: i64 = 0;
        while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(i64::from(digit)))
                .ok_or(ParseError::Overflow)?;
            chars.next();
        }

        let factor = match chars.peek().copied() {
            Some('h') => {
                chars.next();
                SECS_PER_HOUR
            }
            Some('m') => {
                chars.next();
                SECS_PER_MINUTE
            }
            Some('s') => {
                chars.next();
                1
            }
            _ => 1,
        };

        total = value
            .checked_mul(factor)
            .and_then(|secs| total.checked_add(secs))
            .ok_or(ParseError::Overflow)?;
        groups += 1;
    }

    if groups == 0 {
        return Err(ParseError::MissingDigits(term.to_string()));
    }

    Ok(sign * total)
}
