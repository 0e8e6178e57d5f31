//! Input preparation shared by evaluation and differentiation.
//!
//! Rejects oversized or over-nested input before it reaches a parser and
//! spells out implicit multiplication (`3x`, `2(x + 1)`, `(a)(b)`) for the
//! numeric evaluator, which only understands an explicit `*`.

use crate::error::{CalcError, Result};
use lazy_static::lazy_static;
use regex::Regex;

/// Deepest parenthesis nesting accepted.
pub const MAX_NESTING: usize = 32;

/// Longest input accepted, in bytes.
pub const MAX_LENGTH: usize = 4096;

lazy_static! {
    /// One token: an identifier, a number with optional exponent, or any
    /// other single non-space character.
    static ref TOKEN: Regex = Regex::new(
        r"[A-Za-z_][A-Za-z0-9_]*|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?|\S"
    ).unwrap();
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Kind {
    Number,
    Ident,
    Open,
    Close,
    Other,
}

fn kind(token: &str) -> Kind {
    match token.chars().next() {
        Some('(') => Kind::Open,
        Some(')') => Kind::Close,
        Some(c) if c.is_ascii_digit() || c == '.' => Kind::Number,
        Some(c) if c.is_ascii_alphabetic() || c == '_' => Kind::Ident,
        _ => Kind::Other,
    }
}

/// Fail when the input is too long or nested too deeply to parse safely.
pub fn check_limits(input: &str) -> Result<()> {
    if input.len() > MAX_LENGTH {
        return Err(CalcError::parse(format!(
            "expression is longer than {} bytes",
            MAX_LENGTH
        )));
    }

    let mut depth = 0usize;
    for c in input.chars() {
        match c {
            '(' => {
                depth += 1;
                if depth > MAX_NESTING {
                    return Err(CalcError::parse(format!(
                        "expression is nested deeper than {} levels",
                        MAX_NESTING
                    )));
                }
            }
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}

/// Check limits, then insert `*` wherever multiplication is implied.
pub fn prepare(input: &str) -> Result<String> {
    check_limits(input)?;

    let mut out = String::with_capacity(input.len() + 8);
    let mut last_end = 0;
    let mut previous = Kind::Other;
    for token in TOKEN.find_iter(input) {
        // Keep whitespace between tokens as typed
        out.push_str(&input[last_end..token.start()]);
        let current = kind(token.as_str());
        let implied = (matches!(previous, Kind::Number | Kind::Close)
            && matches!(current, Kind::Ident | Kind::Open))
            || (previous == Kind::Close && current == Kind::Number);
        if implied {
            out.push('*');
        }
        out.push_str(token.as_str());
        previous = current;
        last_end = token.end();
    }
    out.push_str(&input[last_end..]);
    Ok(out)
}
