//! Composing a bracketed sequence of numeral words into a single integer.
//!
//! A numeral literal is written inside `[ ]` as numeral-value words and
//! numeral-multiplier words, optionally preceded by `minus`, e.g.
//! `[pięćset tysięcy dwadzieścia trzy]` = 500023.
//!
//! Composition scans **back to front** (last word first): a multiplier word
//! sets the multiplier applied to every numeral-value word to its left,
//! until a larger multiplier appears. Each numeral-value word contributes
//! `value * current_multiplier` to the running sum.
//!
//! Two invariants catch malformed literals instead of silently computing the
//! wrong value:
//!
//! 1. A new multiplier must be strictly larger than the multiplier currently
//!    in effect (so `tysiące miliony`, read right to left as milion-then-
//!    tysiące, is rejected: tysiące's value 1000 does not exceed milion's
//!    1000000).
//! 2. Each added partial result (`value * multiplier`) must have strictly
//!    more decimal digits than the previously added partial result, so
//!    `sto sto` is rejected (both contribute 100 — equal digit counts).

use ppc_lex::TokenKind;
use ppc_util::{ParseError, ParseResult, Span};

fn digit_count(n: i64) -> u32 {
    let n = n.unsigned_abs();
    if n == 0 {
        1
    } else {
        n.ilog10() + 1
    }
}

/// Compose a flat run of [`TokenKind::NumWord`]/[`TokenKind::NumMul`] tokens
/// (the contents between a `[` and `]` pair, excluding a leading `minus` if
/// any) into the literal's non-negative value. The caller applies the sign.
pub fn compose_numeral(tokens: &[TokenKind], span: Span) -> ParseResult<i64> {
    if tokens.is_empty() {
        return Err(ParseError::InvalidNumeral { span });
    }

    let mut sum: i64 = 0;
    let mut multiplier: i64 = 1;
    let mut prev_digits: Option<u32> = None;

    for tok in tokens.iter().rev() {
        match *tok {
            TokenKind::NumMul(m) => {
                if m <= multiplier {
                    return Err(ParseError::InvalidNumeral { span });
                }
                multiplier = m;
            }
            TokenKind::NumWord(v) => {
                let partial = v * multiplier;
                let digits = digit_count(partial);
                if let Some(prev) = prev_digits {
                    if digits <= prev {
                        return Err(ParseError::InvalidNumeral { span });
                    }
                }
                sum += partial;
                prev_digits = Some(digits);
                multiplier = 1;
            }
            _ => return Err(ParseError::InvalidNumeral { span }),
        }
    }

    // A trailing (leftmost, i.e. first-scanned-from-the-end) multiplier with
    // no numeral word ever attached to it (e.g. a bare `[tysiące]`) means no
    // value word was ever seen.
    if prev_digits.is_none() {
        return Err(ParseError::InvalidNumeral { span });
    }

    Ok(sum)
}

/// True for tokens legal inside a bracketed numeral literal.
pub fn is_numeral_token(kind: &TokenKind) -> bool {
    matches!(kind, TokenKind::NumWord(_) | TokenKind::NumMul(_))
}
