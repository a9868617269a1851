//! Shared error types for the compiler pipeline.
//!
//! The pipeline has no error recovery: the first lexical, syntactic, or
//! semantic problem a stage finds is reported and compilation stops. Each
//! concern gets its own small `thiserror` enum, paired with a `Result` alias,
//! following the same per-concern-enum layout used throughout this crate.

use crate::span::Span;
use thiserror::Error;

/// Errors raised while scanning source text into a token stream.
///
/// Display strings follow `[BŁĄD] [Analiza leksykalna] <message>`.
#[derive(Debug, Error)]
pub enum LexError {
    #[error("[BŁĄD] [Analiza leksykalna] Niezamknięty literał znakowy (linia {line})", line = span.line)]
    UnterminatedCharLiteral { span: Span },

    #[error("[BŁĄD] [Analiza leksykalna] Niezamknięty literał tekstowy (linia {line})", line = span.line)]
    UnterminatedStringLiteral { span: Span },
}

pub type LexResult<T> = std::result::Result<T, LexError>;

/// Errors raised while parsing the token stream into an AST.
///
/// Display strings follow the driver's diagnostic banner convention:
/// `[BŁĄD] [Analiza składniowa] <message>`.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("[BŁĄD] [Analiza składniowa] Oczekiwano '{expected}', znaleziono '{found}' w linijce: {line}", line = span.line)]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("[BŁĄD] [Analiza składniowa] Oczekiwano '{expected}', ale dotarto do końca pliku")]
    UnexpectedEof { expected: String },

    #[error("[BŁĄD] [Analiza składniowa] Nieprawidłowy zapis liczby (linia {line})", line = span.line)]
    InvalidNumeral { span: Span },

    #[error("[BŁĄD] [Analiza składniowa] Nieoczekiwany token '{found}' nie rozpoczyna instrukcji (linia {line})", line = span.line)]
    NotAStatement { found: String, span: Span },
}

/// Errors raised while lowering a checked AST to three-address code.
///
/// Display strings follow `[BŁĄD] [Analiza semantyczna] <message>`.
#[derive(Debug, Error)]
pub enum SemanticError {
    #[error("[BŁĄD] [Analiza semantyczna] Niezadeklarowany identyfikator '{name}' (linia {line})", line = span.line)]
    UndeclaredIdentifier { name: String, span: Span },

    #[error("[BŁĄD] [Analiza semantyczna] Identyfikator '{name}' jest już zadeklarowany w tym zakresie (linia {line})", line = span.line)]
    DuplicateDeclaration { name: String, span: Span },

    #[error("[BŁĄD] [Analiza semantyczna] Niezgodność typów: oczekiwano {expected}, otrzymano {found} (linia {line})", line = span.line)]
    TypeMismatch {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("[BŁĄD] [Analiza semantyczna] '{keyword}' użyte poza pętlą (linia {line})", line = span.line)]
    LoopControlOutsideLoop { keyword: String, span: Span },

    #[error("[BŁĄD] [Analiza semantyczna] Indeksowanie dostępne tylko dla tablic, '{name}' nie jest tablicą (linia {line})", line = span.line)]
    NotAnArray { name: String, span: Span },
}

pub type ParseResult<T> = std::result::Result<T, ParseError>;
pub type SemanticResult<T> = std::result::Result<T, SemanticError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_display_contains_banner() {
        let err = ParseError::UnexpectedToken {
            expected: ")".into(),
            found: ";".into(),
            span: Span::new(4),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("[BŁĄD] [Analiza składniowa]"));
        assert!(msg.contains("linijce: 4"));
    }

    #[test]
    fn semantic_error_display_contains_banner() {
        let err = SemanticError::UndeclaredIdentifier {
            name: "x".into(),
            span: Span::new(7),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("[BŁĄD] [Analiza semantyczna]"));
        assert!(msg.contains('x'));
    }
}
