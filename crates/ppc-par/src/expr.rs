//! Expression parsing: precedence-climbing binary operators — all spelled
//! out as whole words, never symbols — over a leading unary `nie` and a
//! handful of atomic terms.
//!
//! Precedence table, tightest to loosest:
//! 1. unary `nie` (logical not) — binds tighter than any binary operator
//! 2. `razy` `podzielić` `modulo`
//! 3. `dodać` `odjąć`
//! 4. `równe` `różne` `większe` `mniejsze` `większerówne` `mniejszerówne`
//! 5. `oraz` (logical and)
//! 6. `lub` (logical or)

use crate::ast::{BinOp, Expr, Term, UnaryOp};
use crate::number::compose_numeral;
use crate::Parser;
use ppc_lex::TokenKind;
use ppc_util::{ParseError, ParseResult};

fn binop_of(kind: &TokenKind) -> Option<(BinOp, u8)> {
    use TokenKind::*;
    Some(match kind {
        Multiply => (BinOp::Multiply, 5),
        Divide => (BinOp::Divide, 5),
        Modulo => (BinOp::Modulo, 5),
        Add => (BinOp::Add, 4),
        Subtract => (BinOp::Subtract, 4),
        Equal => (BinOp::Equal, 3),
        NotEqual => (BinOp::NotEqual, 3),
        Greater => (BinOp::Greater, 3),
        GreaterEqual => (BinOp::GreaterEqual, 3),
        Less => (BinOp::Less, 3),
        LessEqual => (BinOp::LessEqual, 3),
        LogicalAnd => (BinOp::LogicalAnd, 2),
        LogicalOr => (BinOp::LogicalOr, 1),
        _ => return None,
    })
}

impl<'a> Parser<'a> {
    pub fn parse_expr(&mut self, min_prec: u8) -> ParseResult<&'a Expr<'a>> {
        let mut lhs = self.parse_unary()?;

        loop {
            let Some((op, prec)) = binop_of(self.peek_kind()) else {
                break;
            };
            if prec < min_prec {
                break;
            }
            self.advance();
            let rhs = self.parse_expr(prec + 1)?;
            lhs = self.arena.alloc(Expr::Bin { op, lhs, rhs });
        }

        Ok(lhs)
    }

    fn parse_unary(&mut self) -> ParseResult<&'a Expr<'a>> {
        if self.check(&TokenKind::LogicalNot) {
            self.advance();
            let expr = self.parse_unary()?;
            return Ok(self.arena.alloc(Expr::Unary {
                op: UnaryOp::LogicalNot,
                expr,
            }));
        }
        self.parse_term()
    }

    /// Parses a `minus`-prefixed, bracketed numeral literal. `minus` (if
    /// present) may only appear immediately before the opening `[`.
    fn parse_numeral_literal(&mut self) -> ParseResult<&'a Expr<'a>> {
        let negate = if self.check(&TokenKind::Minus) {
            self.advance();
            true
        } else {
            false
        };
        let span = self.span();
        self.expect(TokenKind::BracketOpen)?;
        let mut words = Vec::new();
        while crate::number::is_numeral_token(self.peek_kind()) {
            words.push(self.advance().kind);
        }
        self.expect(TokenKind::BracketClose)?;
        let mut value = compose_numeral(&words, span)?;
        if negate {
            value = -value;
        }
        Ok(self.arena.alloc(Expr::Term(Term::IntLit(value))))
    }

    fn parse_term(&mut self) -> ParseResult<&'a Expr<'a>> {
        let span = self.span();
        if matches!(self.peek_kind(), TokenKind::Minus | TokenKind::BracketOpen) {
            return self.parse_numeral_literal();
        }

        let term = match self.peek_kind().clone() {
            TokenKind::Backtick => {
                self.advance();
                let name = match self.advance().kind {
                    TokenKind::Ident(s) => s,
                    other => {
                        return Err(ParseError::UnexpectedToken {
                            expected: "identyfikator".to_string(),
                            found: other.name().to_string(),
                            span,
                        })
                    }
                };
                self.expect(TokenKind::Backtick)?;
                let name = self.arena.alloc_str(&name);

                if self.check(&TokenKind::Element) {
                    self.advance();
                    let index = self.parse_expr(0)?;
                    return Ok(self
                        .arena
                        .alloc(Expr::Term(Term::Index { array: name, index })));
                }
                Term::Ident(name)
            }
            TokenKind::ParenOpen => {
                self.advance();
                let inner = self.parse_expr(0)?;
                self.expect(TokenKind::ParenClose)?;
                Term::Paren(inner)
            }
            TokenKind::BoolLit(b) => {
                self.advance();
                Term::BoolLit(b)
            }
            TokenKind::CharLit(c) => {
                self.advance();
                Term::CharLit(c)
            }
            TokenKind::StringLit(s) => {
                self.advance();
                let arena = self.arena;
                let chars: Vec<&Expr<'a>> = s
                    .chars()
                    .map(|c| &*arena.alloc(Expr::Term(Term::CharLit(c))))
                    .collect();
                Term::StringLit(arena.alloc_slice_copy(&chars))
            }
            TokenKind::ReadChar => {
                self.advance();
                self.expect(TokenKind::ParenOpen)?;
                self.expect(TokenKind::ParenClose)?;
                Term::ReadChar
            }
            other => {
                return Err(ParseError::UnexpectedToken {
                    expected: "wyrażenie".to_string(),
                    found: other.name().to_string(),
                    span,
                })
            }
        };

        Ok(self.arena.alloc(Expr::Term(term)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;
    use ppc_lex::Lexer;

    fn expr_of<'a>(arena: &'a Bump, src: &str) -> &'a Expr<'a> {
        let tokens = Lexer::new(src).tokenize().unwrap();
        let mut p = Parser::new(arena, tokens);
        p.parse_expr(0).unwrap()
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let arena = Bump::new();
        let e = expr_of(&arena, "[dwa] dodać [trzy] razy [cztery]");
        match e {
            Expr::Bin { op: BinOp::Add, rhs, .. } => {
                assert!(matches!(rhs, Expr::Bin { op: BinOp::Multiply, .. }));
            }
            _ => panic!("expected top-level add"),
        }
    }

    #[test]
    fn unary_not_binds_tighter_than_and() {
        let arena = Bump::new();
        let e = expr_of(&arena, "nie prawda oraz prawda");
        match e {
            Expr::Bin { op: BinOp::LogicalAnd, lhs, .. } => {
                assert!(matches!(lhs, Expr::Unary { op: UnaryOp::LogicalNot, .. }));
            }
            _ => panic!("expected top-level and"),
        }
    }

    #[test]
    fn relational_looser_than_additive() {
        let arena = Bump::new();
        let e = expr_of(&arena, "[jeden] dodać [jeden] mniejsze [trzy]");
        assert!(matches!(e, Expr::Bin { op: BinOp::Less, .. }));
    }

    #[test]
    fn array_index_expression() {
        let arena = Bump::new();
        let e = expr_of(&arena, "`tab` element [zero]");
        assert!(matches!(e, Expr::Term(Term::Index { .. })));
    }

    #[test]
    fn negative_numeral_literal() {
        let arena = Bump::new();
        let e = expr_of(&arena, "minus [pięć]");
        match e {
            Expr::Term(Term::IntLit(v)) => assert_eq!(*v, -5),
            _ => panic!("expected int literal"),
        }
    }

    #[test]
    fn string_literal_expands_to_char_array() {
        let arena = Bump::new();
        let e = expr_of(&arena, "\"ab\"");
        match e {
            Expr::Term(Term::StringLit(chars)) => assert_eq!(chars.len(), 2),
            _ => panic!("expected string literal"),
        }
    }

    #[test]
    fn read_char_term() {
        let arena = Bump::new();
        let e = expr_of(&arena, "wczytaj_znak ( )");
        assert!(matches!(e, Expr::Term(Term::ReadChar)));
    }
}
