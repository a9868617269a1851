//! Recursive-descent / precedence-climbing parser producing an
//! arena-allocated AST.
//!
//! The parser owns a [`bumpalo::Bump`] arena (`self.arena`) for the whole
//! lifetime of parsing; every `Expr`/`Stmt`/`Term` node is allocated out of
//! it. The arena, and therefore the tree, is dropped once IR generation has
//! walked it and copied out what it needs as owned `String`s — nothing
//! downstream of `ppc-par` borrows from the arena.

pub mod ast;
mod expr;
mod number;
mod stmt;

use ast::{Program, Stmt};
use bumpalo::Bump;
use ppc_lex::{Token, TokenKind};
use ppc_util::{ParseError, ParseResult, Span};

pub struct Parser<'a> {
    arena: &'a Bump,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    pub fn new(arena: &'a Bump, tokens: Vec<Token>) -> Self {
        Self {
            arena,
            tokens,
            pos: 0,
        }
    }

    pub fn parse_program(&mut self) -> ParseResult<Program<'a>> {
        let mut statements = Vec::new();
        while !self.at_eof() {
            statements.push(self.parse_statement()?);
        }
        Ok(Program { statements })
    }

    // --- cursor primitives ---

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    fn at_eof(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    fn span(&self) -> Span {
        self.peek().span
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if !matches!(tok.kind, TokenKind::Eof) {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, kind: TokenKind) -> ParseResult<Token> {
        if self.peek().kind == kind {
            Ok(self.advance())
        } else if matches!(self.peek().kind, TokenKind::Eof) {
            Err(ParseError::UnexpectedEof {
                expected: kind.name().to_string(),
            })
        } else {
            Err(ParseError::UnexpectedToken {
                expected: kind.name().to_string(),
                found: self.peek().kind.name().to_string(),
                span: self.span(),
            })
        }
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.peek_kind()) == std::mem::discriminant(kind)
    }

    fn alloc_stmt(&self, stmt: Stmt<'a>) -> &'a Stmt<'a> {
        self.arena.alloc(stmt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ppc_lex::Lexer;

    fn parse(src: &str) -> ParseResult<Program<'_>> {
        let arena = Box::leak(Box::new(Bump::new()));
        let tokens = Lexer::new(src).tokenize().expect("lex ok");
        Parser::new(arena, tokens).parse_program()
    }

    #[test]
    fn empty_program_parses() {
        let prog = parse("").unwrap();
        assert!(prog.statements.is_empty());
    }

    #[test]
    fn single_exit_statement() {
        let prog = parse("kończwaść ( [zero] )").unwrap();
        assert_eq!(prog.statements.len(), 1);
    }
}
