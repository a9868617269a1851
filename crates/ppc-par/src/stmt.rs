//! Statement parsing: one function per keyword-led statement form, dispatched
//! from `parse_statement` by the current token's kind.

use crate::ast::{ArrayInit, IfArm, Stmt, StmtIf, StmtWhile, VarType};
use crate::Parser;
use ppc_lex::TokenKind;
use ppc_util::{ParseError, ParseResult};

impl<'a> Parser<'a> {
    pub fn parse_statement(&mut self) -> ParseResult<&'a Stmt<'a>> {
        let span = self.span();
        match self.peek_kind().clone() {
            TokenKind::Exit => self.parse_exit(),
            TokenKind::VarDecl => self.parse_var_decl(),
            TokenKind::Array => self.parse_array_decl(),
            TokenKind::Backtick => self.parse_assign_or_array_assign(),
            TokenKind::BraceOpen => self.parse_scope(),
            TokenKind::CondIf => self.parse_if(),
            TokenKind::Loop => self.parse_while(),
            TokenKind::LoopBreak => {
                self.advance();
                Ok(self.alloc_stmt(Stmt::Break { span }))
            }
            TokenKind::LoopContinue => {
                self.advance();
                Ok(self.alloc_stmt(Stmt::Continue { span }))
            }
            TokenKind::PrintInt => self.parse_print_int(),
            TokenKind::PrintChar => self.parse_print_char(),
            other => Err(ParseError::NotAStatement {
                found: other.name().to_string(),
                span,
            }),
        }
    }

    fn var_type(&mut self) -> ParseResult<VarType> {
        let span = self.span();
        let ty = match self.peek_kind() {
            TokenKind::TypeInt => VarType::Int,
            TokenKind::TypeBool => VarType::Bool,
            TokenKind::TypeChar => VarType::Char,
            TokenKind::TypeString => VarType::String,
            other => {
                return Err(ParseError::UnexpectedToken {
                    expected: "typ zmiennej".to_string(),
                    found: other.name().to_string(),
                    span,
                })
            }
        };
        self.advance();
        Ok(ty)
    }

    fn ident_name(&mut self) -> ParseResult<&'a str> {
        let span = self.span();
        self.expect(TokenKind::Backtick)?;
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
        Ok(self.arena.alloc_str(&name))
    }

    fn parse_exit(&mut self) -> ParseResult<&'a Stmt<'a>> {
        let span = self.span();
        self.advance(); // kończwaść
        self.expect(TokenKind::ParenOpen)?;
        let expr = self.parse_expr(0)?;
        self.expect(TokenKind::ParenClose)?;
        Ok(self.alloc_stmt(Stmt::Exit { expr, span }))
    }

    /// `zmienna <typ> `ident` równa <expr>`
    fn parse_var_decl(&mut self) -> ParseResult<&'a Stmt<'a>> {
        let span = self.span();
        self.advance(); // zmienna
        let ty = self.var_type()?;
        let name = self.ident_name()?;
        self.expect(TokenKind::VarAssign)?;
        let init = self.parse_expr(0)?;
        Ok(self.alloc_stmt(Stmt::VarDecl {
            name,
            ty,
            init,
            span,
        }))
    }

    /// `tablica <typ> `ident` rozmiaru <expr>` or
    /// `tablica <typ> `ident` równa { <expr>, … }`.
    fn parse_array_decl(&mut self) -> ParseResult<&'a Stmt<'a>> {
        let span = self.span();
        self.advance(); // tablica
        let elem_ty = self.var_type()?;
        let name = self.ident_name()?;

        let init = if self.check(&TokenKind::OfSize) {
            self.advance();
            ArrayInit::Sized(self.parse_expr(0)?)
        } else {
            self.expect(TokenKind::VarAssign)?;
            self.expect(TokenKind::BraceOpen)?;
            let mut elems = Vec::new();
            if !self.check(&TokenKind::BraceClose) {
                loop {
                    elems.push(self.parse_expr(0)?);
                    if self.check(&TokenKind::Comma) {
                        self.advance();
                    } else {
                        break;
                    }
                }
            }
            self.expect(TokenKind::BraceClose)?;
            ArrayInit::List(self.arena.alloc_slice_copy(&elems))
        };

        Ok(self.alloc_stmt(Stmt::ArrayDecl {
            name,
            elem_ty,
            init,
            span,
        }))
    }

    /// ``` `ident` równa expr ``` or ``` `ident` element expr równa expr ```.
    fn parse_assign_or_array_assign(&mut self) -> ParseResult<&'a Stmt<'a>> {
        let span = self.span();
        let name = self.ident_name()?;

        if self.check(&TokenKind::Element) {
            self.advance();
            let index = self.parse_expr(0)?;
            self.expect(TokenKind::VarAssign)?;
            let expr = self.parse_expr(0)?;
            return Ok(self.alloc_stmt(Stmt::ArrayAssign {
                array: name,
                index,
                expr,
                span,
            }));
        }

        self.expect(TokenKind::VarAssign)?;
        let expr = self.parse_expr(0)?;
        Ok(self.alloc_stmt(Stmt::Assign { name, expr, span }))
    }

    fn parse_scope(&mut self) -> ParseResult<&'a Stmt<'a>> {
        self.expect(TokenKind::BraceOpen)?;
        let mut body = Vec::new();
        while !self.check(&TokenKind::BraceClose) {
            body.push(self.parse_statement()?);
        }
        self.expect(TokenKind::BraceClose)?;
        Ok(self.alloc_stmt(Stmt::Scope {
            body: self.arena.alloc_slice_copy(&body),
        }))
    }

    fn parse_arm(&mut self) -> ParseResult<IfArm<'a>> {
        let span = self.span();
        self.expect(TokenKind::ParenOpen)?;
        let cond = self.parse_expr(0)?;
        self.expect(TokenKind::ParenClose)?;
        self.expect(TokenKind::Colon)?;
        let body = self.parse_statement()?;
        Ok(IfArm { cond, body, span })
    }

    /// `jeśli (cond) : stmt` followed by any number of `przeciwnie jeśli
    /// (cond) : stmt` and an optional trailing `przeciwnie : stmt`.
    fn parse_if(&mut self) -> ParseResult<&'a Stmt<'a>> {
        self.advance(); // jeśli
        let arm = self.parse_arm()?;

        let mut elifs = Vec::new();
        let mut else_body = None;

        while self.check(&TokenKind::CondElse) {
            self.advance();
            if self.check(&TokenKind::CondIf) {
                self.advance();
                elifs.push(self.parse_arm()?);
            } else {
                self.expect(TokenKind::Colon)?;
                else_body = Some(self.parse_statement()?);
                break;
            }
        }

        Ok(self.alloc_stmt(Stmt::If(StmtIf {
            arm,
            elifs: self.arena.alloc_slice_copy(&elifs),
            else_body,
        })))
    }

    /// `powtarzaj jeśli (cond) : stmt`, or the unconditional
    /// `powtarzaj : stmt` form (terminated only by `przerwij` in the body).
    fn parse_while(&mut self) -> ParseResult<&'a Stmt<'a>> {
        let span = self.span();
        self.advance(); // powtarzaj

        let cond = if self.check(&TokenKind::CondIf) {
            self.advance();
            self.expect(TokenKind::ParenOpen)?;
            let cond = self.parse_expr(0)?;
            self.expect(TokenKind::ParenClose)?;
            Some(cond)
        } else {
            None
        };

        self.expect(TokenKind::Colon)?;
        let body = self.parse_statement()?;
        Ok(self.alloc_stmt(Stmt::While(StmtWhile { cond, body, span })))
    }

    fn parse_print_int(&mut self) -> ParseResult<&'a Stmt<'a>> {
        let span = self.span();
        self.advance(); // wyświetl_liczbę
        self.expect(TokenKind::ParenOpen)?;
        let expr = self.parse_expr(0)?;
        self.expect(TokenKind::ParenClose)?;
        Ok(self.alloc_stmt(Stmt::PrintInt { expr, span }))
    }

    fn parse_print_char(&mut self) -> ParseResult<&'a Stmt<'a>> {
        let span = self.span();
        self.advance(); // wyświetl_znak
        self.expect(TokenKind::ParenOpen)?;
        let expr = self.parse_expr(0)?;
        self.expect(TokenKind::ParenClose)?;
        Ok(self.alloc_stmt(Stmt::PrintChar { expr, span }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Stmt;
    use bumpalo::Bump;
    use ppc_lex::Lexer;

    fn stmt_of<'a>(arena: &'a Bump, src: &str) -> &'a Stmt<'a> {
        let tokens = Lexer::new(src).tokenize().unwrap();
        let mut p = Parser::new(arena, tokens);
        p.parse_statement().unwrap()
    }

    #[test]
    fn var_decl() {
        let arena = Bump::new();
        let s = stmt_of(&arena, "zmienna całkowita `x` równa [trzy]");
        assert!(matches!(s, Stmt::VarDecl { .. }));
    }

    #[test]
    fn array_decl_sized() {
        let arena = Bump::new();
        let s = stmt_of(&arena, "tablica całkowita `tab` rozmiaru [dziesięć]");
        match s {
            Stmt::ArrayDecl { init: ArrayInit::Sized(_), .. } => {}
            _ => panic!("expected sized array decl"),
        }
    }

    #[test]
    fn array_decl_list() {
        let arena = Bump::new();
        let s = stmt_of(
            &arena,
            "tablica całkowita `tab` równa { [jeden] , [dwa] , [trzy] }",
        );
        match s {
            Stmt::ArrayDecl { init: ArrayInit::List(elems), .. } => assert_eq!(elems.len(), 3),
            _ => panic!("expected list array decl"),
        }
    }

    #[test]
    fn array_element_assignment() {
        let arena = Bump::new();
        let s = stmt_of(&arena, "`tab` element [zero] równa [jeden]");
        assert!(matches!(s, Stmt::ArrayAssign { .. }));
    }

    #[test]
    fn if_elif_else_chain() {
        let arena = Bump::new();
        let s = stmt_of(
            &arena,
            "jeśli (prawda) : przerwij przeciwnie jeśli (fałsz) : kontynuuj przeciwnie : przerwij",
        );
        match s {
            Stmt::If(stmt_if) => {
                assert_eq!(stmt_if.elifs.len(), 1);
                assert!(stmt_if.else_body.is_some());
            }
            _ => panic!("expected if"),
        }
    }

    #[test]
    fn conditional_while_loop() {
        let arena = Bump::new();
        let s = stmt_of(&arena, "powtarzaj jeśli (prawda) : przerwij");
        match s {
            Stmt::While(w) => assert!(w.cond.is_some()),
            _ => panic!("expected while"),
        }
    }

    #[test]
    fn unconditional_loop() {
        let arena = Bump::new();
        let s = stmt_of(&arena, "powtarzaj : przerwij");
        match s {
            Stmt::While(w) => assert!(w.cond.is_none()),
            _ => panic!("expected while"),
        }
    }

    #[test]
    fn scope_block() {
        let arena = Bump::new();
        let s = stmt_of(&arena, "{ przerwij kontynuuj }");
        match s {
            Stmt::Scope { body } => assert_eq!(body.len(), 2),
            _ => panic!("expected scope"),
        }
    }
}
