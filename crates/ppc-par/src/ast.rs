//! Arena-allocated abstract syntax tree.
//!
//! Every node is allocated out of a [`bumpalo::Bump`] owned by the `Parser`;
//! nodes borrow `'a` from that arena. The tree is freed in one shot when the
//! arena is dropped after IR generation has copied out everything it needs
//! (identifier names, literal text) into owned `String`s — nothing in
//! `ppc-ir` or later stages borrows from the arena.

use ppc_util::Span;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VarType {
    Int,
    Bool,
    Char,
    String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Equal,
    NotEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    LogicalAnd,
    LogicalOr,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    LogicalNot,
}

#[derive(Clone, Copy, Debug)]
pub enum Term<'a> {
    IntLit(i64),
    BoolLit(bool),
    CharLit(char),
    /// A string literal, already desugared to a char-expression array at
    /// parse time (see spec'd "string literal → array of char expressions").
    StringLit(&'a [&'a Expr<'a>]),
    Ident(&'a str),
    Paren(&'a Expr<'a>),
    Index { array: &'a str, index: &'a Expr<'a> },
    ReadChar,
}

#[derive(Clone, Copy, Debug)]
pub enum Expr<'a> {
    Term(Term<'a>),
    Unary {
        op: UnaryOp,
        expr: &'a Expr<'a>,
    },
    Bin {
        op: BinOp,
        lhs: &'a Expr<'a>,
        rhs: &'a Expr<'a>,
    },
}

#[derive(Clone, Copy, Debug)]
pub struct IfArm<'a> {
    pub cond: &'a Expr<'a>,
    pub body: &'a Stmt<'a>,
    pub span: Span,
}

#[derive(Clone, Copy, Debug)]
pub struct StmtIf<'a> {
    pub arm: IfArm<'a>,
    pub elifs: &'a [IfArm<'a>],
    pub else_body: Option<&'a Stmt<'a>>,
}

#[derive(Clone, Copy, Debug)]
pub struct StmtWhile<'a> {
    /// `None` for the unconditional `powtarzaj : stmt` form — such a loop can
    /// only terminate via `przerwij` in its body.
    pub cond: Option<&'a Expr<'a>>,
    pub body: &'a Stmt<'a>,
    pub span: Span,
}

/// The initializer form of an array declaration: either a bare size
/// (`rozmiaru <expr>`, elements left uninitialized) or a brace-delimited
/// element list (`równa { <expr>, … }`), whose length becomes the size.
#[derive(Clone, Copy, Debug)]
pub enum ArrayInit<'a> {
    Sized(&'a Expr<'a>),
    List(&'a [&'a Expr<'a>]),
}

#[derive(Clone, Copy, Debug)]
pub enum Stmt<'a> {
    Exit {
        expr: &'a Expr<'a>,
        span: Span,
    },
    VarDecl {
        name: &'a str,
        ty: VarType,
        init: &'a Expr<'a>,
        span: Span,
    },
    ArrayDecl {
        name: &'a str,
        elem_ty: VarType,
        init: ArrayInit<'a>,
        span: Span,
    },
    Scope {
        body: &'a [&'a Stmt<'a>],
    },
    If(StmtIf<'a>),
    Assign {
        name: &'a str,
        expr: &'a Expr<'a>,
        span: Span,
    },
    ArrayAssign {
        array: &'a str,
        index: &'a Expr<'a>,
        expr: &'a Expr<'a>,
        span: Span,
    },
    While(StmtWhile<'a>),
    Break {
        span: Span,
    },
    Continue {
        span: Span,
    },
    PrintInt {
        expr: &'a Expr<'a>,
        span: Span,
    },
    PrintChar {
        expr: &'a Expr<'a>,
        span: Span,
    },
}

/// The root of a parsed program: a flat sequence of top-level statements.
#[derive(Debug)]
pub struct Program<'a> {
    pub statements: Vec<&'a Stmt<'a>>,
}
