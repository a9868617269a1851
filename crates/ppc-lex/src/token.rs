//! Token kinds produced by the lexer.

use ppc_util::Span;

/// A classified word or punctuation mark from the source text, together with
/// the line it was found on.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, line: u32) -> Self {
        Self {
            kind,
            span: Span::new(line),
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    // Punctuation
    ParenOpen,    // (
    ParenClose,   // )
    BracketOpen,  // [
    BracketClose, // ]
    BraceOpen,    // {
    BraceClose,   // }
    Backtick,     // `
    Colon,        // :
    Comma,        // ,

    // Statement keywords
    Exit,          // kończwaść
    VarDecl,       // zmienna
    VarAssign,     // równa
    CondIf,        // jeśli
    CondElse,      // przeciwnie
    Loop,          // powtarzaj
    LoopBreak,     // przerwij
    LoopContinue,  // kontynuuj
    PrintInt,      // wyświetl_liczbę
    PrintChar,     // wyświetl_znak
    ReadChar,      // wczytaj_znak
    Array,         // tablica
    OfSize,        // rozmiaru
    Element,       // element

    // Type keywords
    TypeInt,    // całkowita
    TypeBool,   // logiczna
    TypeChar,   // znak
    TypeString, // tekstowa

    // Boolean literal: "prawda" / "fałsz"
    BoolLit(bool),

    // Character literal, e.g. 'a'
    CharLit(char),

    // String literal, e.g. "abc" — expanded by the parser into an array of
    // character expressions.
    StringLit(String),

    // Numeral composition words (see ppc_lex::keywords)
    NumWord(i64),
    NumMul(i64),

    // Identifier text between backticks
    Ident(String),

    // Arithmetic words
    Add,      // dodać
    Subtract, // odjąć
    Multiply, // razy
    Divide,   // podzielić
    Modulo,   // modulo
    Minus,    // minus (leading negation of a numeral literal)

    // Relational words
    Equal,        // równe
    NotEqual,     // różne
    Greater,      // większe
    GreaterEqual, // większerówne
    Less,         // mniejsze
    LessEqual,    // mniejszerówne

    // Logical words
    LogicalAnd, // oraz
    LogicalOr,  // lub
    LogicalNot, // nie

    Eof,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        use TokenKind::*;
        match self {
            ParenOpen => "(",
            ParenClose => ")",
            BracketOpen => "[",
            BracketClose => "]",
            BraceOpen => "{",
            BraceClose => "}",
            Backtick => "`",
            Colon => ":",
            Comma => ",",
            Exit => "kończwaść",
            VarDecl => "zmienna",
            VarAssign => "równa",
            CondIf => "jeśli",
            CondElse => "przeciwnie",
            Loop => "powtarzaj",
            LoopBreak => "przerwij",
            LoopContinue => "kontynuuj",
            PrintInt => "wyświetl_liczbę",
            PrintChar => "wyświetl_znak",
            ReadChar => "wczytaj_znak",
            Array => "tablica",
            OfSize => "rozmiaru",
            Element => "element",
            TypeInt => "całkowita",
            TypeBool => "logiczna",
            TypeChar => "znak",
            TypeString => "tekstowa",
            BoolLit(_) => "<logiczna>",
            CharLit(_) => "<znak>",
            StringLit(_) => "<tekst>",
            NumWord(_) => "<liczba>",
            NumMul(_) => "<liczba>",
            Ident(_) => "<zmienna>",
            Add => "dodać",
            Subtract => "odjąć",
            Multiply => "razy",
            Divide => "podzielić",
            Modulo => "modulo",
            Minus => "minus",
            Equal => "równe",
            NotEqual => "różne",
            Greater => "większe",
            GreaterEqual => "większerówne",
            Less => "mniejsze",
            LessEqual => "mniejszerówne",
            LogicalAnd => "oraz",
            LogicalOr => "lub",
            LogicalNot => "nie",
            Eof => "<eof>",
        }
    }
}
