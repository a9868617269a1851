//! The keyword and numeral-word tables.
//!
//! These map a lowercase source word to a [`TokenKind`]. A word that matches
//! none of these tables becomes a plain [`TokenKind::Ident`] instead —
//! whether that identifier is actually legal where it appears (only inside
//! a pair of backticks) is for `ppc_par` to check.

use crate::token::TokenKind;

/// Look up a single-word keyword, boolean literal, or numeral word/
/// multiplier. Returns `None` if `word` matches none of these.
pub fn lookup_keyword(word: &str) -> Option<TokenKind> {
    use TokenKind::*;
    Some(match word {
        "kończwaść" => Exit,
        "zmienna" => VarDecl,
        "równa" => VarAssign,
        "jeśli" => CondIf,
        "przeciwnie" => CondElse,
        "powtarzaj" => Loop,
        "przerwij" => LoopBreak,
        "kontynuuj" => LoopContinue,
        "wyświetl_liczbę" => PrintInt,
        "wyświetl_znak" => PrintChar,
        "wczytaj_znak" => ReadChar,
        "tablica" => Array,
        "rozmiaru" => OfSize,
        "element" => Element,
        "całkowita" => TypeInt,
        "logiczna" => TypeBool,
        "znak" => TypeChar,
        "tekstowa" => TypeString,
        "dodać" => Add,
        "odjąć" => Subtract,
        "razy" => Multiply,
        "podzielić" => Divide,
        "modulo" => Modulo,
        "minus" => Minus,
        "równe" => Equal,
        "różne" => NotEqual,
        "większe" => Greater,
        "większerówne" => GreaterEqual,
        "mniejsze" => Less,
        "mniejszerówne" => LessEqual,
        "oraz" => LogicalAnd,
        "lub" => LogicalOr,
        "nie" => LogicalNot,
        "prawda" => BoolLit(true),
        "fałsz" => BoolLit(false),
        _ => return lookup_numeral(word),
    })
}

/// Look up a word as either a numeral value word (e.g. "trzynaście" → 13) or
/// a multiplier word (e.g. "tysięcy" → 1000).
fn lookup_numeral(word: &str) -> Option<TokenKind> {
    if let Some(&(_, v)) = NUM_VALUES.iter().find(|(w, _)| *w == word) {
        return Some(TokenKind::NumWord(v));
    }
    if let Some(&(_, m)) = MULTIPLIERS.iter().find(|(w, _)| *w == word) {
        return Some(TokenKind::NumMul(m));
    }
    None
}

/// Base numeral value words: ones, teens, tens, hundreds, and the singular
/// forms of thousand/million/billion (which double as ordinary value words
/// when used bare, e.g. "tysiąc" alone means 1000).
const NUM_VALUES: &[(&str, i64)] = &[
    ("zero", 0),
    ("jeden", 1),
    ("dwa", 2),
    ("trzy", 3),
    ("cztery", 4),
    ("pięć", 5),
    ("sześć", 6),
    ("siedem", 7),
    ("osiem", 8),
    ("dziewięć", 9),
    ("dziesięć", 10),
    ("jedenaście", 11),
    ("dwanaście", 12),
    ("trzynaście", 13),
    ("czternaście", 14),
    ("piętnaście", 15),
    ("szesnaście", 16),
    ("siedemnaście", 17),
    ("osiemnaście", 18),
    ("dziewiętnaście", 19),
    ("dwadzieścia", 20),
    ("trzydzieści", 30),
    ("czterdzieści", 40),
    ("pięćdziesiąt", 50),
    ("sześćdziesiąt", 60),
    ("siedemdziesiąt", 70),
    ("osiemdziesiąt", 80),
    ("dziewięćdziesiąt", 90),
    ("sto", 100),
    ("dwieście", 200),
    ("trzysta", 300),
    ("czterysta", 400),
    ("pięćset", 500),
    ("sześćset", 600),
    ("siedemset", 700),
    ("osiemset", 800),
    ("dziewięćset", 900),
    ("tysiąc", 1_000),
    ("milion", 1_000_000),
    ("miliard", 1_000_000_000),
];

/// Plural multiplier forms — each scales the running multiplier used while
/// composing a bracketed numeral (see [`crate`]'s sibling crate `ppc_par`'s
/// `number` module for the composition algorithm itself).
const MULTIPLIERS: &[(&str, i64)] = &[
    ("tysiące", 1_000),
    ("tysięcy", 1_000),
    ("miliony", 1_000_000),
    ("milionów", 1_000_000),
    ("miliardy", 1_000_000_000),
    ("miliardów", 1_000_000_000),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_statement_keywords() {
        assert_eq!(lookup_keyword("kończwaść"), Some(TokenKind::Exit));
        assert_eq!(lookup_keyword("powtarzaj"), Some(TokenKind::Loop));
    }

    #[test]
    fn recognizes_bool_literals() {
        assert_eq!(lookup_keyword("prawda"), Some(TokenKind::BoolLit(true)));
        assert_eq!(lookup_keyword("fałsz"), Some(TokenKind::BoolLit(false)));
    }

    #[test]
    fn recognizes_numeral_words() {
        assert_eq!(lookup_keyword("trzy"), Some(TokenKind::NumWord(3)));
        assert_eq!(lookup_keyword("dziewięćset"), Some(TokenKind::NumWord(900)));
    }

    #[test]
    fn recognizes_multiplier_words() {
        assert_eq!(lookup_keyword("tysięcy"), Some(TokenKind::NumMul(1_000)));
        assert_eq!(lookup_keyword("milionów"), Some(TokenKind::NumMul(1_000_000)));
    }

    #[test]
    fn unknown_word_is_none() {
        assert_eq!(lookup_keyword("xyzzy"), None);
    }
}
