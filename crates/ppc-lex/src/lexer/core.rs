//! The main scanning loop: a word-buffer-and-classify tokenizer, not a
//! per-character dispatch table. Every operator and keyword in this language
//! is a whole word — `(` `)` `[` `]` `{` `}` `` ` `` `:` `,` `'` `"` are the
//! only single-character tokens, and `` ` `` is ordinary punctuation rather
//! than a mode switch: an identifier is just whatever word the classifier
//! falls through to between a pair of backticks. `'` and `"` do switch modes,
//! for character and string literals respectively, since those need to
//! capture arbitrary text up to a closing quote.
//!
//! A word that matches no keyword, numeral, or boolean literal becomes a
//! plain [`TokenKind::Ident`] — there is no "unrecognized word" lexical
//! error. Whether that identifier is actually bound to anything is a
//! question for later stages.

use crate::keywords::lookup_keyword;
use crate::token::{Token, TokenKind};
use ppc_util::{LexError, LexResult, Span};

pub struct Lexer<'src> {
    chars: std::iter::Peekable<std::str::Chars<'src>>,
    line: u32,
    buffer: String,
    in_comment: bool,
    tokens: Vec<Token>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            chars: source.chars().peekable(),
            line: 1,
            buffer: String::new(),
            in_comment: false,
            tokens: Vec::new(),
        }
    }

    /// Scan the entire source into a token stream, stopping at the first
    /// lexical error.
    pub fn tokenize(mut self) -> LexResult<Vec<Token>> {
        while let Some(c) = self.chars.next() {
            if self.in_comment {
                if c == '\n' {
                    self.in_comment = false;
                    self.line += 1;
                } else if c == '#' {
                    self.in_comment = false;
                }
                continue;
            }

            match c {
                '#' => {
                    self.flush_buffer()?;
                    self.in_comment = true;
                }
                '\n' => {
                    self.flush_buffer()?;
                    self.line += 1;
                }
                c if c.is_whitespace() => {
                    self.flush_buffer()?;
                }
                '`' => {
                    self.flush_buffer()?;
                    self.push(TokenKind::Backtick);
                }
                '[' => {
                    self.flush_buffer()?;
                    self.push(TokenKind::BracketOpen);
                }
                ']' => {
                    self.flush_buffer()?;
                    self.push(TokenKind::BracketClose);
                }
                '(' => {
                    self.flush_buffer()?;
                    self.push(TokenKind::ParenOpen);
                }
                ')' => {
                    self.flush_buffer()?;
                    self.push(TokenKind::ParenClose);
                }
                '{' => {
                    self.flush_buffer()?;
                    self.push(TokenKind::BraceOpen);
                }
                '}' => {
                    self.flush_buffer()?;
                    self.push(TokenKind::BraceClose);
                }
                ':' => {
                    self.flush_buffer()?;
                    self.push(TokenKind::Colon);
                }
                ',' => {
                    self.flush_buffer()?;
                    self.push(TokenKind::Comma);
                }
                '\'' => {
                    self.flush_buffer()?;
                    self.scan_char_literal()?;
                }
                '"' => {
                    self.flush_buffer()?;
                    self.scan_string_literal()?;
                }
                c => self.buffer.push(c),
            }
        }

        self.flush_buffer()?;
        self.tokens.push(Token::new(TokenKind::Eof, self.line));
        Ok(self.tokens)
    }

    fn push(&mut self, kind: TokenKind) {
        self.tokens.push(Token::new(kind, self.line));
    }

    fn flush_buffer(&mut self) -> LexResult<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let word = std::mem::take(&mut self.buffer);
        let kind = lookup_keyword(&word).unwrap_or(TokenKind::Ident(word));
        self.push(kind);
        Ok(())
    }

    /// A character literal is a single UTF-8 scalar value between quotes, or
    /// the two-character escape `\n` for a newline.
    fn scan_char_literal(&mut self) -> LexResult<()> {
        let mut raw = String::new();
        loop {
            match self.chars.next() {
                Some('\'') => break,
                Some('\n') | None => {
                    return Err(LexError::UnterminatedCharLiteral {
                        span: Span::new(self.line),
                    })
                }
                Some(c) => raw.push(c),
            }
        }
        let ch = match raw.as_str() {
            "\\n" => '\n',
            _ if raw.chars().count() == 1 => raw.chars().next().unwrap(),
            _ => {
                return Err(LexError::UnterminatedCharLiteral {
                    span: Span::new(self.line),
                })
            }
        };
        self.push(TokenKind::CharLit(ch));
        Ok(())
    }

    fn scan_string_literal(&mut self) -> LexResult<()> {
        let mut raw = String::new();
        loop {
            match self.chars.next() {
                Some('"') => break,
                Some('\n') | None => {
                    return Err(LexError::UnterminatedStringLiteral {
                        span: Span::new(self.line),
                    })
                }
                Some(c) => raw.push(c),
            }
        }
        self.push(TokenKind::StringLit(raw));
        Ok(())
    }
}
