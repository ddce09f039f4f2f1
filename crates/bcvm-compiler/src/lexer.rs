//! Operand lexer.
//!
//! Operands are whitespace separated. A token that is not followed by
//! whitespace or the end of the text is widened to the next whitespace and
//! reported as `Garbage`, so `12ab` is one malformed operand rather than a
//! number followed by junk.

use logos::Logos;

use crate::source::Span;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r]+")]
pub enum TokenKind {
    /// `#name`: static, local or argument.
    #[regex(r"#[^\s]+", allow_greedy = true)]
    Variable,

    /// `@name`: jump label.
    #[regex(r"@[^\s]+", allow_greedy = true)]
    Label,

    /// `$name`: function entry.
    #[regex(r"\$[^\s]+", allow_greedy = true)]
    Function,

    /// `'c'`: character ordinal.
    #[regex(r"'[^']'")]
    Char,

    /// Unsigned decimal integer.
    #[regex(r"[0-9]+")]
    Number,

    /// `"text"`: only valid as the sole operand of `LITERAL_ARRAY`.
    #[regex(r#""[^"]*""#)]
    Str,

    /// Anything unrecognized, widened to the surrounding word.
    Garbage,
}

/// Span-based token; the text is sliced from the lexed input on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    #[inline]
    pub fn text<'t>(&self, input: &'t str) -> &'t str {
        &input[self.span.clone()]
    }

    /// Same token with its span shifted by `offset` bytes.
    pub fn shifted(self, offset: usize) -> Self {
        Self::new(self.kind, self.span.start + offset..self.span.end + offset)
    }
}

/// Tokenize operand text. Spans are relative to `text`.
pub fn lex(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(text);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let rest = &text[span.end..];
        let glued = rest.starts_with(|c: char| !c.is_whitespace());

        match result {
            Ok(kind) if !glued => tokens.push(Token::new(kind, span)),
            _ => {
                let tail = rest.find(char::is_whitespace).unwrap_or(rest.len());
                lexer.bump(tail);
                tokens.push(Token::new(TokenKind::Garbage, span.start..span.end + tail));
            }
        }
    }

    tokens
}

/// Tokenize operand text, shifting spans to absolute source offsets.
pub fn lex_at(text: &str, offset: usize) -> Vec<Token> {
    lex(text).into_iter().map(|t| t.shifted(offset)).collect()
}
