use super::error::{Error, Result};
use super::locations::Span;
use super::tokenizer::{Token, TokenType};

/// The unconsumed rest of a token stream.
#[derive(Debug, Clone, Copy)]
pub(super) struct ParserInput<'t> {
    tokens: &'t [Token],
    previous: Span,
    end: Span,
}

impl<'t> ParserInput<'t> {
    pub(super) fn new(tokens: &'t [Token]) -> Self {
        let end = tokens
            .last()
            .map_or_else(Span::default, |t| Span::at(t.span.end.line, t.span.end.column));
        Self {
            tokens,
            previous: Span::default(),
            end,
        }
    }

    pub(super) fn first(&self) -> Option<&'t Token> {
        self.tokens.first()
    }

    /// Span of the next token, or a zero-width span past the last one.
    pub(super) fn span(&self) -> Span {
        self.first().map_or(self.end, |t| t.span)
    }

    /// Span of the most recently consumed token.
    pub(super) fn previous(&self) -> Span {
        self.previous
    }

    pub(super) fn advance(&mut self) -> Option<&'t Token> {
        let (first, rest) = self.tokens.split_first()?;
        self.tokens = rest;
        self.previous = first.span;
        Some(first)
    }

    /// Consumes the next token if it has the expected type.
    pub(super) fn tok(&mut self, expected_type: TokenType) -> Option<&'t Token> {
        match self.first() {
            Some(token) if token.typ == expected_type => self.advance(),
            _ => None,
        }
    }

    pub(super) fn expect(&mut self, expected_type: TokenType, msg: &str) -> Result<&'t Token> {
        let span = self.span();
        self.tok(expected_type).ok_or_else(|| Error::syntax(span, msg))
    }
}
