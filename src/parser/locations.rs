use super::tokenizer::Token;

#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

pub trait Locatable {
    fn span(&self) -> Span;
}

/// Half-open column range of a token or a run of tokens.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Span {
    pub start: Location,
    pub end: Location,
}

impl Span {
    pub(crate) fn new(line: usize, start_col: usize, end_col: usize) -> Self {
        Self {
            start: Location {
                line,
                column: start_col,
            },
            end: Location {
                line,
                column: end_col,
            },
        }
    }

    /// Zero-width span at the end of a line, used for "unexpected end of input".
    pub(crate) fn at(line: usize, column: usize) -> Self {
        Self::new(line, column, column)
    }

    pub(crate) fn till<R: Locatable>(&self, other: &R) -> Self {
        Self {
            start: self.start,
            end: other.span().end,
        }
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.start.line == self.end.line {
            write!(
                f,
                "line {}, columns {}..{}",
                self.start.line, self.start.column, self.end.column
            )
        } else {
            write!(f, "{} till {}", self.start, self.end)
        }
    }
}

impl Locatable for Span {
    fn span(&self) -> Span {
        *self
    }
}

impl Locatable for Token {
    fn span(&self) -> Span {
        self.span
    }
}

impl<R> Locatable for [R]
where
    R: Locatable,
{
    fn span(&self) -> Span {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => first.span().till(last),
            _ => Span::default(),
        }
    }
}
