use super::locations::Span;

pub type Result<T> = std::result::Result<T, Error>;

/// Why an evaluation was abandoned.
///
/// Every variant aborts the whole `parse` call; nothing is retried and no
/// partial value escapes. Illegal characters are not in here: the tokenizer
/// recovers from them and reports a [`LexicalError`] instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Syntax error: {msg} at {span}")]
    Syntax { span: Span, msg: String },
    #[error("Syntax error: input ended while resolving '{name}'")]
    Interrupted { name: String },
    #[error("Error: division by zero at {span}")]
    DivisionByZero { span: Span },
    #[error("Error: undefined result, {msg} at {span}")]
    Domain { span: Span, msg: String },
    #[error("Error: name '{name}' is not defined at {span}")]
    Unbound { span: Span, name: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Lexical,
    Syntax,
    DivisionByZero,
    Domain,
    Unbound,
}

impl Error {
    pub(crate) fn syntax(span: Span, msg: &str) -> Self {
        Self::Syntax {
            span,
            msg: msg.to_string(),
        }
    }

    pub(crate) fn domain(span: Span, msg: &str) -> Self {
        Self::Domain {
            span,
            msg: msg.to_string(),
        }
    }

    /// A resolver running dry mid-parse counts as a syntax failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Syntax { .. } | Self::Interrupted { .. } => ErrorKind::Syntax,
            Self::DivisionByZero { .. } => ErrorKind::DivisionByZero,
            Self::Domain { .. } => ErrorKind::Domain,
            Self::Unbound { .. } => ErrorKind::Unbound,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Illegal character '{character}' at {span}")]
pub struct LexicalError {
    pub character: char,
    pub span: Span,
}

impl LexicalError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Lexical
    }
}

/// A failed arithmetic step, before it is tied to a source location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    DivisionByZero,
    Domain(&'static str),
}

impl MathError {
    pub(crate) fn at(self, span: Span) -> Error {
        match self {
            Self::DivisionByZero => Error::DivisionByZero { span },
            Self::Domain(msg) => Error::domain(span, msg),
        }
    }
}
