use super::grammar::{Function, Operator};
use super::tokenizer::Number;

/// One recognised grammar rule together with the already-computed values of
/// its sub-expressions.
///
/// The parser builds a `Production` at the moment it reduces a rule and hands
/// it straight to the evaluator; nothing is kept once the value is known.
#[derive(Debug, Clone, PartialEq)]
pub enum Production {
    /// `expression: ID '=' expression`
    Assign(String, f64),
    /// `expression: FUNCTION '(' expression ')'`
    Call(Function, f64),
    /// `expression: '-' expression`
    Negate(f64),
    /// `expression: expression OP expression`
    Binary(Operator, f64, f64),
    /// `expression: '(' expression ')'`
    Group(f64),
    /// `expression: '|' expression '|'`
    Abs(f64),
    /// `expression: ID`
    Lookup(String),
    /// `expression: NUMBER`
    Number(Number),
}

impl std::fmt::Display for Production {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Assign(name, v) => write!(f, "{name} = {v}"),
            Self::Call(func, v) => write!(f, "{func}({v})"),
            Self::Negate(v) => write!(f, "-{v}"),
            Self::Binary(op, l, r) => write!(f, "{l} {op} {r}"),
            Self::Group(v) => write!(f, "({v})"),
            Self::Abs(v) => write!(f, "|{v}|"),
            Self::Lookup(name) => write!(f, "{name}"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}
