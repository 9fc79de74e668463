mod ast;
mod environment;
mod error;
mod evaluator;
mod grammar;
mod input;
mod locations;
mod resolver;
pub mod tokenizer;

pub use ast::Production;
pub use environment::{bindings, Environment};
pub use error::{Error, ErrorKind, LexicalError, MathError, Result};
pub use evaluator::Evaluator;
pub use grammar::{Associativity, Binding, Function, Grammar, Operator};
pub use locations::{Locatable, Location, Span};
pub use resolver::{Bindings, Resolver};
pub use tokenizer::{tokenize, tokenize_with_diagnostics, Number, Token, TokenType, Tokenizer};

/// Evaluates `text` against `env` with no resolver: unbound names fail.
pub fn parse(text: &str, env: &Environment) -> Result<f64> {
    Evaluator::new(Grammar::default_ref(), env.clone()).evaluate(text)
}

/// Evaluates `text` against `env`, asking `resolver` for unbound names.
pub fn parse_with(text: &str, env: &Environment, resolver: &mut dyn Resolver) -> Result<f64> {
    Evaluator::with_resolver(Grammar::default_ref(), env.clone(), resolver).evaluate(text)
}
