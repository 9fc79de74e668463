mod parser;
pub use parser::tokenizer;
pub use parser::{
    bindings, parse, parse_with, tokenize, tokenize_with_diagnostics, Associativity, Binding,
    Bindings, Environment, Error, ErrorKind, Evaluator, Function, Grammar, LexicalError,
    Locatable, Location, MathError, Number, Operator, Production, Resolver, Result, Span, Token,
    TokenType, Tokenizer,
};

mod interpreter;
pub use interpreter::PolynomialInterpreter;
