use super::ast::Production;
use super::environment::Environment;
use super::error::{Error, LexicalError, Result};
use super::grammar::Grammar;
use super::input::ParserInput;
use super::locations::Span;
use super::resolver::Resolver;
use super::tokenizer::{tokenize_with_diagnostics, Token};

// Deeper groups, calls or operator chains fail instead of exhausting the stack.
const MAX_NESTING: usize = 100;

/// One parse session: evaluates expression text against an environment.
///
/// Parsing and evaluating are the same pass. Names missing from the
/// environment are handed to the resolver, if there is one; the text it
/// supplies is evaluated by a nested session that shares this session's
/// grammar, environment and resolver.
pub struct Evaluator<'a> {
    pub(super) grammar: &'a Grammar,
    pub(super) env: Environment,
    resolver: Option<&'a mut dyn Resolver>,
    diagnostics: Vec<LexicalError>,
    depth: usize,
    resolving: Vec<String>,
    nesting: usize,
}

impl<'a> Evaluator<'a> {
    pub fn new(grammar: &'a Grammar, env: Environment) -> Self {
        Self {
            grammar,
            env,
            resolver: None,
            diagnostics: vec![],
            depth: 0,
            resolving: vec![],
            nesting: 0,
        }
    }

    pub fn with_resolver(
        grammar: &'a Grammar,
        env: Environment,
        resolver: &'a mut dyn Resolver,
    ) -> Self {
        Self {
            resolver: Some(resolver),
            ..Self::new(grammar, env)
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Illegal characters skipped while tokenizing the last input.
    pub fn diagnostics(&self) -> &[LexicalError] {
        &self.diagnostics
    }

    pub fn evaluate(&mut self, text: &str) -> Result<f64> {
        let (tokens, diagnostics) = tokenize_with_diagnostics(text);
        self.diagnostics = diagnostics;
        self.evaluate_tokens(&tokens)
    }

    pub fn evaluate_tokens(&mut self, tokens: &[Token]) -> Result<f64> {
        let mut input = ParserInput::new(tokens);
        self.statement(&mut input)
    }

    /// Runs one level of a recursive rule, failing once `MAX_NESTING` levels
    /// are open. Nested resolutions continue the count of their caller.
    pub(super) fn descend<T>(
        &mut self,
        span: Span,
        rule: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        if self.nesting >= MAX_NESTING {
            return Err(Error::syntax(span, "expression nested too deeply"));
        }
        self.nesting += 1;
        let result = rule(self);
        self.nesting -= 1;
        result
    }

    pub(super) fn reduce(&mut self, production: Production, span: Span) -> Result<f64> {
        tracing::trace!(depth = self.depth, %production, %span, "reduce");
        match production {
            Production::Assign(name, value) => {
                self.env.assign(&name, value);
                Ok(value)
            }
            Production::Call(function, value) => function.apply(value).map_err(|e| e.at(span)),
            Production::Negate(value) => Ok(-value),
            Production::Binary(operator, lhs, rhs) => {
                operator.apply(lhs, rhs).map_err(|e| e.at(span))
            }
            Production::Group(value) => Ok(value),
            Production::Abs(value) => Ok(value.abs()),
            Production::Lookup(name) => match self.env.lookup(&name) {
                Some(value) => Ok(value),
                None => self.resolve(&name, span),
            },
            Production::Number(number) => Ok(number.value()),
        }
    }

    fn resolve(&mut self, name: &str, span: Span) -> Result<f64> {
        let Some(resolver) = self.resolver.as_mut() else {
            return Err(Error::Unbound {
                span,
                name: name.to_string(),
            });
        };
        let resolver: &mut dyn Resolver = &mut **resolver;

        // names still being resolved further up cannot be defined by their own text
        if self.resolving.iter().any(|n| n == name) {
            return Err(Error::syntax(
                span,
                &format!("circular definition of '{name}'"),
            ));
        }

        tracing::debug!(depth = self.depth, name, "requesting a value for unbound name");
        let Some(text) = resolver.resolve(name) else {
            return Err(Error::Interrupted {
                name: name.to_string(),
            });
        };

        let mut nested = Evaluator::with_resolver(self.grammar, self.env.clone(), resolver);
        nested.depth = self.depth + 1;
        nested.nesting = self.nesting;
        nested.resolving = self.resolving.clone();
        nested.resolving.push(name.to_string());
        let value = nested.evaluate(&text)?;

        self.env.assign(name, value);
        tracing::debug!(depth = self.depth, name, value, "resolved");
        Ok(value)
    }
}
