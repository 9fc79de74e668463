// # ==================== POLYNOMIAL EXPRESSION GRAMMAR ====================
//
// expression:
//     | ID '=' expression
//     | FUNCTION '(' expression ')'
//     | '-' expression
//     | expression '+' expression
//     | expression '-' expression
//     | expression '*' expression
//     | expression '/' expression
//     | expression '**' expression
//     | '(' expression ')'
//     | '|' expression '|'
//     | ID
//     | NUMBER
//
// FUNCTION: 'sin' | 'cos' | 'tan' | 'asin' | 'acos' | 'atan' | 'exp' | 'ln'
//         | 'log2' | 'log10' | 'sqrt'
//
// # Precedence, lowest first:
// #     right '='
// #     left  '+' '-'
// #     left  '*' '/'
// #     right '**'
// # Unary minus, groups, absolute values and calls are operands and bind
// # tighter than any binary operator.
//
// Each rule is evaluated the moment it is recognised; see `Evaluator::reduce`.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::ast::Production;
use super::error::{Error, MathError, Result};
use super::evaluator::Evaluator;
use super::input::ParserInput;
use super::tokenizer::TokenType as TT;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Assign,
    Plus,
    Minus,
    Times,
    Divide,
    Power,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Times => "*",
            Self::Divide => "/",
            Self::Power => "**",
        }
    }

    /// Applies a binary arithmetic operator.
    ///
    /// The parser binds names through `Production::Assign` and never routes
    /// `=` here; applying `Assign` directly yields the right side, which is
    /// the value an assignment evaluates to.
    pub fn apply(self, lhs: f64, rhs: f64) -> std::result::Result<f64, MathError> {
        let value = match self {
            Self::Assign => rhs,
            Self::Plus => lhs + rhs,
            Self::Minus => lhs - rhs,
            Self::Times => lhs * rhs,
            Self::Divide if rhs == 0.0 => return Err(MathError::DivisionByZero),
            Self::Divide => lhs / rhs,
            Self::Power => power(lhs, rhs)?,
        };
        defined(value)
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

fn power(base: f64, exponent: f64) -> std::result::Result<f64, MathError> {
    if base == 0.0 && exponent < 0.0 {
        return Err(MathError::DivisionByZero);
    }
    if base < 0.0 && exponent.is_finite() && exponent.fract() != 0.0 {
        return Err(MathError::Domain(
            "negative number raised to a fractional power",
        ));
    }
    Ok(base.powf(exponent))
}

// Overflow to infinity is a value; NaN never is.
fn defined(value: f64) -> std::result::Result<f64, MathError> {
    if value.is_nan() {
        Err(MathError::Domain("undefined result"))
    } else {
        Ok(value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Function {
    Sine,
    Cosine,
    Tangent,
    ArcSine,
    ArcCosine,
    ArcTangent,
    Exponential,
    NaturalLog,
    LogBase2,
    LogBase10,
    SquareRoot,
}

impl Function {
    pub fn name(self) -> &'static str {
        match self {
            Self::Sine => "sin",
            Self::Cosine => "cos",
            Self::Tangent => "tan",
            Self::ArcSine => "asin",
            Self::ArcCosine => "acos",
            Self::ArcTangent => "atan",
            Self::Exponential => "exp",
            Self::NaturalLog => "ln",
            Self::LogBase2 => "log2",
            Self::LogBase10 => "log10",
            Self::SquareRoot => "sqrt",
        }
    }

    pub fn apply(self, x: f64) -> std::result::Result<f64, MathError> {
        let value = match self {
            Self::Sine => x.sin(),
            Self::Cosine => x.cos(),
            Self::Tangent => x.tan(),
            Self::ArcSine | Self::ArcCosine if !(-1.0..=1.0).contains(&x) => {
                return Err(MathError::Domain("argument outside [-1, 1]"))
            }
            Self::ArcSine => x.asin(),
            Self::ArcCosine => x.acos(),
            Self::ArcTangent => x.atan(),
            Self::Exponential => x.exp(),
            Self::NaturalLog | Self::LogBase2 | Self::LogBase10 if x <= 0.0 => {
                return Err(MathError::Domain("logarithm of a non-positive number"))
            }
            Self::NaturalLog => x.ln(),
            Self::LogBase2 => x.log2(),
            Self::LogBase10 => x.log10(),
            Self::SquareRoot if x < 0.0 => {
                return Err(MathError::Domain("square root of a negative number"))
            }
            Self::SquareRoot => x.sqrt(),
        };
        defined(value)
    }
}

impl std::fmt::Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Where an infix operator sits in the precedence table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Binding {
    pub operator: Operator,
    pub precedence: u8,
    pub associativity: Associativity,
}

impl Binding {
    /// Minimum precedence an operator to the right must have to be folded
    /// into this operator's right operand.
    pub fn right_precedence(self) -> u8 {
        match self.associativity {
            Associativity::Left => self.precedence + 1,
            Associativity::Right => self.precedence,
        }
    }
}

const PRECEDENCE: [(Associativity, &[(TT, Operator)]); 4] = [
    (Associativity::Right, &[(TT::EQUALS, Operator::Assign)]),
    (
        Associativity::Left,
        &[(TT::PLUS, Operator::Plus), (TT::MINUS, Operator::Minus)],
    ),
    (
        Associativity::Left,
        &[(TT::TIMES, Operator::Times), (TT::DIVIDE, Operator::Divide)],
    ),
    (Associativity::Right, &[(TT::POWER, Operator::Power)]),
];

const FUNCTIONS: [(TT, Function); 11] = [
    (TT::SINE, Function::Sine),
    (TT::COSINE, Function::Cosine),
    (TT::TANGENT, Function::Tangent),
    (TT::ARCSINE, Function::ArcSine),
    (TT::ARCCOSINE, Function::ArcCosine),
    (TT::ARCTANGENT, Function::ArcTangent),
    (TT::EXPONENTIAL, Function::Exponential),
    (TT::NATURAL_LOG, Function::NaturalLog),
    (TT::LOG_BASE_2, Function::LogBase2),
    (TT::LOG_BASE_10, Function::LogBase10),
    (TT::SQUARE_ROOT, Function::SquareRoot),
];

static DEFAULT: Lazy<Grammar> = Lazy::new(Grammar::new);

/// The operator precedence table and the function dispatch table.
///
/// Built once and never mutated, so any number of evaluators (including the
/// nested ones spawned while resolving names) can share one instance.
#[derive(Debug, Clone)]
pub struct Grammar {
    operators: HashMap<TT, Binding>,
    functions: HashMap<TT, Function>,
}

impl Grammar {
    pub fn new() -> Self {
        let mut operators = HashMap::new();
        for (precedence, (associativity, ops)) in (0u8..).zip(PRECEDENCE) {
            for &(typ, operator) in ops {
                operators.insert(
                    typ,
                    Binding {
                        operator,
                        precedence,
                        associativity,
                    },
                );
            }
        }
        Self {
            operators,
            functions: FUNCTIONS.into_iter().collect(),
        }
    }

    /// Process-wide instance, built on first use.
    pub fn default_ref() -> &'static Self {
        &DEFAULT
    }

    pub fn binding(&self, typ: TT) -> Option<Binding> {
        self.operators.get(&typ).copied()
    }

    pub fn function(&self, typ: TT) -> Option<Function> {
        self.functions.get(&typ).copied()
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator<'_> {
    // statement: expression ENDMARKER
    pub(super) fn statement(&mut self, input: &mut ParserInput) -> Result<f64> {
        let value = self.expression(input, 0)?;
        match input.first() {
            None => Ok(value),
            Some(token) => Err(Error::syntax(token.span, &format!("unexpected {token}"))),
        }
    }

    // expression: operand (OPERATOR expression)*
    //
    // Operators are folded by precedence climbing: a right operand absorbs
    // every following operator that binds at least `right_precedence`.
    fn expression(&mut self, input: &mut ParserInput, min_precedence: u8) -> Result<f64> {
        let start = input.span();
        self.descend(start, |this| this.fold(input, min_precedence))
    }

    fn fold(&mut self, input: &mut ParserInput, min_precedence: u8) -> Result<f64> {
        let start = input.span();
        let mut lhs = self.operand(input)?;
        while let Some(token) = input.first() {
            let Some(binding) = self.grammar.binding(token.typ) else {
                break;
            };
            if binding.precedence < min_precedence {
                break;
            }
            if binding.operator == Operator::Assign {
                return Err(Error::syntax(token.span, "can only assign to a name"));
            }
            input.advance();
            let rhs = self.expression(input, binding.right_precedence())?;
            let span = start.till(&input.previous());
            lhs = self.reduce(Production::Binary(binding.operator, lhs, rhs), span)?;
        }
        Ok(lhs)
    }

    // operand:
    //     | ID '=' expression
    //     | FUNCTION '(' expression ')'
    //     | '-' operand
    //     | '(' expression ')'
    //     | '|' expression '|'
    //     | ID
    //     | NUMBER
    fn operand(&mut self, input: &mut ParserInput) -> Result<f64> {
        let Some(token) = input.advance() else {
            return Err(Error::syntax(input.span(), "unexpected end of input"));
        };
        let start = token.span;
        match token.typ {
            TT::NUMBER => match token.number {
                Some(number) => self.reduce(Production::Number(number), start),
                None => Err(Error::syntax(start, "malformed number")),
            },
            TT::ID if input.first().map(|t| t.typ) == Some(TT::EQUALS) => {
                input.advance();
                let precedence = self
                    .grammar
                    .binding(TT::EQUALS)
                    .map_or(0, Binding::right_precedence);
                let value = self.expression(input, precedence)?;
                let span = start.till(&input.previous());
                self.reduce(Production::Assign(token.lexeme.clone(), value), span)
            }
            TT::ID => self.reduce(Production::Lookup(token.lexeme.clone()), start),
            TT::MINUS => {
                let value = self.descend(start, |this| this.operand(input))?;
                let span = start.till(&input.previous());
                self.reduce(Production::Negate(value), span)
            }
            TT::LPAREN => {
                let value = self.expression(input, 0)?;
                input.expect(TT::RPAREN, "expected ')'")?;
                let span = start.till(&input.previous());
                self.reduce(Production::Group(value), span)
            }
            TT::VERT => {
                let value = self.expression(input, 0)?;
                input.expect(TT::VERT, "expected closing '|'")?;
                let span = start.till(&input.previous());
                self.reduce(Production::Abs(value), span)
            }
            typ => match self.grammar.function(typ) {
                Some(function) => {
                    input.expect(TT::LPAREN, &format!("expected '(' after '{function}'"))?;
                    let value = self.expression(input, 0)?;
                    input.expect(TT::RPAREN, "expected ')'")?;
                    let span = start.till(&input.previous());
                    self.reduce(Production::Call(function, value), span)
                }
                None => Err(Error::syntax(start, &format!("unexpected {token}"))),
            },
        }
    }
}
