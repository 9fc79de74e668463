use crate::parser::{Environment, Evaluator, Grammar, Resolver, Result};

/// A stored polynomial expression, evaluated on demand with named arguments.
///
/// ```
/// use polycalc::PolynomialInterpreter;
///
/// let p = PolynomialInterpreter::new("3.58*x**5 + 6.28*x**2*y*z + x*y*z**3 + 3");
/// let result = p.evaluate([("x", 2.0), ("y", 1.0), ("z", 0.5)]).unwrap();
/// assert!((result - 130.37).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct PolynomialInterpreter {
    text: String,
    env: Environment,
}

impl PolynomialInterpreter {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            env: Environment::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Bindings accumulated over every call so far.
    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Binds the arguments, then evaluates the expression. Arguments stay
    /// bound for later calls; names still missing are an error.
    pub fn evaluate<I, K>(&self, arguments: I) -> Result<f64>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        self.env.extend(arguments);
        Evaluator::new(Grammar::default_ref(), self.env.clone())
            .evaluate(&self.text)
            .inspect_err(|e| tracing::debug!(text = %self.text, error = %e, "evaluation failed"))
    }

    /// Like [`PolynomialInterpreter::evaluate`], but asks `resolver` for names
    /// that are still missing.
    pub fn evaluate_with<I, K>(&self, arguments: I, resolver: &mut dyn Resolver) -> Result<f64>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        self.env.extend(arguments);
        Evaluator::with_resolver(Grammar::default_ref(), self.env.clone(), resolver)
            .evaluate(&self.text)
    }
}
