use std::collections::HashMap;

/// Supplies expression text for a name that has no binding.
///
/// The evaluator blocks on [`Resolver::resolve`], parses the returned text in
/// a nested session sharing the same environment, and binds the result.
/// Returning `None` means no more input is coming and aborts the parse.
pub trait Resolver {
    fn resolve(&mut self, name: &str) -> Option<String>;
}

impl<F> Resolver for F
where
    F: FnMut(&str) -> Option<String>,
{
    fn resolve(&mut self, name: &str) -> Option<String> {
        self(name)
    }
}

/// A fixed table of answers. Unknown names fail fast instead of blocking,
/// which makes it the resolver of choice for batch callers and tests.
#[derive(Debug, Default, Clone)]
pub struct Bindings {
    answers: HashMap<String, String>,
    requests: Vec<String>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, text: &str) -> Self {
        self.answers.insert(name.to_string(), text.to_string());
        self
    }

    /// Every name asked for so far, in order.
    pub fn requests(&self) -> &[String] {
        &self.requests
    }
}

impl Resolver for Bindings {
    fn resolve(&mut self, name: &str) -> Option<String> {
        self.requests.push(name.to_string());
        self.answers.get(name).cloned()
    }
}
