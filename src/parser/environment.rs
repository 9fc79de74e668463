use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Name → value bindings shared by a session and every nested session it spawns.
///
/// Cloning an `Environment` does not copy the map: both handles see the same
/// bindings, so a value resolved or assigned by a nested evaluation is visible
/// to its caller. Use [`Environment::snapshot`] for an independent copy.
#[derive(Clone, Default)]
pub struct Environment(Rc<RefCell<HashMap<String, f64>>>);

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, name: &str) -> Option<f64> {
        self.0.borrow().get(name).copied()
    }

    /// Last write wins.
    pub fn assign(&self, name: &str, value: f64) {
        self.0.borrow_mut().insert(name.to_string(), value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.borrow().contains_key(name)
    }

    pub fn extend<I, K>(&self, bindings: I)
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        self.0
            .borrow_mut()
            .extend(bindings.into_iter().map(|(k, v)| (k.into(), v)));
    }

    pub fn bindings(&self) -> HashMap<String, f64> {
        self.0.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// A detached copy; later writes to either side are not shared.
    pub fn snapshot(&self) -> Self {
        Self(Rc::new(RefCell::new(self.bindings())))
    }

    /// Whether both handles refer to the same bindings.
    pub fn shares(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bindings = self.0.borrow();
        let mut names: Vec<_> = bindings.keys().collect();
        names.sort();
        f.debug_map()
            .entries(names.into_iter().map(|k| (k, bindings[k])))
            .finish()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let env = Self::new();
        env.extend(iter);
        env
    }
}

/// Read access for callers that inspect or pre-seed variables.
pub fn bindings(env: &Environment) -> HashMap<String, f64> {
    env.bindings()
}
