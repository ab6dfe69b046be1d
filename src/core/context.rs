//! Variable store - values captured from responses during one run

use crate::core::value::Value;
use std::collections::HashMap;

/// Variables available to template substitution
///
/// One store exists per pipeline run. It starts empty and only grows through
/// setters; nothing is removed and a repeated name is overwritten.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableStore {
    variables: HashMap<String, Value>,
}

impl VariableStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a variable, replacing any previous binding of the same name
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.variables.insert(name.into(), value);
    }

    /// Get a variable
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Get a variable only when it is bound to a string
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Iterate bindings, sorted by name
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        let mut entries: Vec<_> = self.variables.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.into_iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for VariableStore {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut store = Self::new();
        for (name, value) in iter {
            store.set(name, value);
        }
        store
    }
}
