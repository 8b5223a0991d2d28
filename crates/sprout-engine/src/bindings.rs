//! Variable bindings for one evaluation run.

use std::collections::HashMap;

use sprout_syntax::Value;

/// The flat, global variable map of a single run.
///
/// The teaching scope never shadows or nests: every assignment anywhere in
/// the snippet reads and writes the same map. A fresh `Bindings` is created
/// for each run, so nothing carries over between "Run" clicks.
#[derive(Default)]
pub struct Bindings {
    vars: HashMap<String, Value>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    pub fn set(&mut self, name: String, value: Value) {
        self.vars.insert(name, value);
    }

    /// Read-only view used by the expression evaluator.
    pub fn map(&self) -> &HashMap<String, Value> {
        &self.vars
    }

    pub fn snapshot(&self) -> Vec<(String, Value)> {
        self.vars
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}
