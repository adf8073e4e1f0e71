//! Per-run memoization of type resolution.

use std::collections::HashMap;

use crate::ir::{ModelNames, TypeName};

/// Resolution results keyed by qualified declaration name.
///
/// Created fresh for every run and only ever appended to.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    failure_types: HashMap<String, TypeName>,
    model_names: HashMap<String, Option<ModelNames>>,
    hits: usize,
    misses: usize,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failure_type(&mut self, value_type: &str) -> Option<TypeName> {
        let found = self.failure_types.get(value_type).cloned();
        self.record(found.is_some());
        found
    }

    pub fn insert_failure_type(&mut self, value_type: &str, failure: TypeName) {
        self.failure_types.insert(value_type.to_string(), failure);
    }

    /// `Some(None)` means the declaration is known not to be a generated model.
    pub fn model_names(&mut self, declaration: &str) -> Option<Option<ModelNames>> {
        let found = self.model_names.get(declaration).cloned();
        self.record(found.is_some());
        found
    }

    pub fn insert_model_names(&mut self, declaration: &str, names: Option<ModelNames>) {
        self.model_names.insert(declaration.to_string(), names);
    }

    /// (hits, misses)
    pub fn stats(&self) -> (usize, usize) {
        (self.hits, self.misses)
    }

    fn record(&mut self, hit: bool) {
        if hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
    }
}
