//! Scope environment shared by the semantic passes

use std::collections::HashMap;

/// An ordered stack of name bindings with shadowing lookup.
///
/// The checker binds expression types, the evaluator binds folded values.
/// Each pass owns its own instance; nothing is shared across passes.
#[derive(Debug, Clone)]
pub struct ScopeStack<V> {
    scopes: Vec<HashMap<String, V>>,
}

impl<V> ScopeStack<V> {
    pub fn new() -> Self {
        Self { scopes: Vec::new() }
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Pops the innermost scope. Underflow means a pass broke its
    /// push/pop discipline.
    pub fn pop_scope(&mut self) {
        assert!(self.scopes.pop().is_some(), "scope stack underflow");
    }

    /// Binds a name in the innermost scope, shadowing any outer binding.
    pub fn bind(&mut self, name: &str, value: V) {
        let scope = self
            .scopes
            .last_mut()
            .expect("bind called with no active scope");
        scope.insert(name.to_string(), value);
    }

    /// Looks a name up from the innermost scope outward.
    pub fn lookup(&self, name: &str) -> Option<&V> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}

impl<V> Default for ScopeStack<V> {
    fn default() -> Self {
        Self::new()
    }
}
