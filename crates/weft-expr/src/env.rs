//! Scoped binding environment for render-time evaluation.

use std::collections::BTreeMap;
use weft_types::{Context, Value};

/// Scope chain with push/pop semantics.
///
/// The outermost scope holds the data context's own fields; each open
/// `each` block pushes a scope for its item binding and `$index`. Lookups
/// walk from the innermost scope outward, so iteration bindings shadow
/// identically named context fields.
#[derive(Debug, Clone)]
pub struct Environment {
    scopes: Vec<BTreeMap<String, Value>>,
}

impl Environment {
    /// Create an environment whose root scope is the data context.
    pub fn from_context(ctx: &Context) -> Self {
        let root = ctx
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Self { scopes: vec![root] }
    }

    /// Push a fresh innermost scope.
    pub fn push_scope(&mut self) {
        self.scopes.push(BTreeMap::new());
    }

    /// Pop the innermost scope. The root scope is never popped.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Bind a name in the innermost scope, shadowing outer bindings.
    pub fn define(&mut self, name: &str, value: Value) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), value);
        }
    }

    /// Look up a name, innermost scope first. `None` means unbound —
    /// the evaluator maps that to [`Value::Undefined`], not an error.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> Context {
        let mut ctx = Context::new();
        ctx.insert("name", "outer");
        ctx
    }

    #[test]
    fn test_root_scope_holds_context_fields() {
        let env = Environment::from_context(&ctx());
        assert_eq!(env.get("name"), Some(&Value::String("outer".into())));
        assert_eq!(env.get("missing"), None);
    }

    #[test]
    fn test_inner_scope_shadows_outer() {
        let mut env = Environment::from_context(&ctx());
        env.push_scope();
        env.define("name", Value::String("inner".into()));
        assert_eq!(env.get("name"), Some(&Value::String("inner".into())));
        env.pop_scope();
        assert_eq!(env.get("name"), Some(&Value::String("outer".into())));
    }

    #[test]
    fn test_root_scope_never_popped() {
        let mut env = Environment::from_context(&ctx());
        env.pop_scope();
        env.pop_scope();
        assert_eq!(env.get("name"), Some(&Value::String("outer".into())));
    }
}
