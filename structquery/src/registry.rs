use parking_lot::RwLock;
use sea_orm::sea_query::SimpleExpr;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::builtin;
use crate::errors::{QueryError, Result};
use crate::field::Field;

/// Builds the expression for one bound field, or nothing.
pub type OperatorFn = Arc<dyn Fn(&Field) -> Option<SimpleExpr> + Send + Sync>;

/// Operator token → construction function, scoped to one queryer.
///
/// Registration takes `&self`: the table sits behind a read/write lock, so
/// concurrent translations only contend with registrations.
#[derive(Default)]
pub struct OperatorRegistry {
    fns: RwLock<HashMap<String, OperatorFn>>,
}

impl OperatorRegistry {
    /// An empty registry; every token must be registered explicitly.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the safe built-in operators.
    #[must_use]
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        builtin::register_builtins(&registry);
        registry
    }

    /// Register `f` for `token`, replacing any earlier function.
    pub fn register<F>(&self, token: impl Into<String>, f: F)
    where
        F: Fn(&Field) -> Option<SimpleExpr> + Send + Sync + 'static,
    {
        let token = token.into();
        if self.fns.write().insert(token.clone(), Arc::new(f)).is_some() {
            tracing::debug!(operator = %token, "operator re-registered");
        }
    }

    #[must_use]
    pub fn get(&self, token: &str) -> Option<OperatorFn> {
        self.fns.read().get(token).cloned()
    }

    /// Like [`OperatorRegistry::get`], failing for unknown tokens.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::BadQueryType`] carrying `token`.
    pub fn lookup(&self, token: &str) -> Result<OperatorFn> {
        self.get(token)
            .ok_or_else(|| QueryError::BadQueryType(token.to_string()))
    }

    /// Fail on the first token in `tokens` that has no function.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::BadQueryType`] carrying the first unknown token.
    pub fn check<'a>(&self, tokens: impl IntoIterator<Item = &'a str>) -> Result<()> {
        let fns = self.fns.read();
        for token in tokens {
            if !fns.contains_key(token) {
                return Err(QueryError::BadQueryType(token.to_string()));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.fns.read().contains_key(token)
    }

    /// Registered tokens, sorted.
    #[must_use]
    pub fn tokens(&self) -> Vec<String> {
        let mut tokens: Vec<_> = self.fns.read().keys().cloned().collect();
        tokens.sort();
        tokens
    }
}

impl fmt::Debug for OperatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorRegistry")
            .field("tokens", &self.tokens())
            .finish()
    }
}
