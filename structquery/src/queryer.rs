//! # Query Facade
//!
//! [`Queryer`] owns the schema cache, the operator registry and the naming
//! policy, and drives reflect → translate → combine:
//!
//! ```rust,ignore
//! use sea_orm::EntityTrait;
//! use structquery::{Queryer, QueryStruct};
//!
//! #[derive(Default, QueryStruct)]
//! struct UserQuery {
//!     #[sq("like")]
//!     name: String,
//!     #[sq("eq")]
//!     email: String,
//! }
//!
//! let queryer = Queryer::new();
//! let query = UserQuery { name: "hello".into(), ..Default::default() };
//!
//! // "name" LIKE '%hello%'
//! let condition = queryer.and(&query)?;
//!
//! // or attach it to a sea-orm select directly
//! let users = queryer.filter(user::Entity::find(), &query)?.all(&db).await?;
//! ```
//!
//! A struct where every field is zero yields [`Condition::all()`] from both
//! [`Queryer::and`] and [`Queryer::or`]: no filter at all, never "match
//! nothing".

use sea_orm::sea_query::SimpleExpr;
use sea_orm::{Condition, QueryFilter};
use std::fmt;
use std::sync::Arc;

use crate::binder;
use crate::builtin;
use crate::errors::{QueryError, Result};
use crate::field::Field;
use crate::naming::{NamingPolicy, SnakeCase};
use crate::reflect::{self, AsQuery, SchemaCache, StructInfo};
use crate::registry::OperatorRegistry;

/// Translates query structs into sea-query conditions.
///
/// A `Queryer` is `Send + Sync`; share one behind an `Arc` or a `static`
/// and register custom operators during setup.
pub struct Queryer {
    cache: SchemaCache,
    registry: OperatorRegistry,
    naming: Arc<dyn NamingPolicy>,
}

impl Queryer {
    /// Snake-case naming and the safe built-in operators.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    #[must_use]
    pub fn builder() -> QueryerBuilder {
        QueryerBuilder::default()
    }

    /// Register `f` for `token`, replacing any earlier function.
    pub fn register<F>(&self, token: impl Into<String>, f: F)
    where
        F: Fn(&Field) -> Option<SimpleExpr> + Send + Sync + 'static,
    {
        self.registry.register(token, f);
    }

    #[must_use]
    pub const fn registry(&self) -> &OperatorRegistry {
        &self.registry
    }

    #[must_use]
    pub const fn cache(&self) -> &SchemaCache {
        &self.cache
    }

    /// All non-zero fields joined with `AND`.
    ///
    /// # Errors
    ///
    /// [`QueryError::BadQueryValue`] when `query` is not a struct,
    /// [`QueryError::BadQueryType`] when a field's operator is unknown.
    pub fn and<Q: AsQuery + ?Sized>(&self, query: &Q) -> Result<Condition> {
        let exprs = self.to_exprs(query)?;
        Ok(combine(Condition::all(), exprs))
    }

    /// All non-zero fields joined with `OR`.
    ///
    /// # Errors
    ///
    /// Same as [`Queryer::and`].
    pub fn or<Q: AsQuery + ?Sized>(&self, query: &Q) -> Result<Condition> {
        let exprs = self.to_exprs(query)?;
        if exprs.is_empty() {
            return Ok(Condition::all());
        }
        Ok(combine(Condition::any(), exprs))
    }

    /// Attach [`Queryer::and`] of `query` to a sea-orm statement, e.g. a
    /// `Select`, `UpdateMany` or `DeleteMany`.
    ///
    /// # Errors
    ///
    /// Same as [`Queryer::and`]; `statement` is dropped on error.
    pub fn filter<F, Q>(&self, statement: F, query: &Q) -> Result<F>
    where
        F: QueryFilter,
        Q: AsQuery + ?Sized,
    {
        Ok(statement.filter(self.and(query)?))
    }

    /// One expression per non-zero field, in schema order.
    ///
    /// # Errors
    ///
    /// Same as [`Queryer::and`].
    pub fn to_exprs<Q: AsQuery + ?Sized>(&self, query: &Q) -> Result<Vec<SimpleExpr>> {
        let (info, fields) = self.parse(query)?;
        let field_count = fields.len();
        let exprs = binder::translate(fields, &self.registry, self.naming.as_ref())?;
        tracing::debug!(
            struct_type = info.struct_type().name(),
            fields = field_count,
            expressions = exprs.len(),
            "translated query struct"
        );
        Ok(exprs)
    }

    /// The non-zero fields of `query`, unbound.
    ///
    /// # Errors
    ///
    /// Same as [`Queryer::and`].
    pub fn fields<Q: AsQuery + ?Sized>(&self, query: &Q) -> Result<Vec<Field>> {
        self.parse(query).map(|(_, fields)| fields)
    }

    fn parse<Q: AsQuery + ?Sized>(&self, query: &Q) -> Result<(Arc<StructInfo>, Vec<Field>)> {
        let value = query.as_query().ok_or(QueryError::BadQueryValue)?;
        let info = self.cache.get(value.struct_type())?;
        // Unknown operators fail even when their field is zero.
        self.registry.check(info.operators())?;
        let fields = reflect::reflect(&info, value);
        Ok((info, fields))
    }
}

fn combine(condition: Condition, exprs: Vec<SimpleExpr>) -> Condition {
    exprs.into_iter().fold(condition, Condition::add)
}

impl Default for Queryer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Queryer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Queryer")
            .field("cache", &self.cache)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

/// Configuration for a [`Queryer`].
pub struct QueryerBuilder {
    naming: Arc<dyn NamingPolicy>,
    builtins: bool,
    unsafe_raw: bool,
}

impl Default for QueryerBuilder {
    fn default() -> Self {
        Self {
            naming: Arc::new(SnakeCase),
            builtins: true,
            unsafe_raw: false,
        }
    }
}

impl QueryerBuilder {
    /// Column naming policy used when a field has no `column` option.
    #[must_use]
    pub fn naming(mut self, naming: impl NamingPolicy + 'static) -> Self {
        self.naming = Arc::new(naming);
        self
    }

    /// Start from an empty registry instead of the built-in operators.
    #[must_use]
    pub const fn builtins(mut self, enabled: bool) -> Self {
        self.builtins = enabled;
        self
    }

    /// Enable the `unsaferaw` operator, which splices the tag's `sql` option
    /// into the statement unchecked.
    #[must_use]
    pub const fn unsafe_raw(mut self, enabled: bool) -> Self {
        self.unsafe_raw = enabled;
        self
    }

    #[must_use]
    pub fn build(self) -> Queryer {
        let registry = if self.builtins {
            OperatorRegistry::with_builtins()
        } else {
            OperatorRegistry::new()
        };
        if self.unsafe_raw {
            tracing::warn!("structquery: unsafe raw SQL operator enabled");
            registry.register(builtin::UNSAFE_RAW, builtin::unsafe_raw);
        }
        Queryer {
            cache: SchemaCache::new(),
            registry,
            naming: self.naming,
        }
    }
}

impl fmt::Debug for QueryerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryerBuilder")
            .field("builtins", &self.builtins)
            .field("unsafe_raw", &self.unsafe_raw)
            .finish_non_exhaustive()
    }
}
