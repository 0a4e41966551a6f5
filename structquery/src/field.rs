use sea_orm::sea_query::{Alias, Expr};
use std::sync::Arc;

use crate::tag::TagOptions;
use crate::value::FieldValue;

/// Schema-level description of one leaf field, computed once per struct type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMeta {
    /// Declared field name.
    pub name: &'static str,
    /// Dotted path through embedding fields, e.g. `paging.page`.
    pub canonical_name: String,
    /// Declared with `#[sq(flatten)]`.
    pub anonymous: bool,
    pub tag: &'static str,
    pub operator: String,
    pub options: TagOptions,
    pub(crate) path: Vec<usize>,
}

impl FieldMeta {
    /// Field indices leading from the root struct to this field.
    #[must_use]
    pub fn path(&self) -> &[usize] {
        &self.path
    }
}

/// A leaf field bound to its value for a single translation.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    meta: Arc<FieldMeta>,
    column_name: Option<String>,
    value: FieldValue,
}

impl Field {
    #[must_use]
    pub fn new(meta: Arc<FieldMeta>, value: FieldValue) -> Self {
        Self {
            meta,
            column_name: None,
            value,
        }
    }

    #[must_use]
    pub fn with_column(mut self, column_name: impl Into<String>) -> Self {
        self.column_name = Some(column_name.into());
        self
    }

    #[must_use]
    pub fn meta(&self) -> &FieldMeta {
        &self.meta
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.meta.name
    }

    #[must_use]
    pub fn canonical_name(&self) -> &str {
        &self.meta.canonical_name
    }

    #[must_use]
    pub fn operator(&self) -> &str {
        &self.meta.operator
    }

    #[must_use]
    pub fn options(&self) -> &TagOptions {
        &self.meta.options
    }

    /// Non-empty option value.
    #[must_use]
    pub fn option(&self, key: &str) -> Option<&str> {
        self.meta.options.non_empty(key)
    }

    #[must_use]
    pub const fn value(&self) -> &FieldValue {
        &self.value
    }

    /// Resolved storage column, or the declared name before binding.
    #[must_use]
    pub fn column_name(&self) -> &str {
        self.column_name.as_deref().unwrap_or(self.meta.name)
    }

    #[must_use]
    pub const fn is_bound(&self) -> bool {
        self.column_name.is_some()
    }

    /// Column expression; `table.column` becomes a qualified column.
    #[must_use]
    pub fn column(&self) -> Expr {
        match self.column_name().rsplit_once('.') {
            Some((table, column)) if !table.is_empty() && !column.is_empty() => {
                Expr::col((Alias::new(table), Alias::new(column)))
            }
            _ => Expr::col(Alias::new(self.column_name())),
        }
    }
}
