//! Built-in operators.
//!
//! | token | expression |
//! |---|---|
//! | `""`, `eq`, `in` | `column = value`, `column IN (...)` for sequences |
//! | `neq`, `not_in` | `column <> value`, `column NOT IN (...)` for sequences |
//! | `like`, `llike`, `rlike` | `column LIKE '%value%'`, `'%value'`, `'value%'` |
//! | `gt`, `gte`, `lt`, `lte` | `column > value` and friends |
//! | `json_extract_eq` | `JSON_EXTRACT(column, 'path') = value`, needs `path` |
//! | `json_extract_like` | `JSON_EXTRACT(column, 'path') LIKE '%value%'`, needs `path` |
//! | `my_json_contains` | `JSON_CONTAINS(column, value[, 'path'])` |
//! | `unsaferaw` | the `sql` option verbatim, value bound to each `?` |
//!
//! The raw-SQL functions use `?` placeholders, which the MySQL and SQLite
//! query builders substitute.
//!
//! `unsaferaw` is not part of [`register_builtins`]. Its `sql` option is
//! spliced into the statement unchecked, so only enable it for tags fixed at
//! compile time.

use sea_orm::sea_query::{Expr, SimpleExpr};

use crate::field::Field;
use crate::registry::OperatorRegistry;
use crate::tag;
use crate::value::FieldValue;

pub const EMPTY: &str = "";
pub const EQ: &str = "eq";
pub const NEQ: &str = "neq";
pub const LIKE: &str = "like";
pub const LLIKE: &str = "llike";
pub const RLIKE: &str = "rlike";
pub const IN: &str = "in";
pub const NOT_IN: &str = "not_in";
pub const GT: &str = "gt";
pub const GTE: &str = "gte";
pub const LT: &str = "lt";
pub const LTE: &str = "lte";
pub const JSON_EXTRACT_EQ: &str = "json_extract_eq";
pub const JSON_EXTRACT_LIKE: &str = "json_extract_like";
pub const MYSQL_JSON_CONTAINS: &str = "my_json_contains";
pub const UNSAFE_RAW: &str = "unsaferaw";

/// Register every safe built-in operator on `registry`.
pub fn register_builtins(registry: &OperatorRegistry) {
    registry.register(EMPTY, eq);
    registry.register(EQ, eq);
    registry.register(NEQ, neq);
    registry.register(LIKE, like);
    registry.register(LLIKE, llike);
    registry.register(RLIKE, rlike);
    registry.register(IN, eq);
    registry.register(NOT_IN, neq);
    registry.register(GT, gt);
    registry.register(GTE, gte);
    registry.register(LT, lt);
    registry.register(LTE, lte);
    registry.register(JSON_EXTRACT_EQ, json_extract_eq);
    registry.register(JSON_EXTRACT_LIKE, json_extract_like);
    // mysql only
    registry.register(MYSQL_JSON_CONTAINS, json_contains);
}

#[must_use]
pub fn eq(field: &Field) -> Option<SimpleExpr> {
    Some(match field.value() {
        FieldValue::Single(value) => field.column().eq(value.clone()),
        FieldValue::List(values) => field.column().is_in(values.iter().cloned()),
    })
}

#[must_use]
pub fn neq(field: &Field) -> Option<SimpleExpr> {
    Some(match field.value() {
        FieldValue::Single(value) => field.column().ne(value.clone()),
        FieldValue::List(values) => field.column().is_not_in(values.iter().cloned()),
    })
}

#[must_use]
pub fn like(field: &Field) -> Option<SimpleExpr> {
    Some(field.column().like(format!("%{}%", field.value())))
}

#[must_use]
pub fn llike(field: &Field) -> Option<SimpleExpr> {
    Some(field.column().like(format!("%{}", field.value())))
}

#[must_use]
pub fn rlike(field: &Field) -> Option<SimpleExpr> {
    Some(field.column().like(format!("{}%", field.value())))
}

#[must_use]
pub fn gt(field: &Field) -> Option<SimpleExpr> {
    Some(field.column().gt(field.value().to_simple_expr()))
}

#[must_use]
pub fn gte(field: &Field) -> Option<SimpleExpr> {
    Some(field.column().gte(field.value().to_simple_expr()))
}

#[must_use]
pub fn lt(field: &Field) -> Option<SimpleExpr> {
    Some(field.column().lt(field.value().to_simple_expr()))
}

#[must_use]
pub fn lte(field: &Field) -> Option<SimpleExpr> {
    Some(field.column().lte(field.value().to_simple_expr()))
}

#[must_use]
pub fn json_extract_eq(field: &Field) -> Option<SimpleExpr> {
    let path = required_option(field, tag::PATH)?;
    let sql = format!("JSON_EXTRACT({}, '{path}') = ?", field.column_name());
    Some(Expr::cust_with_exprs(sql, [field.value().to_simple_expr()]))
}

#[must_use]
pub fn json_extract_like(field: &Field) -> Option<SimpleExpr> {
    let path = required_option(field, tag::PATH)?;
    let sql = format!("JSON_EXTRACT({}, '{path}') LIKE ?", field.column_name());
    let pattern = SimpleExpr::from(format!("%{}%", field.value()));
    Some(Expr::cust_with_exprs(sql, [pattern]))
}

/// `JSON_CONTAINS(column, value[, 'path'])`; the path is optional.
#[must_use]
pub fn json_contains(field: &Field) -> Option<SimpleExpr> {
    let sql = match field.option(tag::PATH) {
        Some(path) => format!("JSON_CONTAINS({}, ?, '{path}')", field.column_name()),
        None => format!("JSON_CONTAINS({}, ?)", field.column_name()),
    };
    Some(Expr::cust_with_exprs(sql, [field.value().to_simple_expr()]))
}

/// The `sql` option with the field value bound to each of its `?`
/// placeholders. `??` is a literal question mark.
#[must_use]
pub fn unsafe_raw(field: &Field) -> Option<SimpleExpr> {
    let sql = required_option(field, tag::SQL)?;
    let value = field.value().to_simple_expr();
    let values = vec![value; placeholder_count(sql)];
    Some(Expr::cust_with_exprs(sql, values))
}

/// Counts the `?` placeholders outside quoted strings and identifiers.
fn placeholder_count(sql: &str) -> usize {
    let mut count = 0;
    let mut quote = None;
    let mut chars = sql.chars().peekable();
    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(open), c) if c == open => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"' | '`') => quote = Some(c),
            (None, '?') if chars.peek() == Some(&'?') => {
                chars.next();
            }
            (None, '?') => count += 1,
            (None, _) => {}
        }
    }
    count
}

fn required_option<'a>(field: &'a Field, key: &str) -> Option<&'a str> {
    let value = field.option(key);
    if value.is_none() {
        tracing::debug!(
            field = field.canonical_name(),
            operator = field.operator(),
            option = key,
            "missing option, field contributes no expression"
        );
    }
    value
}
