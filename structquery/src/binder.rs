use sea_orm::sea_query::SimpleExpr;

use crate::errors::Result;
use crate::field::Field;
use crate::naming::NamingPolicy;
use crate::registry::OperatorRegistry;
use crate::tag;

/// Resolve the storage column of `field`: an explicit `column` option wins,
/// otherwise the naming policy is applied to the declared name and the
/// optional `table` qualifier.
#[must_use]
pub fn resolve_column(field: &Field, naming: &dyn NamingPolicy) -> String {
    match field.option(tag::COLUMN) {
        Some(column) => column.to_string(),
        None => naming.column_name(field.option(tag::TABLE).unwrap_or_default(), field.name()),
    }
}

/// Bind every field to its operator and collect the produced expressions in
/// field order. Fields whose operator yields nothing are dropped.
///
/// # Errors
///
/// Fails with [`QueryError::BadQueryType`](crate::QueryError::BadQueryType)
/// on the first field whose operator is not registered; no partial list is
/// returned.
pub fn translate(
    fields: Vec<Field>,
    registry: &OperatorRegistry,
    naming: &dyn NamingPolicy,
) -> Result<Vec<SimpleExpr>> {
    let mut exprs = Vec::with_capacity(fields.len());
    for field in fields {
        let operator = registry.lookup(field.operator())?;
        let column = resolve_column(&field, naming);
        let field = field.with_column(column);
        match operator(&field) {
            Some(expr) => {
                tracing::trace!(
                    field = field.canonical_name(),
                    operator = field.operator(),
                    column = field.column_name(),
                    "bound field"
                );
                exprs.push(expr);
            }
            None => {
                tracing::trace!(
                    field = field.canonical_name(),
                    operator = field.operator(),
                    "operator produced no expression"
                );
            }
        }
    }
    Ok(exprs)
}
