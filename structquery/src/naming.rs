use heck::ToSnakeCase;

/// Maps a field name, optionally qualified by a table, to a storage column.
pub trait NamingPolicy: Send + Sync {
    fn column_name(&self, table: &str, field: &str) -> String;
}

impl<F> NamingPolicy for F
where
    F: Fn(&str, &str) -> String + Send + Sync,
{
    fn column_name(&self, table: &str, field: &str) -> String {
        self(table, field)
    }
}

/// Default policy: `CreatedAt` and `created_at` both become `created_at`; a
/// non-empty table yields `table.created_at`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnakeCase;

impl NamingPolicy for SnakeCase {
    fn column_name(&self, table: &str, field: &str) -> String {
        let column = field.to_snake_case();
        if table.is_empty() {
            column
        } else {
            format!("{table}.{column}")
        }
    }
}

/// Uses the field name verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct Verbatim;

impl NamingPolicy for Verbatim {
    fn column_name(&self, table: &str, field: &str) -> String {
        if table.is_empty() {
            field.to_string()
        } else {
            format!("{table}.{field}")
        }
    }
}
