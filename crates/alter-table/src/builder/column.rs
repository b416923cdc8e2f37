//! Column fragments.

use crate::adapter::SchemaAdapter;
use crate::error::{AlterError, Result};
use crate::schema::{ColumnOptions, ColumnType, DefaultValue};

/// `ADD COLUMN <name> <type> [options]`
pub(crate) fn add_column<A: SchemaAdapter + ?Sized>(
    adapter: &A,
    name: &str,
    column_type: ColumnType,
    options: &ColumnOptions,
) -> Result<String> {
    check_default(column_type, options)?;
    let sql = format!(
        "ADD COLUMN {} {}",
        adapter.quote_identifier(name),
        column_sql_type(adapter, column_type, options)?
    );
    Ok(adapter.apply_column_options(sql, options))
}

/// One `DROP COLUMN <name>` per column.
pub(crate) fn remove_column<A: SchemaAdapter + ?Sized>(adapter: &A, names: &[String]) -> Vec<String> {
    names
        .iter()
        .map(|name| format!("DROP COLUMN {}", adapter.quote_identifier(name)))
        .collect()
}

/// `CHANGE COLUMN <from> <to> <type> [options]`
///
/// `CHANGE COLUMN` redefines the whole column, so the type is always required.
pub(crate) fn rename_column<A: SchemaAdapter + ?Sized>(
    adapter: &A,
    from: &str,
    to: &str,
    column_type: ColumnType,
    options: &ColumnOptions,
) -> Result<String> {
    check_default(column_type, options)?;
    let sql = format!(
        "CHANGE COLUMN {} {} {}",
        adapter.quote_identifier(from),
        adapter.quote_identifier(to),
        column_sql_type(adapter, column_type, options)?
    );
    Ok(adapter.apply_column_options(sql, options))
}

/// Rejects defaults that have no SQL literal.
fn check_default(column_type: ColumnType, options: &ColumnOptions) -> Result<()> {
    match options.default {
        DefaultValue::Float(value) if !value.is_finite() => Err(AlterError::InvalidColumnType {
            column_type,
            message: format!("default {value} is not a finite number"),
        }),
        _ => Ok(()),
    }
}

fn column_sql_type<A: SchemaAdapter + ?Sized>(
    adapter: &A,
    column_type: ColumnType,
    options: &ColumnOptions,
) -> Result<String> {
    adapter.type_to_sql(column_type, options.limit, options.precision, options.scale)
}
