//! Database adapters.
//!
//! An adapter knows the dialect-specific parts of an alteration: identifier
//! quoting, type mapping, index naming and the metadata queries the index
//! guards rely on. The provided methods implement ANSI-flavoured defaults;
//! dialects override what differs.

mod mysql;

pub use mysql::MySqlAdapter;

use async_trait::async_trait;

use crate::error::{AlterError, Result};
use crate::schema::{ColumnOptions, ColumnType, DefaultValue, IndexOptions, IndexTarget};

/// Default maximum length of an index identifier.
pub const DEFAULT_MAX_INDEX_NAME_LENGTH: usize = 64;

/// Result of a statement sent through an adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatementOutcome {
    /// Rows reported as affected by the database.
    pub rows_affected: u64,
}

/// Capabilities an alteration needs from the database.
#[async_trait]
pub trait SchemaAdapter: Send + Sync {
    /// Executes one statement.
    async fn execute(&self, sql: &str) -> Result<StatementOutcome>;

    /// Checks whether `index_name` exists on `table`.
    ///
    /// `fallback` is returned by adapters that cannot introspect indexes:
    /// `add_index` passes `false` and `remove_index` passes `true`.
    async fn index_exists(&self, table: &str, index_name: &str, fallback: bool) -> Result<bool>;

    /// Quotes an identifier (column or index name).
    fn quote_identifier(&self, name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    /// Quotes a table name, which may be schema-qualified.
    fn quote_table_name(&self, name: &str) -> String {
        name.split('.')
            .map(|part| self.quote_identifier(part))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Maps a logical column type to its SQL type.
    fn type_to_sql(
        &self,
        column_type: ColumnType,
        limit: Option<u32>,
        precision: Option<u32>,
        scale: Option<u32>,
    ) -> Result<String> {
        let sql = match column_type {
            ColumnType::String => format!("VARCHAR({})", limit.unwrap_or(255)),
            ColumnType::Text => "TEXT".to_string(),
            ColumnType::Integer => match limit {
                Some(1 | 2) => "SMALLINT".to_string(),
                None | Some(3 | 4) => "INTEGER".to_string(),
                Some(5..=8) => "BIGINT".to_string(),
                Some(other) => {
                    return Err(AlterError::InvalidColumnType {
                        column_type,
                        message: format!("no integer type has byte size {other}"),
                    });
                }
            },
            ColumnType::BigInteger => "BIGINT".to_string(),
            ColumnType::Float => "FLOAT".to_string(),
            ColumnType::Decimal => match decimal_bounds(precision, scale)? {
                (None, _) => "DECIMAL".to_string(),
                (Some(p), None) => format!("DECIMAL({p})"),
                (Some(p), Some(s)) => format!("DECIMAL({p}, {s})"),
            },
            ColumnType::DateTime | ColumnType::Timestamp => "TIMESTAMP".to_string(),
            ColumnType::Time => "TIME".to_string(),
            ColumnType::Date => "DATE".to_string(),
            ColumnType::Binary => "BLOB".to_string(),
            ColumnType::Boolean => "BOOLEAN".to_string(),
        };
        Ok(sql)
    }

    /// Renders a default value as an SQL literal.
    fn quote_default(&self, value: &DefaultValue) -> Option<String> {
        value.to_sql()
    }

    /// Appends default and null-constraint clauses to a column fragment.
    fn apply_column_options(&self, mut fragment: String, options: &ColumnOptions) -> String {
        if let Some(default) = self.quote_default(&options.default) {
            fragment.push_str(" DEFAULT ");
            fragment.push_str(&default);
        }
        if options.null == Some(false) {
            fragment.push_str(" NOT NULL");
        }
        fragment
    }

    /// Resolves the name of the index `target` refers to on `table`.
    fn resolve_index_name(&self, table: &str, target: &IndexTarget) -> String {
        match target {
            IndexTarget::Named(name) => name.clone(),
            IndexTarget::Columns(columns) => {
                format!("index_{}_on_{}", table, columns.join("_and_"))
            }
        }
    }

    /// Quotes the indexed columns, applying prefix lengths.
    fn format_index_columns(&self, columns: &[String], options: &IndexOptions) -> Vec<String> {
        columns
            .iter()
            .map(|column| {
                let quoted = self.quote_identifier(column);
                match options.lengths.get(column) {
                    Some(length) => format!("{quoted}({length})"),
                    None => quoted,
                }
            })
            .collect()
    }

    /// Longest index name the database accepts, in characters.
    fn max_index_name_length(&self) -> usize {
        DEFAULT_MAX_INDEX_NAME_LENGTH
    }
}

/// Validates decimal precision and scale. A scale needs a precision.
pub(crate) fn decimal_bounds(
    precision: Option<u32>,
    scale: Option<u32>,
) -> Result<(Option<u32>, Option<u32>)> {
    if precision.is_none() && scale.is_some() {
        return Err(AlterError::InvalidColumnType {
            column_type: ColumnType::Decimal,
            message: "precision cannot be empty if scale is specified".to_string(),
        });
    }
    Ok((precision, scale))
}
