//! MySQL adapter.
//!
//! `CHANGE COLUMN` and `CREATE TABLE ... LIKE` are MySQL syntax, so this is
//! the adapter alterations are normally run through.

use async_trait::async_trait;
use sqlx::mysql::MySqlPool;
use tracing::debug;

use crate::error::{AlterError, Result};
use crate::schema::{ColumnType, DefaultValue};

use super::{decimal_bounds, SchemaAdapter, StatementOutcome, DEFAULT_MAX_INDEX_NAME_LENGTH};

const INDEX_EXISTS_SQL: &str = "SELECT COUNT(*) FROM information_schema.statistics \
     WHERE table_schema = COALESCE(?, DATABASE()) AND table_name = ? AND index_name = ?";

/// Adapter backed by an sqlx MySQL pool.
#[derive(Debug, Clone)]
pub struct MySqlAdapter {
    pool: MySqlPool,
    max_index_name_length: usize,
}

impl MySqlAdapter {
    /// Creates an adapter over an existing pool.
    #[must_use]
    pub fn new(pool: MySqlPool) -> Self {
        Self {
            pool,
            max_index_name_length: DEFAULT_MAX_INDEX_NAME_LENGTH,
        }
    }

    /// Connects to `url` and creates an adapter over the new pool.
    ///
    /// # Errors
    ///
    /// Returns [`AlterError::Database`] if the pool cannot connect.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = MySqlPool::connect(url).await?;
        Ok(Self::new(pool))
    }

    /// Overrides the index name length limit.
    #[must_use]
    pub fn with_max_index_name_length(mut self, length: usize) -> Self {
        self.max_index_name_length = length;
        self
    }

    /// Returns the underlying pool.
    #[must_use]
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

#[async_trait]
impl SchemaAdapter for MySqlAdapter {
    async fn execute(&self, sql: &str) -> Result<StatementOutcome> {
        debug!(sql = %sql, "Executing SQL");
        let result = sqlx::query(sql).execute(&self.pool).await?;
        Ok(StatementOutcome {
            rows_affected: result.rows_affected(),
        })
    }

    async fn index_exists(&self, table: &str, index_name: &str, _fallback: bool) -> Result<bool> {
        let (schema, table) = match table.split_once('.') {
            Some((schema, table)) => (Some(schema), table),
            None => (None, table),
        };
        let count: i64 = sqlx::query_scalar(INDEX_EXISTS_SQL)
            .bind(schema)
            .bind(table)
            .bind(index_name)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    fn quote_identifier(&self, name: &str) -> String {
        format!("`{}`", name.replace('`', "``"))
    }

    fn type_to_sql(
        &self,
        column_type: ColumnType,
        limit: Option<u32>,
        precision: Option<u32>,
        scale: Option<u32>,
    ) -> Result<String> {
        let sql = match column_type {
            ColumnType::String => format!("varchar({})", limit.unwrap_or(255)),
            ColumnType::Text => "text".to_string(),
            ColumnType::Integer => match limit {
                Some(1) => "tinyint".to_string(),
                Some(2) => "smallint".to_string(),
                Some(3) => "mediumint".to_string(),
                None | Some(4 | 11) => "int(11)".to_string(),
                Some(5..=8) => "bigint".to_string(),
                Some(other) => {
                    return Err(AlterError::InvalidColumnType {
                        column_type,
                        message: format!("no integer type has byte size {other}"),
                    });
                }
            },
            ColumnType::BigInteger => "bigint".to_string(),
            ColumnType::Float => "float".to_string(),
            ColumnType::Decimal => match decimal_bounds(precision, scale)? {
                (None, _) => "decimal".to_string(),
                (Some(p), None) => format!("decimal({p})"),
                (Some(p), Some(s)) => format!("decimal({p},{s})"),
            },
            ColumnType::DateTime | ColumnType::Timestamp => "datetime".to_string(),
            ColumnType::Time => "time".to_string(),
            ColumnType::Date => "date".to_string(),
            ColumnType::Binary => "blob".to_string(),
            ColumnType::Boolean => "tinyint(1)".to_string(),
        };
        Ok(sql)
    }

    fn quote_default(&self, value: &DefaultValue) -> Option<String> {
        match value {
            DefaultValue::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
            other => other.to_sql(),
        }
    }

    fn max_index_name_length(&self) -> usize {
        self.max_index_name_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnOptions, IndexOptions};

    fn adapter() -> MySqlAdapter {
        let pool = MySqlPool::connect_lazy("mysql://root@localhost/app").unwrap();
        MySqlAdapter::new(pool)
    }

    #[tokio::test]
    async fn test_backtick_quoting() {
        let a = adapter();
        assert_eq!(a.quote_identifier("users"), "`users`");
        assert_eq!(a.quote_identifier("odd`name"), "`odd``name`");
        assert_eq!(a.quote_table_name("app.users"), "`app`.`users`");
    }

    #[tokio::test]
    async fn test_integer_limits() {
        let a = adapter();
        let int = |limit| a.type_to_sql(ColumnType::Integer, limit, None, None);
        assert_eq!(int(Some(1)).unwrap(), "tinyint");
        assert_eq!(int(Some(3)).unwrap(), "mediumint");
        assert_eq!(int(None).unwrap(), "int(11)");
        assert_eq!(int(Some(11)).unwrap(), "int(11)");
        assert_eq!(int(Some(8)).unwrap(), "bigint");
        assert!(int(Some(9)).is_err());
    }

    #[tokio::test]
    async fn test_native_types() {
        let a = adapter();
        assert_eq!(
            a.type_to_sql(ColumnType::String, Some(50), None, None)
                .unwrap(),
            "varchar(50)"
        );
        assert_eq!(
            a.type_to_sql(ColumnType::Decimal, None, Some(8), Some(3))
                .unwrap(),
            "decimal(8,3)"
        );
        assert_eq!(
            a.type_to_sql(ColumnType::Boolean, None, None, None)
                .unwrap(),
            "tinyint(1)"
        );
        assert_eq!(
            a.type_to_sql(ColumnType::Timestamp, None, None, None)
                .unwrap(),
            "datetime"
        );
    }

    #[tokio::test]
    async fn test_boolean_default_is_numeric() {
        let a = adapter();
        let opts = ColumnOptions::new()
            .not_null()
            .default_value(DefaultValue::Bool(true));
        assert_eq!(
            a.apply_column_options("ADD COLUMN `active` tinyint(1)".to_string(), &opts),
            "ADD COLUMN `active` tinyint(1) DEFAULT 1 NOT NULL"
        );
    }

    #[tokio::test]
    async fn test_index_columns_and_limit() {
        let a = adapter().with_max_index_name_length(30);
        assert_eq!(a.max_index_name_length(), 30);
        assert_eq!(
            a.format_index_columns(
                &["email".to_string()],
                &IndexOptions::new().length("email", 12)
            ),
            vec!["`email`(12)".to_string()]
        );
    }
}
