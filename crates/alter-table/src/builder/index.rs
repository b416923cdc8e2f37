//! Index fragments and their guards.
//!
//! Both operations consult live metadata before producing a fragment. A guard
//! that trips yields a [`SkippedOperation`] instead of an error, which makes
//! repeated adds and removes of the same index no-ops.

use crate::adapter::SchemaAdapter;
use crate::error::Result;
use crate::schema::{IndexOptions, IndexTarget};

use super::SkippedOperation;

/// Outcome of resolving an index operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum IndexResolution {
    Fragment(String),
    Skipped(SkippedOperation),
}

/// `ADD [UNIQUE] INDEX <name> (<columns>)`, unless the name is too long or
/// the index already exists.
pub(crate) async fn add_index<A: SchemaAdapter + ?Sized>(
    adapter: &A,
    table: &str,
    columns: &[String],
    options: &IndexOptions,
) -> Result<IndexResolution> {
    let index_name = match &options.name {
        Some(name) => name.clone(),
        None => adapter.resolve_index_name(table, &IndexTarget::Columns(columns.to_vec())),
    };

    let limit = adapter.max_index_name_length();
    if index_name.chars().count() > limit {
        return Ok(IndexResolution::Skipped(
            SkippedOperation::IndexNameTooLong {
                table: table.to_string(),
                index: index_name,
                limit,
            },
        ));
    }

    if adapter.index_exists(table, &index_name, false).await? {
        return Ok(IndexResolution::Skipped(
            SkippedOperation::IndexAlreadyExists {
                table: table.to_string(),
                index: index_name,
            },
        ));
    }

    let index_type = if options.unique { "UNIQUE " } else { "" };
    let quoted_columns = adapter.format_index_columns(columns, options).join(", ");
    Ok(IndexResolution::Fragment(format!(
        "ADD {index_type}INDEX {} ({quoted_columns})",
        adapter.quote_identifier(&index_name)
    )))
}

/// `DROP INDEX <name>`, unless the index does not exist.
pub(crate) async fn remove_index<A: SchemaAdapter + ?Sized>(
    adapter: &A,
    table: &str,
    target: &IndexTarget,
) -> Result<IndexResolution> {
    let index_name = adapter.resolve_index_name(table, target);

    if !adapter.index_exists(table, &index_name, true).await? {
        return Ok(IndexResolution::Skipped(SkippedOperation::IndexMissing {
            table: table.to_string(),
            index: index_name,
        }));
    }

    Ok(IndexResolution::Fragment(format!(
        "DROP INDEX {}",
        adapter.quote_identifier(&index_name)
    )))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use async_trait::async_trait;

    use super::*;
    use crate::adapter::StatementOutcome;

    struct FixedIndexes(HashSet<&'static str>);

    #[async_trait]
    impl SchemaAdapter for FixedIndexes {
        async fn execute(&self, _sql: &str) -> Result<StatementOutcome> {
            Ok(StatementOutcome::default())
        }

        async fn index_exists(&self, _table: &str, index: &str, _fallback: bool) -> Result<bool> {
            Ok(self.0.contains(index))
        }

        fn max_index_name_length(&self) -> usize {
            24
        }
    }

    fn adapter() -> FixedIndexes {
        FixedIndexes(["index_users_on_email"].into_iter().collect())
    }

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[tokio::test]
    async fn test_add_index_fragment() {
        let resolution = add_index(&adapter(), "users", &cols(&["age"]), &IndexOptions::new())
            .await
            .unwrap();
        assert_eq!(
            resolution,
            IndexResolution::Fragment("ADD INDEX \"index_users_on_age\" (\"age\")".to_string())
        );
    }

    #[tokio::test]
    async fn test_add_unique_index_with_explicit_name() {
        let opts = IndexOptions::new().name("by_login").unique();
        let resolution = add_index(&adapter(), "users", &cols(&["login", "realm"]), &opts)
            .await
            .unwrap();
        assert_eq!(
            resolution,
            IndexResolution::Fragment(
                "ADD UNIQUE INDEX \"by_login\" (\"login\", \"realm\")".to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_add_index_skips_existing() {
        let resolution = add_index(&adapter(), "users", &cols(&["email"]), &IndexOptions::new())
            .await
            .unwrap();
        assert_eq!(
            resolution,
            IndexResolution::Skipped(SkippedOperation::IndexAlreadyExists {
                table: "users".to_string(),
                index: "index_users_on_email".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_add_index_skips_long_names() {
        let resolution = add_index(
            &adapter(),
            "users",
            &cols(&["first_name", "last_name"]),
            &IndexOptions::new(),
        )
        .await
        .unwrap();
        assert!(matches!(
            resolution,
            IndexResolution::Skipped(SkippedOperation::IndexNameTooLong { limit: 24, .. })
        ));
    }

    #[tokio::test]
    async fn test_remove_index() {
        let resolution = remove_index(&adapter(), "users", &IndexTarget::columns(["email"]))
            .await
            .unwrap();
        assert_eq!(
            resolution,
            IndexResolution::Fragment("DROP INDEX \"index_users_on_email\"".to_string())
        );

        let resolution = remove_index(&adapter(), "users", &IndexTarget::named("gone"))
            .await
            .unwrap();
        assert!(matches!(
            resolution,
            IndexResolution::Skipped(SkippedOperation::IndexMissing { .. })
        ));
    }
}
