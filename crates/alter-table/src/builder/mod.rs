//! Alteration orchestration.
//!
//! Operations are resolved into SQL fragments in the order they were given,
//! then committed as a single `ALTER TABLE` statement. Nothing reaches the
//! database until every operation has resolved, so a failing operation aborts
//! the whole batch without side effects.

mod column;
mod index;

use std::fmt;

use tracing::{debug, info, warn};

use crate::adapter::{SchemaAdapter, StatementOutcome};
use crate::config::{AlterConfig, SkipPolicy};
use crate::error::{AlterError, Result};
use crate::operations::{AlterOperation, TableAlteration};

use index::IndexResolution;

/// An index operation a guard turned into a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkippedOperation {
    /// The resolved index name exceeds the adapter's limit.
    IndexNameTooLong {
        /// Target table.
        table: String,
        /// Resolved index name.
        index: String,
        /// Limit reported by the adapter.
        limit: usize,
    },
    /// `add_index` found an index with the same name.
    IndexAlreadyExists {
        /// Target table.
        table: String,
        /// Resolved index name.
        index: String,
    },
    /// `remove_index` found no index with that name.
    IndexMissing {
        /// Target table.
        table: String,
        /// Resolved index name.
        index: String,
    },
}

impl fmt::Display for SkippedOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexNameTooLong {
                table,
                index,
                limit,
            } => write!(
                f,
                "Index name '{index}' on table '{table}' is too long; the limit is {limit} characters"
            ),
            Self::IndexAlreadyExists { table, index } => {
                write!(f, "Index name '{index}' on table '{table}' already exists")
            }
            Self::IndexMissing { table, index } => {
                write!(f, "Index name '{index}' on table '{table}' does not exist")
            }
        }
    }
}

/// Result of a committed alteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlterOutcome {
    /// Altered table.
    pub table: String,
    /// The statement that was sent, or would have been in dry-run mode.
    pub statement: String,
    /// What the adapter reported. `None` in dry-run mode.
    pub result: Option<StatementOutcome>,
    /// Operations the guards skipped.
    pub skipped: Vec<SkippedOperation>,
}

/// Accumulates the fragments of one alteration. Committed exactly once.
struct AlterationBuilder<'a, A: SchemaAdapter + ?Sized> {
    adapter: &'a A,
    table: &'a str,
    config: &'a AlterConfig,
    fragments: Vec<String>,
    skipped: Vec<SkippedOperation>,
}

impl<'a, A: SchemaAdapter + ?Sized> AlterationBuilder<'a, A> {
    fn new(adapter: &'a A, table: &'a str, config: &'a AlterConfig) -> Self {
        Self {
            adapter,
            table,
            config,
            fragments: Vec::new(),
            skipped: Vec::new(),
        }
    }

    async fn apply(&mut self, operation: &AlterOperation) -> Result<()> {
        debug!(table = %self.table, operation = %operation.describe(), "Resolving operation");

        match operation {
            AlterOperation::AddColumn {
                name,
                column_type,
                options,
            } => {
                let fragment = column::add_column(self.adapter, name, *column_type, options)?;
                self.push([fragment]);
            }
            AlterOperation::RemoveColumn { names } => {
                let fragments = column::remove_column(self.adapter, names);
                self.push(fragments);
            }
            AlterOperation::RenameColumn {
                from,
                to,
                column_type,
                options,
            } => {
                let fragment =
                    column::rename_column(self.adapter, from, to, *column_type, options)?;
                self.push([fragment]);
            }
            AlterOperation::AddIndex { columns, options } => {
                let resolution =
                    index::add_index(self.adapter, self.table, columns, options).await?;
                self.resolve(resolution)?;
            }
            AlterOperation::RemoveIndex { target } => {
                let resolution = index::remove_index(self.adapter, self.table, target).await?;
                self.resolve(resolution)?;
            }
        }

        Ok(())
    }

    fn resolve(&mut self, resolution: IndexResolution) -> Result<()> {
        match resolution {
            IndexResolution::Fragment(fragment) => {
                self.push([fragment]);
                Ok(())
            }
            IndexResolution::Skipped(skipped) => self.skip(skipped),
        }
    }

    fn skip(&mut self, skipped: SkippedOperation) -> Result<()> {
        let action = match self.config.on_skip {
            SkipPolicy::Continue => "Skipping",
            SkipPolicy::Abort => "Aborting alteration",
        };
        match &skipped {
            SkippedOperation::IndexNameTooLong {
                table,
                index,
                limit,
            } => warn!(table = %table, index = %index, limit = *limit, "{skipped}. {action}."),
            SkippedOperation::IndexAlreadyExists { table, index }
            | SkippedOperation::IndexMissing { table, index } => {
                warn!(table = %table, index = %index, "{skipped}. {action}.");
            }
        }

        match self.config.on_skip {
            SkipPolicy::Continue => {
                self.skipped.push(skipped);
                Ok(())
            }
            SkipPolicy::Abort => Err(AlterError::Skipped(skipped)),
        }
    }

    fn push(&mut self, fragments: impl IntoIterator<Item = String>) {
        for fragment in fragments {
            debug!(table = %self.table, fragment = %fragment, "Queued alteration");
            self.fragments.push(fragment);
        }
    }

    async fn execute(self) -> Result<AlterOutcome> {
        if self.fragments.is_empty() {
            return Err(AlterError::EmptyAlteration {
                table: self.table.to_string(),
            });
        }

        let statement = format!(
            "ALTER TABLE {} {}",
            self.adapter.quote_table_name(self.table),
            self.fragments.join(", ")
        );

        let result = if self.config.dry_run {
            info!(table = %self.table, sql = %statement, "Dry run, alteration not executed");
            None
        } else {
            info!(
                table = %self.table,
                fragments = self.fragments.len(),
                "Altering table"
            );
            Some(self.adapter.execute(&statement).await?)
        };

        Ok(AlterOutcome {
            table: self.table.to_string(),
            statement,
            result,
            skipped: self.skipped,
        })
    }
}

/// Records the operations `f` performs on `table` and commits them as one
/// `ALTER TABLE` statement.
///
/// ```rust,ignore
/// let outcome = alter_table(&adapter, "users", |t| {
///     t.add_column("age", ColumnType::Integer, ColumnOptions::new());
///     t.remove_column(["legacy_flag"]);
/// })
/// .await?;
/// ```
///
/// # Errors
///
/// Returns [`AlterError::EmptyAlteration`] if no fragment remains after the
/// guards ran, [`AlterError::InvalidColumnType`] if a column type cannot be
/// mapped, and any adapter error unchanged.
pub async fn alter_table<A, F>(adapter: &A, table: &str, f: F) -> Result<AlterOutcome>
where
    A: SchemaAdapter + ?Sized,
    F: FnOnce(&mut TableAlteration),
{
    alter_table_with_config(adapter, table, f, &AlterConfig::default()).await
}

/// Like [`alter_table`], with explicit settings.
///
/// # Errors
///
/// As [`alter_table`], plus [`AlterError::Skipped`] under [`SkipPolicy::Abort`].
pub async fn alter_table_with_config<A, F>(
    adapter: &A,
    table: &str,
    f: F,
    config: &AlterConfig,
) -> Result<AlterOutcome>
where
    A: SchemaAdapter + ?Sized,
    F: FnOnce(&mut TableAlteration),
{
    let mut alteration = TableAlteration::new();
    f(&mut alteration);
    alter_table_with(adapter, table, alteration.operations(), config).await
}

/// Resolves `operations` against `table` in order and commits them as one
/// `ALTER TABLE` statement.
///
/// # Errors
///
/// As [`alter_table_with_config`].
pub async fn alter_table_with<A>(
    adapter: &A,
    table: &str,
    operations: &[AlterOperation],
    config: &AlterConfig,
) -> Result<AlterOutcome>
where
    A: SchemaAdapter + ?Sized,
{
    let mut builder = AlterationBuilder::new(adapter, table, config);
    for operation in operations {
        builder.apply(operation).await?;
    }
    builder.execute().await
}
