//! Table cloning.
//!
//! `CREATE TABLE <destination> LIKE <source>` copies the column and index
//! structure of a table, not its rows. An alteration on the new table can
//! follow immediately.

use tracing::info;

use crate::adapter::{SchemaAdapter, StatementOutcome};
use crate::builder::{alter_table_with_config, AlterOutcome};
use crate::config::AlterConfig;
use crate::error::{AlterError, Result};
use crate::operations::TableAlteration;

/// Where the table passed to `clone_table` sits in the copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloneOptions {
    /// Destination table; makes the named table the source.
    pub to: Option<String>,
    /// Source table; makes the named table the destination.
    pub from: Option<String>,
    /// Settings for the clone and any follow-on alteration.
    pub config: AlterConfig,
}

impl CloneOptions {
    /// Creates empty clone options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies the named table into `destination`.
    #[must_use]
    pub fn to(mut self, destination: impl Into<String>) -> Self {
        self.to = Some(destination.into());
        self
    }

    /// Creates the named table as a copy of `source`.
    #[must_use]
    pub fn from(mut self, source: impl Into<String>) -> Self {
        self.from = Some(source.into());
        self
    }

    /// Sets the alteration settings.
    #[must_use]
    pub fn config(mut self, config: AlterConfig) -> Self {
        self.config = config;
        self
    }

    /// Resolves `(source, destination)` for the table called `name`.
    ///
    /// `to` takes precedence over `from`. Empty names count as missing.
    fn resolve<'a>(&'a self, name: &'a str) -> Result<(&'a str, &'a str)> {
        let (source, destination) = match (self.to.as_deref(), self.from.as_deref()) {
            (Some(to), _) => (Some(name), Some(to)),
            (None, from) => (from, Some(name)),
        };
        match (source, destination) {
            (Some(source), Some(destination)) if !source.is_empty() && !destination.is_empty() => {
                Ok((source, destination))
            }
            _ => Err(AlterError::MissingCloneTables),
        }
    }
}

/// Result of a clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneOutcome {
    /// Table the structure was copied from.
    pub source: String,
    /// Table that was created.
    pub destination: String,
    /// The `CREATE TABLE ... LIKE` statement.
    pub statement: String,
    /// What the adapter reported. `None` in dry-run mode.
    pub result: Option<StatementOutcome>,
    /// The follow-on alteration, if one was requested.
    pub alteration: Option<AlterOutcome>,
}

/// Creates a copy of a table's structure.
///
/// ```rust,ignore
/// clone_table(&adapter, "users", CloneOptions::new().to("users_archive")).await?;
/// ```
///
/// # Errors
///
/// Returns [`AlterError::MissingCloneTables`] if the source or destination
/// cannot be resolved, and any adapter error unchanged.
pub async fn clone_table<A>(adapter: &A, name: &str, options: CloneOptions) -> Result<CloneOutcome>
where
    A: SchemaAdapter + ?Sized,
{
    let (source, destination) = options.resolve(name)?;

    let statement = format!(
        "CREATE TABLE {} LIKE {}",
        adapter.quote_table_name(destination),
        adapter.quote_table_name(source)
    );

    let result = if options.config.dry_run {
        info!(source = %source, destination = %destination, sql = %statement, "Dry run, clone not executed");
        None
    } else {
        info!(source = %source, destination = %destination, "Cloning table");
        Some(adapter.execute(&statement).await?)
    };

    Ok(CloneOutcome {
        source: source.to_string(),
        destination: destination.to_string(),
        statement,
        result,
        alteration: None,
    })
}

/// Clones a table, then alters the new table with the operations `f` records.
///
/// The clone is issued first. If the alteration then fails, the cloned table
/// is left in place.
///
/// # Errors
///
/// As [`clone_table`], followed by any error of
/// [`alter_table_with_config`](crate::builder::alter_table_with_config) on
/// the destination, including [`AlterError::EmptyAlteration`] if `f`
/// records nothing.
pub async fn clone_table_and_alter<A, F>(
    adapter: &A,
    name: &str,
    options: CloneOptions,
    f: F,
) -> Result<CloneOutcome>
where
    A: SchemaAdapter + ?Sized,
    F: FnOnce(&mut TableAlteration),
{
    let config = options.config.clone();
    let mut outcome = clone_table(adapter, name, options).await?;
    let alteration = alter_table_with_config(adapter, &outcome.destination, f, &config).await?;
    outcome.alteration = Some(alteration);
    Ok(outcome)
}
