//! Batched schema alterations.
//!
//! `alter-table` turns a short sequence of intent-level operations (add,
//! remove or rename a column, add or remove an index) into exactly one
//! `ALTER TABLE` statement, and clones tables with `CREATE TABLE ... LIKE`.
//!
//! - Operations are resolved in call order and joined with `, `
//! - Index operations are guarded against live metadata: names over the
//!   adapter's length limit, indexes that already exist and indexes that do
//!   not exist are skipped with a warning instead of failing the batch
//! - An alteration that ends up empty is an error, and nothing is sent
//! - Dialect details (quoting, type mapping, metadata queries) live behind
//!   the [`SchemaAdapter`](adapter::SchemaAdapter) trait
//!
//! # Example
//!
//! ```rust,ignore
//! use alter_table::prelude::*;
//!
//! let adapter = MySqlAdapter::connect("mysql://root@localhost/app").await?;
//!
//! alter_table(&adapter, "users", |t| {
//!     t.add_column("age", ColumnType::Integer, ColumnOptions::new());
//!     t.rename_column("nick", "handle", ColumnType::String, ColumnOptions::new().limit(50));
//!     t.add_index(["handle"], IndexOptions::new().unique());
//!     t.remove_column(["legacy_flag"]);
//! })
//! .await?;
//!
//! clone_table_and_alter(&adapter, "users", CloneOptions::new().to("users_archive"), |t| {
//!     t.remove_index(IndexTarget::columns(["handle"]));
//! })
//! .await?;
//! ```
//!
//! # Concurrency
//!
//! Each call issues its statements one after another on the caller's task.
//! Nothing here coordinates separate processes altering the same table: if
//! that can happen, serialize the alterations externally, for example with a
//! migration lock.

pub mod adapter;
pub mod builder;
pub mod clone;
pub mod config;
pub mod error;
pub mod operations;
pub mod schema;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::adapter::{MySqlAdapter, SchemaAdapter, StatementOutcome};
    pub use crate::builder::{
        alter_table, alter_table_with, alter_table_with_config, AlterOutcome, SkippedOperation,
    };
    pub use crate::clone::{clone_table, clone_table_and_alter, CloneOptions, CloneOutcome};
    pub use crate::config::{AlterConfig, SkipPolicy};
    pub use crate::error::{AlterError, Result};
    pub use crate::operations::{AlterOperation, TableAlteration};
    pub use crate::schema::{ColumnOptions, ColumnType, DefaultValue, IndexOptions, IndexTarget};
}
