//! Error types for table alterations.

use crate::builder::SkippedOperation;
use crate::schema::ColumnType;

/// Errors that can occur while building or issuing an alteration.
#[derive(Debug, thiserror::Error)]
pub enum AlterError {
    /// The alteration has no fragments left to send.
    #[error("No table alterations specified for '{table}'")]
    EmptyAlteration {
        /// Table the alteration targeted.
        table: String,
    },

    /// A clone was requested without both a source and a destination.
    #[error("Specify source & destination table names")]
    MissingCloneTables,

    /// The adapter could not map a column type with the given options.
    #[error("Invalid {column_type:?} column: {message}")]
    InvalidColumnType {
        /// Logical type being mapped.
        column_type: ColumnType,
        /// Why the mapping failed.
        message: String,
    },

    /// A guard skipped an operation while `SkipPolicy::Abort` was in effect.
    #[error("Alteration aborted: {0}")]
    Skipped(SkippedOperation),

    /// Database error raised by an sqlx-backed adapter.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Error raised by any other adapter.
    #[error("Adapter error: {0}")]
    Adapter(String),
}

/// Result type for alteration operations.
pub type Result<T> = std::result::Result<T, AlterError>;
