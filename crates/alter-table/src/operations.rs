//! Alteration operations.
//!
//! An [`AlterOperation`] is one intent-level change to a table. Operations are
//! plain data so a plan can be built up front, stored, or recorded from a
//! closure through [`TableAlteration`].

use serde::{Deserialize, Serialize};

use crate::schema::{ColumnOptions, ColumnType, IndexOptions, IndexTarget};

/// A single change to apply within an `ALTER TABLE` statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum AlterOperation {
    /// Add a column.
    AddColumn {
        /// Column name.
        name: String,
        /// Logical type.
        column_type: ColumnType,
        /// Size, default and null options.
        #[serde(default)]
        options: ColumnOptions,
    },

    /// Drop one or more columns.
    RemoveColumn {
        /// Columns to drop, in order.
        names: Vec<String>,
    },

    /// Rename a column, redefining its type.
    RenameColumn {
        /// Current column name.
        from: String,
        /// New column name.
        to: String,
        /// Logical type of the redefined column.
        column_type: ColumnType,
        /// Size, default and null options.
        #[serde(default)]
        options: ColumnOptions,
    },

    /// Add an index over one or more columns.
    AddIndex {
        /// Indexed columns, in order.
        columns: Vec<String>,
        /// Name and uniqueness.
        #[serde(default)]
        options: IndexOptions,
    },

    /// Drop an index.
    RemoveIndex {
        /// Which index to drop.
        target: IndexTarget,
    },
}

impl AlterOperation {
    /// Creates an `AddColumn` operation.
    #[must_use]
    pub fn add_column(
        name: impl Into<String>,
        column_type: ColumnType,
        options: ColumnOptions,
    ) -> Self {
        Self::AddColumn {
            name: name.into(),
            column_type,
            options,
        }
    }

    /// Creates a `RemoveColumn` operation.
    pub fn remove_column<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::RemoveColumn {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a `RenameColumn` operation.
    #[must_use]
    pub fn rename_column(
        from: impl Into<String>,
        to: impl Into<String>,
        column_type: ColumnType,
        options: ColumnOptions,
    ) -> Self {
        Self::RenameColumn {
            from: from.into(),
            to: to.into(),
            column_type,
            options,
        }
    }

    /// Creates an `AddIndex` operation.
    pub fn add_index<I, S>(columns: I, options: IndexOptions) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::AddIndex {
            columns: columns.into_iter().map(Into::into).collect(),
            options,
        }
    }

    /// Creates a `RemoveIndex` operation.
    #[must_use]
    pub fn remove_index(target: IndexTarget) -> Self {
        Self::RemoveIndex { target }
    }

    /// Returns a short description for logs.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::AddColumn { name, .. } => format!("add column {name}"),
            Self::RemoveColumn { names } => format!("remove column {}", names.join(", ")),
            Self::RenameColumn { from, to, .. } => format!("rename column {from} to {to}"),
            Self::AddIndex { columns, .. } => format!("add index on {}", columns.join(", ")),
            Self::RemoveIndex {
                target: IndexTarget::Named(name),
            } => format!("remove index {name}"),
            Self::RemoveIndex {
                target: IndexTarget::Columns(columns),
            } => format!("remove index on {}", columns.join(", ")),
        }
    }
}

/// Records the operations of one alteration in call order.
///
/// This is what the closure passed to `alter_table` runs against. Nothing is
/// resolved or sent while recording.
#[derive(Debug, Clone, Default)]
pub struct TableAlteration {
    operations: Vec<AlterOperation>,
}

impl TableAlteration {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a column of `column_type`.
    pub fn add_column(
        &mut self,
        name: impl Into<String>,
        column_type: ColumnType,
        options: ColumnOptions,
    ) -> &mut Self {
        self.push(AlterOperation::add_column(name, column_type, options))
    }

    /// Drops every column in `names`.
    pub fn remove_column<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(AlterOperation::remove_column(names))
    }

    /// Renames `from` to `to`, redefining the column as `column_type`.
    pub fn rename_column(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        column_type: ColumnType,
        options: ColumnOptions,
    ) -> &mut Self {
        self.push(AlterOperation::rename_column(from, to, column_type, options))
    }

    /// Adds an index over `columns`.
    pub fn add_index<I, S>(&mut self, columns: I, options: IndexOptions) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(AlterOperation::add_index(columns, options))
    }

    /// Drops the index `target` refers to.
    pub fn remove_index(&mut self, target: IndexTarget) -> &mut Self {
        self.push(AlterOperation::remove_index(target))
    }

    /// Appends an already built operation.
    pub fn push(&mut self, operation: AlterOperation) -> &mut Self {
        self.operations.push(operation);
        self
    }

    /// Returns the recorded operations.
    #[must_use]
    pub fn operations(&self) -> &[AlterOperation] {
        &self.operations
    }

    /// Consumes the recorder, returning its operations.
    #[must_use]
    pub fn into_operations(self) -> Vec<AlterOperation> {
        self.operations
    }
}
