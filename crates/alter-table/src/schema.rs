//! Column and index descriptions.
//!
//! These types only describe intent. They live for the duration of one
//! operation and are turned into SQL fragments by the adapter.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Logical column types. The adapter decides the concrete SQL type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Variable-length string, sized by `limit`.
    String,
    /// Unbounded text.
    Text,
    /// Integer, width chosen by `limit` in bytes.
    Integer,
    /// 64-bit integer.
    BigInteger,
    /// Floating point.
    Float,
    /// Exact numeric with `precision` and `scale`.
    Decimal,
    /// Date and time.
    DateTime,
    /// Timestamp.
    Timestamp,
    /// Time only.
    Time,
    /// Date only.
    Date,
    /// Binary large object.
    Binary,
    /// Boolean.
    Boolean,
}

/// Default value for a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum DefaultValue {
    /// No default clause.
    #[default]
    None,
    /// NULL default.
    Null,
    /// Boolean default.
    Bool(bool),
    /// Integer default.
    Integer(i64),
    /// Float default.
    Float(f64),
    /// String default.
    String(String),
    /// SQL expression (e.g., "CURRENT_TIMESTAMP").
    Expression(String),
}

impl DefaultValue {
    /// Returns the SQL literal for this default, rendering booleans as `TRUE`/`FALSE`.
    ///
    /// Non-finite floats have no SQL literal; column operations reject them
    /// before anything is executed.
    #[must_use]
    pub fn to_sql(&self) -> Option<String> {
        match self {
            Self::None => None,
            Self::Null => Some("NULL".to_string()),
            Self::Bool(b) => Some(if *b { "TRUE" } else { "FALSE" }.to_string()),
            Self::Integer(i) => Some(i.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::String(s) => Some(format!("'{}'", s.replace('\'', "''"))),
            Self::Expression(expr) => Some(expr.clone()),
        }
    }
}

/// Options accepted by `add_column` and `rename_column`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ColumnOptions {
    /// Length or byte width, depending on the type.
    pub limit: Option<u32>,
    /// Total digits for decimals.
    pub precision: Option<u32>,
    /// Digits after the decimal point.
    pub scale: Option<u32>,
    /// `Some(false)` adds `NOT NULL`.
    pub null: Option<bool>,
    /// Default value clause.
    pub default: DefaultValue,
}

impl ColumnOptions {
    /// Creates empty column options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the limit.
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the precision.
    #[must_use]
    pub fn precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self
    }

    /// Sets the scale.
    #[must_use]
    pub fn scale(mut self, scale: u32) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Marks the column NOT NULL.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.null = Some(false);
        self
    }

    /// Marks the column nullable.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.null = Some(true);
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: DefaultValue) -> Self {
        self.default = value;
        self
    }
}

/// Options accepted by `add_index`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IndexOptions {
    /// Explicit index name, overriding the adapter's naming convention.
    pub name: Option<String>,
    /// Whether to create a UNIQUE index.
    pub unique: bool,
    /// Prefix lengths per column.
    pub lengths: BTreeMap<String, u32>,
}

impl IndexOptions {
    /// Creates empty index options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an explicit index name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Makes this a unique index.
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Indexes only the first `length` characters of `column`.
    #[must_use]
    pub fn length(mut self, column: impl Into<String>, length: u32) -> Self {
        self.lengths.insert(column.into(), length);
        self
    }
}

/// Identifies the index `remove_index` should drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexTarget {
    /// The index named by convention after these columns.
    Columns(Vec<String>),
    /// The index with this exact name.
    Named(String),
}

impl IndexTarget {
    /// Targets the conventional index over `columns`.
    pub fn columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Columns(columns.into_iter().map(Into::into).collect())
    }

    /// Targets an index by name.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }
}
