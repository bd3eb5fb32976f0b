//! Domain snapshot types for schema projects.
//!
//! These types represent the relational-schema model the engine renders:
//! projects own tables, tables own columns and a canvas position. Snapshots
//! are immutable from the engine's point of view; mutations always produce a
//! whole new [`Project`] value through the domain collaborator.
//!
//! # Pipeline Position
//!
//! ```text
//! Project snapshot (these types)
//!     ↓ render
//! Scene (drawable tree)
//!     ↓ layout
//! Positioned nodes
//!     ↓ export / interaction
//! SVG output, pointer gestures
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error conditions raised by domain operations and stale-reference lookups.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("unknown project \"{0}\"")]
    UnknownProject(String),

    #[error("unknown table \"{0}\"")]
    UnknownTable(String),

    #[error("unknown type \"{0}\"")]
    UnknownType(String),

    #[error("table position must be finite, got ({x}, {y})")]
    NonFinitePosition { x: f32, y: f32 },
}

/// SQL dialect tag carried by a project.
///
/// Dialect handling itself is outside the engine; the tag is carried through
/// snapshots untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SqlDialect {
    #[serde(rename = "PostgreSQL")]
    PostgreSql,
    #[serde(rename = "MariaDB")]
    MariaDb,
}

impl std::fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PostgreSql => write!(f, "PostgreSQL"),
            Self::MariaDb => write!(f, "MariaDB"),
        }
    }
}

/// A column data type, referenced by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataType {
    name: String,
}

impl DataType {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the type name
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A single table column with its type and constraint flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    name: String,
    #[serde(rename = "type")]
    data_type: DataType,
    #[serde(default)]
    primary_key: bool,
    #[serde(default)]
    unique: bool,
    #[serde(default)]
    not_null: bool,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            primary_key: false,
            unique: false,
            not_null: false,
        }
    }

    /// Marks this column as the primary key (builder style)
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Marks this column as unique (builder style)
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Marks this column as not-null (builder style)
    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// Returns the column name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the column's data type
    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    /// Returns true when this column is flagged as the primary key
    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    /// Returns true when this column is flagged unique
    pub fn is_unique(&self) -> bool {
        self.unique
    }

    /// Returns true when this column is flagged not-null
    pub fn is_not_null(&self) -> bool {
        self.not_null
    }
}

/// Canvas position of a table's visual representation.
///
/// Coordinates are local to the pannable viewport and must stay finite;
/// the move operation validates this.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableView {
    pub x: f32,
    pub y: f32,
}

impl TableView {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A domain table: named, with ordered columns and a canvas position.
///
/// The name is unique within a project and acts as the table's stable
/// identifier across snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
    view: TableView,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<Column>, view: TableView) -> Self {
        Self {
            name: name.into(),
            columns,
            view,
        }
    }

    /// Returns the table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the ordered columns of this table
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the table's canvas position
    pub fn view(&self) -> TableView {
        self.view
    }

    /// Returns the first column flagged as primary key, if any
    pub fn primary_key_column(&self) -> Option<&Column> {
        self.columns.iter().find(|col| col.is_primary_key())
    }

    /// Returns a copy of this table repositioned to the given coordinates
    pub fn with_view(&self, x: f32, y: f32) -> Self {
        Self {
            view: TableView::new(x, y),
            ..self.clone()
        }
    }
}

/// A schema project: the root snapshot value the engine renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    id: String,
    name: String,
    dialect: SqlDialect,
    tables: Vec<Table>,
}

impl Project {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        dialect: SqlDialect,
        tables: Vec<Table>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            dialect,
            tables,
        }
    }

    /// Returns the project id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the project name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the project's SQL dialect tag
    pub fn dialect(&self) -> SqlDialect {
        self.dialect
    }

    /// Returns the ordered tables of this project
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Looks a table up by exact name match
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name() == name)
    }

    /// Returns a copy of this project with the given tables
    pub fn with_tables(&self, tables: Vec<Table>) -> Self {
        Self {
            tables,
            ..self.clone()
        }
    }
}
