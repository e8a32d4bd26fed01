//! Schema description consumed by the stats engine.
//!
//! A [`Schema`] is built once, either from [`Schema::sample`] or from the
//! collections payload returned by the query API, and is read-only afterwards.

mod column_type;
mod issues;
mod payload;
mod sample;

use serde::{Deserialize, Serialize};

pub use column_type::ColumnType;
pub use issues::SchemaIssue;
pub use payload::{CollectionsPayload, FieldSpec, SchemaError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default)]
    pub is_foreign: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<String>,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            is_primary: false,
            is_foreign: false,
            references: None,
        }
    }

    pub fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }

    /// Marks the column as a foreign key pointing at `"<Table>.<Column>"`.
    pub fn references(mut self, target: impl Into<String>) -> Self {
        self.is_foreign = true;
        self.references = Some(target.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub row_count: u64,
}

impl Table {
    pub fn new(name: impl Into<String>, row_count: u64) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            row_count,
        }
    }

    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }
}

/// Directed reference: `from` is the referencing side, `to` the referenced one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub from: String,
    pub to: String,
}

impl Relationship {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn source(&self) -> Option<ColumnRef<'_>> {
        ColumnRef::parse(&self.from)
    }

    pub fn target(&self) -> Option<ColumnRef<'_>> {
        ColumnRef::parse(&self.to)
    }
}

/// Borrowed `"<Table>.<Column>"` endpoint split on its first delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRef<'a> {
    pub table: &'a str,
    pub column: &'a str,
}

impl<'a> ColumnRef<'a> {
    pub const DELIMITER: char = '.';

    /// Returns `None` when the endpoint has no delimiter.
    pub fn parse(endpoint: &'a str) -> Option<Self> {
        endpoint
            .split_once(Self::DELIMITER)
            .map(|(table, column)| Self { table, column })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl Schema {
    pub fn new(tables: Vec<Table>, relationships: Vec<Relationship>) -> Self {
        Self {
            tables,
            relationships,
        }
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|table| table.name == name)
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|table| table.name.as_str())
    }

    pub fn column_count(&self) -> usize {
        self.tables.iter().map(|table| table.columns.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
