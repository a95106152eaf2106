//! Table descriptors.

use crate::error::{Error, SchemaError, SchemaErrorKind};
use crate::field::Column;
use crate::Result;
use std::collections::HashSet;

/// A table description: a name and an ordered list of columns.
///
/// Column order is the order used by `CREATE TABLE`, and therefore the order
/// in which `SELECT *` reports columns. Names are unique within a table; the
/// constructor rejects duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
}

impl Table {
    /// Create a table description.
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Result<Self> {
        let name = name.into();

        if columns.is_empty() {
            return Err(Error::Schema(SchemaError {
                kind: SchemaErrorKind::Empty,
                table: name,
                message: "a table needs at least one column".to_string(),
            }));
        }

        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.name()) {
                return Err(Error::Schema(SchemaError {
                    kind: SchemaErrorKind::DuplicateColumn,
                    message: format!("duplicate column '{}'", column.name()),
                    table: name,
                }));
            }
        }

        Ok(Self { name, columns })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The columns, in declaration order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Find a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Find a column by name, failing with a schema error when absent.
    pub fn require_column(&self, name: &str) -> Result<&Column> {
        self.column(name).ok_or_else(|| {
            Error::Schema(SchemaError {
                kind: SchemaErrorKind::ColumnNotFound,
                table: self.name.clone(),
                message: format!("no column named '{}'", name),
            })
        })
    }

    /// Position of a column in declaration order.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name() == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Names of all columns, in declaration order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::name)
    }
}
