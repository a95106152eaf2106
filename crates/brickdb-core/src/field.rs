//! Column descriptors.

use crate::types::ColumnType;
use serde::{Deserialize, Serialize};

/// A column in a table description.
///
/// Within one [`Table`](crate::Table) a column is identified by its name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Column {
    name: String,
    column_type: ColumnType,
    nullable: bool,
}

impl Column {
    /// Create a column description.
    pub fn new(name: impl Into<String>, column_type: ColumnType, nullable: bool) -> Self {
        Self {
            name: name.into(),
            column_type,
            nullable,
        }
    }

    /// Create a column that rejects NULL.
    pub fn not_null(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self::new(name, column_type, false)
    }

    /// Create a column that accepts NULL.
    pub fn nullable(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self::new(name, column_type, true)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// The column definition fragment used in `CREATE TABLE`.
    ///
    /// Example: `rgb CHAR(6) NOT NULL`
    pub fn to_sql(&self) -> String {
        format!(
            "{} {} {}",
            self.name,
            self.column_type.sql_name(),
            if self.nullable { "NULL" } else { "NOT NULL" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_sql() {
        let rgb = Column::not_null("rgb", ColumnType::Char(6));
        assert_eq!(rgb.to_sql(), "rgb CHAR(6) NOT NULL");

        let image = Column::nullable("image_url", ColumnType::Char(1024));
        assert_eq!(image.to_sql(), "image_url CHAR(1024) NULL");

        let transparent = Column::new("transparent", ColumnType::Bool, false);
        assert_eq!(transparent.to_sql(), "transparent BOOL NOT NULL");
    }

    #[test]
    fn accessors() {
        let col = Column::nullable("image_url", ColumnType::Char(1024));
        assert_eq!(col.name(), "image_url");
        assert_eq!(col.column_type(), ColumnType::Char(1024));
        assert!(col.is_nullable());
    }
}
