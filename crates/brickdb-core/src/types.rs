//! Column type definitions and their SQL rendering.

use serde::{Deserialize, Serialize};

/// The kinds of values a column can store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    /// Text of at most the given number of characters.
    Char(u32),
    /// A boolean, stored by SQLite as INTEGER 0/1.
    Bool,
}

impl ColumnType {
    /// Get the SQL type name for this type, as used in `CREATE TABLE`.
    pub fn sql_name(&self) -> String {
        match self {
            ColumnType::Char(len) => format!("CHAR({})", len),
            ColumnType::Bool => "BOOL".to_string(),
        }
    }

    /// Check if this type is text-based.
    pub const fn is_text(&self) -> bool {
        matches!(self, ColumnType::Char(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sql_names() {
        assert_eq!(ColumnType::Char(255).sql_name(), "CHAR(255)");
        assert_eq!(ColumnType::Char(6).sql_name(), "CHAR(6)");
        assert_eq!(ColumnType::Bool.sql_name(), "BOOL");
    }

    #[test]
    fn text_check() {
        assert!(ColumnType::Char(1).is_text());
        assert!(!ColumnType::Bool.is_text());
    }
}
