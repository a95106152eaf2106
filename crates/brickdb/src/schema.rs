//! Table descriptions for the LEGO database.

use brickdb_core::{Column, ColumnType, Result, Table};

/// Longest name stored for a color or a part.
pub const NAME_LENGTH: u32 = 255;
/// Hex RGB triple without the leading `#`.
pub const RGB_LENGTH: u32 = 6;
pub const IMAGE_URL_LENGTH: u32 = 1024;

/// `colors(name CHAR(255) NOT NULL, rgb CHAR(6) NOT NULL, transparent BOOL NOT NULL)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorsTable {
    pub table: Table,
    pub name: Column,
    pub rgb: Column,
    pub transparent: Column,
}

impl ColorsTable {
    pub const NAME: &'static str = "colors";

    pub fn new() -> Result<Self> {
        let name = Column::not_null("name", ColumnType::Char(NAME_LENGTH));
        let rgb = Column::not_null("rgb", ColumnType::Char(RGB_LENGTH));
        let transparent = Column::not_null("transparent", ColumnType::Bool);
        let table = Table::new(
            Self::NAME,
            vec![name.clone(), rgb.clone(), transparent.clone()],
        )?;
        Ok(Self {
            table,
            name,
            rgb,
            transparent,
        })
    }
}

/// `parts(name CHAR(255) NOT NULL, image_url CHAR(1024) NULL)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartsTable {
    pub table: Table,
    pub name: Column,
    pub image_url: Column,
}

impl PartsTable {
    pub const NAME: &'static str = "parts";

    pub fn new() -> Result<Self> {
        let name = Column::not_null("name", ColumnType::Char(NAME_LENGTH));
        let image_url = Column::nullable("image_url", ColumnType::Char(IMAGE_URL_LENGTH));
        let table = Table::new(Self::NAME, vec![name.clone(), image_url.clone()])?;
        Ok(Self {
            table,
            name,
            image_url,
        })
    }
}

/// The complete schema: every table the database holds.
///
/// Built once and passed by reference to whatever needs it. Tests may build
/// their own tables instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegoSchema {
    pub colors: ColorsTable,
    pub parts: PartsTable,
}

impl LegoSchema {
    pub fn new() -> Result<Self> {
        Ok(Self {
            colors: ColorsTable::new()?,
            parts: PartsTable::new()?,
        })
    }

    /// Tables in creation order.
    pub fn tables(&self) -> [&Table; 2] {
        [&self.colors.table, &self.parts.table]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brickdb_query::CreateTableQuery;

    #[test]
    fn test_colors_sql() {
        let schema = LegoSchema::new().unwrap();
        assert_eq!(
            CreateTableQuery::new(&schema.colors.table).build(),
            "CREATE TABLE colors (name CHAR(255) NOT NULL, rgb CHAR(6) NOT NULL, transparent BOOL NOT NULL);"
        );
    }

    #[test]
    fn test_parts_sql() {
        let schema = LegoSchema::new().unwrap();
        assert_eq!(
            CreateTableQuery::new(&schema.parts.table).build(),
            "CREATE TABLE parts (name CHAR(255) NOT NULL, image_url CHAR(1024) NULL);"
        );
    }

    #[test]
    fn test_named_columns_belong_to_table() {
        let schema = LegoSchema::new().unwrap();
        assert_eq!(schema.colors.table.column("rgb"), Some(&schema.colors.rgb));
        assert_eq!(
            schema.parts.table.column("image_url"),
            Some(&schema.parts.image_url)
        );
        assert!(schema.parts.image_url.is_nullable());
        assert_eq!(schema.tables().map(Table::name), ["colors", "parts"]);
    }
}
