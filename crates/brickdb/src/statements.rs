//! Insert statements typed to one table's row shape.

use crate::records::{Color, Part};
use crate::schema::{ColorsTable, PartsTable};
use brickdb_core::{Result, Value};
use brickdb_sqlite::{InsertStatement, SqliteConnection};

/// Inserts rows into the colors table.
#[derive(Debug)]
pub struct ColorInsertStatement<'db> {
    statement: InsertStatement<'db>,
    table: &'db ColorsTable,
}

impl<'db> ColorInsertStatement<'db> {
    pub fn new(conn: &'db SqliteConnection, table: &'db ColorsTable) -> Result<Self> {
        Ok(Self {
            statement: conn.prepare_insert(&table.table)?,
            table,
        })
    }

    pub fn insert(&mut self, name: &str, rgb: &str, transparent: bool) -> Result<()> {
        self.statement.insert([
            (&self.table.name, Value::from(name)),
            (&self.table.rgb, Value::from(rgb)),
            (&self.table.transparent, Value::from(transparent)),
        ])
    }

    pub fn insert_color(&mut self, color: &Color) -> Result<()> {
        self.insert(&color.name, &color.rgb, color.transparent)
    }
}

/// Inserts rows into the parts table.
#[derive(Debug)]
pub struct PartInsertStatement<'db> {
    statement: InsertStatement<'db>,
    table: &'db PartsTable,
}

impl<'db> PartInsertStatement<'db> {
    pub fn new(conn: &'db SqliteConnection, table: &'db PartsTable) -> Result<Self> {
        Ok(Self {
            statement: conn.prepare_insert(&table.table)?,
            table,
        })
    }

    /// Insert a part. `None` stores NULL, not an empty string.
    pub fn insert(&mut self, name: &str, image_url: Option<&str>) -> Result<()> {
        self.statement.insert([
            (&self.table.name, Value::from(name)),
            (&self.table.image_url, Value::from(image_url)),
        ])
    }

    pub fn insert_part(&mut self, part: &Part) -> Result<()> {
        self.insert(&part.name, part.image_url.as_deref())
    }
}
