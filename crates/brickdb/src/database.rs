//! The LEGO database: one connection and the schema it holds.

use crate::records::{Color, Part};
use crate::schema::LegoSchema;
use crate::statements::{ColorInsertStatement, PartInsertStatement};
use brickdb_core::Result;
use brickdb_sqlite::{SqliteConfig, SqliteConnection};

/// A connection to a LEGO colors/parts database.
#[derive(Debug)]
pub struct LegoDatabase {
    conn: SqliteConnection,
    schema: LegoSchema,
}

impl LegoDatabase {
    /// Open a database with the given configuration.
    pub fn open(config: &SqliteConfig) -> Result<Self> {
        Ok(Self::with_connection(
            SqliteConnection::open(config)?,
            LegoSchema::new()?,
        ))
    }

    /// Open an existing database for reading.
    pub fn open_read_only(path: impl Into<String>) -> Result<Self> {
        Self::open(&SqliteConfig::read_only(path))
    }

    pub fn with_connection(conn: SqliteConnection, schema: LegoSchema) -> Self {
        Self { conn, schema }
    }

    pub fn connection(&self) -> &SqliteConnection {
        &self.conn
    }

    pub fn schema(&self) -> &LegoSchema {
        &self.schema
    }

    pub fn create_colors_table(&self) -> Result<()> {
        self.conn.create_table(&self.schema.colors.table)
    }

    pub fn create_parts_table(&self) -> Result<()> {
        self.conn.create_table(&self.schema.parts.table)
    }

    /// Create every table of the schema.
    pub fn create_tables(&self) -> Result<()> {
        self.create_colors_table()?;
        self.create_parts_table()
    }

    pub fn prepare_color_insert(&self) -> Result<ColorInsertStatement<'_>> {
        ColorInsertStatement::new(&self.conn, &self.schema.colors)
    }

    pub fn prepare_part_insert(&self) -> Result<PartInsertStatement<'_>> {
        PartInsertStatement::new(&self.conn, &self.schema.parts)
    }

    /// Read every color, in no particular order.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn read_all_colors(&self) -> Result<Vec<Color>> {
        let table = &self.schema.colors;
        self.conn
            .read_all_rows(&table.table)?
            .iter()
            .map(|row| Color::from_row(row, table))
            .collect()
    }

    /// Read every part, in no particular order.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn read_all_parts(&self) -> Result<Vec<Part>> {
        let table = &self.schema.parts;
        self.conn
            .read_all_rows(&table.table)?
            .iter()
            .map(|row| Part::from_row(row, table))
            .collect()
    }

    /// Close the underlying connection. Safe to call more than once.
    pub fn close(&mut self) {
        self.conn.close();
    }
}
