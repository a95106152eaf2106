//! brickdb - a typed LEGO colors and parts database on SQLite.
//!
//! The database holds two tables, described once by [`LegoSchema`]:
//!
//! - `colors(name, rgb, transparent)`, read and written as [`Color`]
//! - `parts(name, image_url)`, read and written as [`Part`]
//!
//! # Quick Start
//!
//! ```ignore
//! use brickdb::{Color, DatabaseBuilder, DatabaseInflator, DatabaseReader};
//!
//! let db = DatabaseBuilder::build("lego.sqlite")?;
//! let mut inflator = DatabaseInflator::new(&db)?;
//! inflator.insert_colors(&[Color::new("Dark Turquoise", "05131D", false)])?;
//! drop(inflator);
//! drop(db);
//!
//! let reader = DatabaseReader::open("lego.sqlite")?;
//! for color in reader.read_all_colors()? {
//!     println!("{} #{}", color.name, color.rgb);
//! }
//! ```
//!
//! Imports that download on several threads send their batches to a
//! [`DatabaseWriter`], which owns the connection on a thread of its own.

pub mod builder;
pub mod database;
pub mod inflator;
pub mod page;
pub mod reader;
pub mod records;
pub mod schema;
pub mod statements;
pub mod writer;

pub use builder::DatabaseBuilder;
pub use database::LegoDatabase;
pub use inflator::DatabaseInflator;
pub use page::ResultsList;
pub use reader::DatabaseReader;
pub use records::{Color, Part};
pub use schema::{ColorsTable, LegoSchema, PartsTable};
pub use statements::{ColorInsertStatement, PartInsertStatement};
pub use writer::{DatabaseWriter, WriteBatch, WriteSummary};

// Re-export the layers this crate is built on
pub use brickdb_core::{Column, ColumnType, Error, Result, Row, Table, Value, error};
pub use brickdb_query::{CreateTableQuery, InsertQuery, SelectAllQuery, SqlQuery};
pub use brickdb_sqlite::{SqliteConfig, SqliteConnection, sqlite_version};

/// The types most callers need.
pub mod prelude {
    pub use crate::{
        Color, DatabaseBuilder, DatabaseInflator, DatabaseReader, DatabaseWriter, Error,
        LegoDatabase, LegoSchema, Part, Result, ResultsList, WriteBatch,
    };
}
