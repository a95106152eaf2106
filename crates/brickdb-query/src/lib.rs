//! Query builders for brickdb tables.
//!
//! Each builder is a pure function of a [`Table`](brickdb_core::Table)
//! description: it produces SQL text and never touches the engine.
//!
//! ```rust,ignore
//! use brickdb_query::{CreateTableQuery, InsertQuery, SelectAllQuery};
//!
//! let create = CreateTableQuery::new(&table).build();
//! let insert = InsertQuery::new(&table);
//! let select = SelectAllQuery::new(&table).build();
//! ```

pub mod create;
pub mod insert;
pub mod select;

pub use create::CreateTableQuery;
pub use insert::{InsertQuery, QueryParameter};
pub use select::SelectAllQuery;

/// A query that renders to SQL text.
pub trait SqlQuery {
    /// The SQL code that implements the query.
    fn to_sql(&self) -> String;
}
