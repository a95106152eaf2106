//! SQLite driver for brickdb.
//!
//! This crate wraps the native SQLite library (linked through
//! `libsqlite3-sys`) behind two owning handles:
//!
//! - [`SqliteConnection`] owns a database handle and closes it exactly once
//! - [`Statement`] owns a compiled statement and borrows its connection, so it
//!   can never outlive it
//!
//! The typed wrappers [`CreateTableStatement`], [`InsertStatement`] and
//! [`SelectStatement`] compile the queries built by `brickdb-query` for a
//! [`Table`](brickdb_core::Table) description.
//!
//! # Example
//!
//! ```rust,ignore
//! use brickdb_sqlite::SqliteConnection;
//!
//! let conn = SqliteConnection::open_file("lego.sqlite")?;
//! conn.create_table(&table)?;
//!
//! let mut insert = conn.prepare_insert(&table)?;
//! insert.insert([(&name, Value::from("Black"))])?;
//!
//! let rows = conn.read_all_rows(&table)?;
//! ```
//!
//! # Thread Safety
//!
//! Connections are neither `Send` nor `Sync`. Open one connection per thread.

// FFI bindings require unsafe code - this is expected for database drivers
#![allow(unsafe_code)]

pub mod connection;
pub mod ffi;
pub mod statement;
pub mod types;

pub use connection::{OpenFlags, SqliteConfig, SqliteConnection};
pub use statement::{
    CreateTableStatement, InsertStatement, SelectStatement, Statement, StatementState,
};

/// Get the SQLite library version.
pub fn sqlite_version() -> &'static str {
    ffi::version()
}

/// Get the SQLite library version as a number.
pub fn sqlite_version_number() -> i32 {
    ffi::version_number()
}
