//! Core types for brickdb.
//!
//! This crate provides the pure, engine-independent building blocks:
//!
//! - [`ColumnType`], [`Column`] and [`Table`] describe a schema
//! - [`Value`] is the closed set of values that can be bound and read
//! - [`Row`] is a decoded result row keyed by column
//! - [`Error`] is the single error type shared by every crate

pub mod error;
pub mod field;
pub mod row;
pub mod table;
pub mod types;
pub mod value;

pub use error::{Error, Result};
pub use field::Column;
pub use row::{ColumnInfo, FromValue, Row};
pub use table::Table;
pub use types::ColumnType;
pub use value::Value;
