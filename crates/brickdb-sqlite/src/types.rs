//! Value encoding and decoding between Rust and SQLite.
//!
//! Bindings mirror the reads:
//!
//! | Value | bound as | read back by |
//! |-------|----------|--------------|
//! | `Value::Text` | TEXT | [`read_text`] |
//! | `Value::Bool` | INTEGER 0/1 | [`read_bool`] (0 is false, anything else true) |
//! | `Value::Null` | NULL | either reader, as `None` |
//!
//! Text that is not valid UTF-8 is an error on read.

use crate::ffi;
use brickdb_core::Value;
use std::ffi::{CStr, c_int};
use std::str::Utf8Error;

/// Bind a value to a prepared statement parameter.
///
/// # Safety
/// - `stmt` must be a valid, non-null prepared statement handle
/// - `index` must be a valid 1-based parameter index
pub unsafe fn bind_value(stmt: *mut ffi::sqlite3_stmt, index: c_int, value: &Value) -> c_int {
    // SAFETY: guaranteed by the caller; text is copied by SQLite (TRANSIENT)
    unsafe {
        match value {
            Value::Null => ffi::sqlite3_bind_null(stmt, index),

            Value::Bool(b) => ffi::sqlite3_bind_int(stmt, index, c_int::from(*b)),

            Value::Text(s) => {
                let Ok(len) = c_int::try_from(s.len()) else {
                    return ffi::SQLITE_RANGE;
                };
                ffi::sqlite3_bind_text(
                    stmt,
                    index,
                    s.as_ptr().cast(),
                    len,
                    ffi::SQLITE_TRANSIENT(),
                )
            }
        }
    }
}

/// Read a boolean column. `None` means the column holds NULL.
///
/// # Safety
/// - `stmt` must be a valid prepared statement that has just returned SQLITE_ROW
/// - `index` must be a valid 0-based column index
pub unsafe fn read_bool(stmt: *mut ffi::sqlite3_stmt, index: c_int) -> Option<bool> {
    // SAFETY: guaranteed by the caller
    unsafe {
        if ffi::sqlite3_column_type(stmt, index) == ffi::SQLITE_NULL {
            None
        } else {
            Some(ffi::sqlite3_column_int(stmt, index) != 0)
        }
    }
}

/// Read a text column. `Ok(None)` means the column holds NULL; bytes that are
/// not valid UTF-8 are reported, never replaced.
///
/// # Safety
/// - `stmt` must be a valid prepared statement that has just returned SQLITE_ROW
/// - `index` must be a valid 0-based column index
pub unsafe fn read_text(
    stmt: *mut ffi::sqlite3_stmt,
    index: c_int,
) -> Result<Option<String>, Utf8Error> {
    // SAFETY: guaranteed by the caller. The text pointer stays valid until the
    // next step/reset/finalize; we copy it out before returning.
    unsafe {
        let ptr = ffi::sqlite3_column_text(stmt, index);
        if ptr.is_null() {
            return Ok(None);
        }
        let len = ffi::sqlite3_column_bytes(stmt, index);
        let slice = std::slice::from_raw_parts(ptr, usize::try_from(len).unwrap_or(0));
        std::str::from_utf8(slice).map(|s| Some(s.to_owned()))
    }
}

/// Get the name of a result column.
///
/// # Safety
/// - `stmt` must be a valid prepared statement
/// - `index` must be a valid 0-based column index
pub unsafe fn column_name(stmt: *mut ffi::sqlite3_stmt, index: c_int) -> Option<String> {
    // SAFETY: guaranteed by the caller
    unsafe {
        let ptr = ffi::sqlite3_column_name(stmt, index);
        if ptr.is_null() {
            None
        } else {
            Some(CStr::from_ptr(ptr).to_string_lossy().into_owned())
        }
    }
}

/// Get the name of a parameter, e.g. `:rgb`. Indexes are 1-based.
///
/// # Safety
/// - `stmt` must be a valid prepared statement
pub unsafe fn parameter_name(stmt: *mut ffi::sqlite3_stmt, index: c_int) -> Option<String> {
    // SAFETY: guaranteed by the caller
    unsafe {
        let ptr = ffi::sqlite3_bind_parameter_name(stmt, index);
        if ptr.is_null() {
            None
        } else {
            Some(CStr::from_ptr(ptr).to_string_lossy().into_owned())
        }
    }
}
