//! Low-level bindings to libsqlite3.
//!
//! The declarations come from `libsqlite3-sys`; this module narrows them to the
//! handful of entry points the driver calls, plus a few safe helpers.

pub use libsqlite3_sys::{
    // Handles
    sqlite3,
    sqlite3_stmt,
    // Connection management
    sqlite3_busy_timeout,
    sqlite3_changes,
    sqlite3_close,
    sqlite3_open_v2,
    // Error handling
    sqlite3_errcode,
    sqlite3_errmsg,
    sqlite3_errstr,
    sqlite3_extended_errcode,
    // Statement lifecycle
    sqlite3_clear_bindings,
    sqlite3_finalize,
    sqlite3_prepare_v2,
    sqlite3_reset,
    sqlite3_step,
    // Parameter binding
    sqlite3_bind_int,
    sqlite3_bind_null,
    sqlite3_bind_parameter_count,
    sqlite3_bind_parameter_index,
    sqlite3_bind_parameter_name,
    sqlite3_bind_text,
    // Result columns
    sqlite3_column_count,
    sqlite3_column_int,
    sqlite3_column_name,
    sqlite3_column_text,
    sqlite3_column_bytes,
    sqlite3_column_type,
    // Version info
    sqlite3_libversion,
    sqlite3_libversion_number,
    // Destructor used when binding text
    SQLITE_TRANSIENT,
};

pub use libsqlite3_sys::{
    SQLITE_AUTH, SQLITE_BUSY, SQLITE_CANTOPEN, SQLITE_CONSTRAINT, SQLITE_DONE, SQLITE_ERROR,
    SQLITE_LOCKED, SQLITE_MISUSE, SQLITE_NOTFOUND, SQLITE_NULL, SQLITE_OK, SQLITE_OPEN_CREATE,
    SQLITE_OPEN_FULLMUTEX, SQLITE_OPEN_NOMUTEX, SQLITE_OPEN_READONLY, SQLITE_OPEN_READWRITE,
    SQLITE_OPEN_URI, SQLITE_PERM, SQLITE_RANGE, SQLITE_READONLY, SQLITE_ROW,
};

use std::ffi::{CStr, c_char, c_int};

/// Get the SQLite library version as a string.
pub fn version() -> &'static str {
    // SAFETY: sqlite3_libversion returns a static string
    unsafe { static_str(sqlite3_libversion(), "unknown") }
}

/// Get the SQLite library version as a number, e.g. 3045000 for 3.45.0.
pub fn version_number() -> i32 {
    // SAFETY: sqlite3_libversion_number is always safe to call
    unsafe { sqlite3_libversion_number() }
}

/// Convert an SQLite result code to a human-readable string.
pub fn error_string(code: c_int) -> &'static str {
    // SAFETY: sqlite3_errstr returns a static string for every code
    unsafe { static_str(sqlite3_errstr(code), "unknown error") }
}

/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that lives forever.
unsafe fn static_str(ptr: *const c_char, fallback: &'static str) -> &'static str {
    if ptr.is_null() {
        return fallback;
    }
    // SAFETY: guaranteed by the caller
    unsafe { CStr::from_ptr(ptr) }.to_str().unwrap_or(fallback)
}
