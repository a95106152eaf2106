//! SQLite connection implementation.
//!
//! A [`SqliteConnection`] exclusively owns one native database handle. Every
//! [`Statement`] compiled from it borrows the connection, so the borrow checker
//! guarantees that statements are finalized before the handle is closed.

// Allow casts in FFI code where we need to match C types exactly
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::borrow_as_ptr)] // FFI requires raw pointers

use crate::ffi;
use crate::statement::{CreateTableStatement, InsertStatement, SelectStatement, Statement};
use brickdb_core::error::{ConnectionError, ConnectionErrorKind, QueryError, QueryErrorKind};
use brickdb_core::{Error, Result, Row, Table};
use std::ffi::{CStr, CString, c_int};
use std::ptr;

/// Configuration for opening SQLite connections.
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// Path to the database file, or ":memory:" for in-memory database.
    pub path: String,
    /// Open flags (read-only, read-write, create, etc.)
    pub flags: OpenFlags,
    /// Busy timeout in milliseconds. Zero leaves SQLite's default.
    pub busy_timeout_ms: u32,
    /// Require `bind` to supply exactly as many values as the statement has
    /// parameters.
    pub strict_bindings: bool,
}

/// Flags controlling how the database is opened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpenFlags {
    /// Open for reading only.
    pub read_only: bool,
    /// Open for reading and writing.
    pub read_write: bool,
    /// Create the database if it doesn't exist.
    pub create: bool,
    /// Enable URI filename interpretation.
    pub uri: bool,
    /// Open in multi-thread mode (connections not shared between threads).
    pub no_mutex: bool,
    /// Open in serialized mode.
    pub full_mutex: bool,
}

impl OpenFlags {
    /// Create flags for read-only access.
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Default::default()
        }
    }

    /// Create flags for read-write access (database must exist).
    pub fn read_write() -> Self {
        Self {
            read_write: true,
            ..Default::default()
        }
    }

    /// Create flags for read-write access with creation if needed.
    pub fn create_read_write() -> Self {
        Self {
            read_write: true,
            create: true,
            ..Default::default()
        }
    }

    fn to_sqlite_flags(self) -> c_int {
        let mut flags = 0;

        if self.read_only {
            flags |= ffi::SQLITE_OPEN_READONLY;
        }
        if self.read_write {
            flags |= ffi::SQLITE_OPEN_READWRITE;
        }
        if self.create {
            flags |= ffi::SQLITE_OPEN_CREATE;
        }
        if self.uri {
            flags |= ffi::SQLITE_OPEN_URI;
        }
        if self.no_mutex {
            flags |= ffi::SQLITE_OPEN_NOMUTEX;
        }
        if self.full_mutex {
            flags |= ffi::SQLITE_OPEN_FULLMUTEX;
        }

        // Default to read-write if no mode specified
        if flags & (ffi::SQLITE_OPEN_READONLY | ffi::SQLITE_OPEN_READWRITE) == 0 {
            flags |= ffi::SQLITE_OPEN_READWRITE | ffi::SQLITE_OPEN_CREATE;
        }

        flags
    }
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            path: ":memory:".to_string(),
            flags: OpenFlags::create_read_write(),
            busy_timeout_ms: 5000,
            strict_bindings: true,
        }
    }
}

impl SqliteConfig {
    /// Create a new config for a file-based database, created if absent.
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Create a new config for an in-memory database.
    pub fn memory() -> Self {
        Self::default()
    }

    /// Create a new config for reading an existing database.
    pub fn read_only(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            flags: OpenFlags::read_only(),
            ..Self::default()
        }
    }

    /// Set open flags.
    pub fn flags(mut self, flags: OpenFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Set busy timeout.
    pub fn busy_timeout(mut self, ms: u32) -> Self {
        self.busy_timeout_ms = ms;
        self
    }

    /// Enable or disable the parameter-count check in `bind`.
    pub fn strict_bindings(mut self, strict: bool) -> Self {
        self.strict_bindings = strict;
        self
    }
}

/// A connection to a SQLite database.
///
/// The connection is single-threaded: it is neither `Send` nor `Sync`, and
/// performs no internal locking.
pub struct SqliteConnection {
    /// Null once the connection has been closed.
    db: *mut ffi::sqlite3,
    path: String,
    strict_bindings: bool,
}

impl SqliteConnection {
    /// Open a new SQLite connection with the given configuration.
    pub fn open(config: &SqliteConfig) -> Result<Self> {
        let c_path = CString::new(config.path.as_str()).map_err(|_| {
            Error::Connection(ConnectionError {
                kind: ConnectionErrorKind::Open,
                path: config.path.clone(),
                message: "Invalid path: contains null byte".to_string(),
            })
        })?;

        let mut db: *mut ffi::sqlite3 = ptr::null_mut();
        let flags = config.flags.to_sqlite_flags();

        // SAFETY: We pass valid pointers and check the return value
        let rc = unsafe { ffi::sqlite3_open_v2(c_path.as_ptr(), &mut db, flags, ptr::null()) };

        if rc != ffi::SQLITE_OK {
            let msg = if db.is_null() {
                ffi::error_string(rc).to_string()
            } else {
                // SAFETY: db is a handle returned by sqlite3_open_v2; it must
                // be closed even though opening failed
                unsafe {
                    let msg = last_error_message(db);
                    ffi::sqlite3_close(db);
                    msg
                }
            };

            return Err(Error::Connection(ConnectionError {
                kind: ConnectionErrorKind::Open,
                path: config.path.clone(),
                message: format!("Opening database. SQLite error: {}", msg),
            }));
        }

        if config.busy_timeout_ms > 0 {
            // SAFETY: db is valid
            unsafe {
                ffi::sqlite3_busy_timeout(
                    db,
                    c_int::try_from(config.busy_timeout_ms).unwrap_or(c_int::MAX),
                );
            }
        }

        tracing::debug!(path = %config.path, flags, "Opened database");

        Ok(Self {
            db,
            path: config.path.clone(),
            strict_bindings: config.strict_bindings,
        })
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self> {
        Self::open(&SqliteConfig::memory())
    }

    /// Open a file-based database, creating it if absent.
    pub fn open_file(path: impl Into<String>) -> Result<Self> {
        Self::open(&SqliteConfig::file(path))
    }

    /// Get the database path.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_closed(&self) -> bool {
        self.db.is_null()
    }

    pub fn strict_bindings(&self) -> bool {
        self.strict_bindings
    }

    /// The latest error message produced on the connection.
    ///
    /// `None` if the most recent native call succeeded or the connection is
    /// closed.
    pub fn error_message(&self) -> Option<String> {
        if self.db.is_null() {
            return None;
        }
        // SAFETY: db is valid while not closed
        let code = unsafe { ffi::sqlite3_errcode(self.db) };
        if matches!(code, ffi::SQLITE_OK | ffi::SQLITE_ROW | ffi::SQLITE_DONE) {
            return None;
        }
        // SAFETY: db is valid while not closed
        Some(unsafe { last_error_message(self.db) })
    }

    /// Get the number of rows changed by the last statement.
    pub fn changes(&self) -> Result<i32> {
        let db = self.handle()?;
        // SAFETY: db is valid
        Ok(unsafe { ffi::sqlite3_changes(db) })
    }

    /// Compile a query into a statement bound to this connection.
    pub fn compile(&self, sql: &str) -> Result<Statement<'_>> {
        Statement::compile(self, sql)
    }

    /// Compile, run and discard a query that takes no parameters and returns
    /// no rows, e.g. `CREATE TABLE`.
    pub fn run(&self, sql: &str) -> Result<()> {
        let mut statement = self.compile(sql)?;
        statement.run()
    }

    /// Create a table.
    #[tracing::instrument(level = "debug", skip(self, table), fields(table = table.name()))]
    pub fn create_table(&self, table: &Table) -> Result<()> {
        CreateTableStatement::new(self, table)?.run()
    }

    /// Compile an INSERT statement for a table.
    pub fn prepare_insert(&self, table: &Table) -> Result<InsertStatement<'_>> {
        InsertStatement::new(self, table)
    }

    /// Compile a `SELECT *` statement for a table.
    pub fn prepare_select(&self, table: &Table) -> Result<SelectStatement<'_>> {
        SelectStatement::new(self, table)
    }

    /// Read all rows of a table. Values are decoded according to the column
    /// types in the table description.
    pub fn read_all_rows(&self, table: &Table) -> Result<Vec<Row>> {
        self.prepare_select(table)?.read_all_rows()
    }

    /// Close the connection and release the native handle.
    ///
    /// Calling this more than once is harmless: later calls do nothing.
    pub fn close(&mut self) {
        if self.db.is_null() {
            tracing::warn!(path = %self.path, "Connection already closed");
            return;
        }

        // SAFETY: db is valid, and no statement can be alive because every
        // statement borrows the connection
        let rc = unsafe { ffi::sqlite3_close(self.db) };
        if rc != ffi::SQLITE_OK {
            tracing::warn!(
                path = %self.path,
                error = ffi::error_string(rc),
                "SQLite reported an error while closing"
            );
        }
        self.db = ptr::null_mut();

        tracing::debug!(path = %self.path, "Closed connection");
    }

    /// The native handle, or a `Closed` error.
    pub(crate) fn handle(&self) -> Result<*mut ffi::sqlite3> {
        if self.db.is_null() {
            Err(Error::Connection(ConnectionError {
                kind: ConnectionErrorKind::Closed,
                path: self.path.clone(),
                message: "Connection is closed".to_string(),
            }))
        } else {
            Ok(self.db)
        }
    }

    /// Build a query error from the connection's current error state.
    pub(crate) fn query_error(
        &self,
        component: &'static str,
        sql: &str,
        bindings: Option<String>,
    ) -> Error {
        let (code, message) = if self.db.is_null() {
            (ffi::SQLITE_MISUSE, "Connection is closed".to_string())
        } else {
            // SAFETY: db is valid while not closed
            unsafe { (ffi::sqlite3_errcode(self.db), last_error_message(self.db)) }
        };

        Error::Query(QueryError {
            kind: error_code_to_kind(code),
            component,
            sql: sql.to_string(),
            bindings,
            message,
        })
    }
}

impl Drop for SqliteConnection {
    fn drop(&mut self) {
        if !self.db.is_null() {
            self.close();
        }
    }
}

impl std::fmt::Debug for SqliteConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteConnection")
            .field("path", &self.path)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

/// # Safety
/// `db` must be a valid, open database handle.
unsafe fn last_error_message(db: *mut ffi::sqlite3) -> String {
    // SAFETY: guaranteed by the caller; errmsg returns a valid C string
    unsafe {
        let ptr = ffi::sqlite3_errmsg(db);
        if ptr.is_null() {
            String::new()
        } else {
            CStr::from_ptr(ptr).to_string_lossy().into_owned()
        }
    }
}

pub(crate) fn error_code_to_kind(code: c_int) -> QueryErrorKind {
    // Extended codes carry the primary code in their low byte.
    match code & 0xff {
        ffi::SQLITE_CONSTRAINT => QueryErrorKind::Constraint,
        ffi::SQLITE_BUSY | ffi::SQLITE_LOCKED => QueryErrorKind::Busy,
        ffi::SQLITE_PERM | ffi::SQLITE_AUTH | ffi::SQLITE_READONLY => QueryErrorKind::Permission,
        ffi::SQLITE_NOTFOUND => QueryErrorKind::NotFound,
        ffi::SQLITE_ERROR => QueryErrorKind::Syntax,
        _ => QueryErrorKind::Database,
    }
}
