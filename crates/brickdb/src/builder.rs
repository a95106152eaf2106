//! Creating a fresh LEGO database file.

use crate::database::LegoDatabase;
use crate::schema::LegoSchema;
use brickdb_core::Error;
use brickdb_core::Result;
use brickdb_core::error::{ConnectionError, ConnectionErrorKind};
use brickdb_sqlite::{SqliteConfig, SqliteConnection};
use std::path::{Path, PathBuf};

/// Creates a new database file with every table of the schema.
///
/// ```rust,ignore
/// let db = DatabaseBuilder::build("lego.sqlite")?;
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseBuilder {
    path: PathBuf,
    busy_timeout_ms: Option<u32>,
    strict_bindings: bool,
    schema: Option<LegoSchema>,
}

impl DatabaseBuilder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout_ms: None,
            strict_bindings: true,
            schema: None,
        }
    }

    /// Create the database at `path` with default settings.
    pub fn build(path: impl Into<PathBuf>) -> Result<LegoDatabase> {
        Self::new(path).create()
    }

    pub fn busy_timeout(mut self, ms: u32) -> Self {
        self.busy_timeout_ms = Some(ms);
        self
    }

    pub fn strict_bindings(mut self, strict: bool) -> Self {
        self.strict_bindings = strict;
        self
    }

    /// Use these table descriptions instead of [`LegoSchema::new`].
    pub fn schema(mut self, schema: LegoSchema) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file and its tables.
    ///
    /// Fails with [`ConnectionErrorKind::FileExists`] when something already
    /// exists at the path; an existing database is never modified. If the
    /// tables cannot be created, the new file is removed again.
    #[tracing::instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    pub fn create(self) -> Result<LegoDatabase> {
        let shown = self.path.display().to_string();

        if self.path.exists() {
            return Err(Error::Connection(ConnectionError {
                kind: ConnectionErrorKind::FileExists,
                path: shown,
                message: "Refusing to build a database over an existing file".to_string(),
            }));
        }

        let path = self.path.to_str().ok_or_else(|| {
            Error::Connection(ConnectionError {
                kind: ConnectionErrorKind::Open,
                path: shown.clone(),
                message: "Path is not valid UTF-8".to_string(),
            })
        })?;

        let mut config = SqliteConfig::file(path).strict_bindings(self.strict_bindings);
        if let Some(ms) = self.busy_timeout_ms {
            config = config.busy_timeout(ms);
        }

        let schema = match self.schema {
            Some(schema) => schema,
            None => LegoSchema::new()?,
        };
        let db = LegoDatabase::with_connection(SqliteConnection::open(&config)?, schema);

        if let Err(e) = db.create_tables() {
            drop(db);
            if let Err(remove) = std::fs::remove_file(&self.path) {
                tracing::warn!(path = %shown, error = %remove, "Could not remove partial database");
            }
            return Err(e);
        }

        tracing::debug!(path = %shown, "Built database");
        Ok(db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_creates_tables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lego.sqlite");

        let db = DatabaseBuilder::build(&path).unwrap();
        assert!(path.exists());
        assert!(db.read_all_colors().unwrap().is_empty());
        assert!(db.read_all_parts().unwrap().is_empty());
    }

    #[test]
    fn test_build_refuses_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lego.sqlite");
        std::fs::write(&path, b"not a database").unwrap();

        let err = DatabaseBuilder::new(&path).busy_timeout(10).create().unwrap_err();
        match err {
            Error::Connection(e) => assert_eq!(e.kind, ConnectionErrorKind::FileExists),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(std::fs::read(&path).unwrap(), b"not a database");
    }

    #[test]
    fn test_failed_table_creation_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lego.sqlite");

        // Both descriptions name the same table, so the second CREATE fails.
        let mut schema = LegoSchema::new().unwrap();
        schema.parts.table = schema.colors.table.clone();

        let err = DatabaseBuilder::new(&path).schema(schema).create().unwrap_err();
        assert!(err.to_string().contains("already exists"), "{err}");
        assert!(!path.exists());

        // The path is free for a proper build afterwards.
        DatabaseBuilder::build(&path).unwrap();
    }
}
