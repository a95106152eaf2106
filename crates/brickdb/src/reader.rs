//! Read-only access for consumers that display the catalog.

use crate::database::LegoDatabase;
use crate::records::{Color, Part};
use brickdb_core::Result;
use std::path::Path;
use std::time::Instant;

/// Opens an existing database read-only and returns fully materialized lists.
#[derive(Debug)]
pub struct DatabaseReader {
    db: LegoDatabase,
}

impl DatabaseReader {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_string_lossy().into_owned();
        Ok(Self {
            db: LegoDatabase::open_read_only(path)?,
        })
    }

    pub fn database(&self) -> &LegoDatabase {
        &self.db
    }

    pub fn read_all_colors(&self) -> Result<Vec<Color>> {
        let start = Instant::now();
        let colors = self.db.read_all_colors()?;
        tracing::info!(
            count = colors.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "Read colors"
        );
        Ok(colors)
    }

    pub fn read_all_parts(&self) -> Result<Vec<Part>> {
        let start = Instant::now();
        let parts = self.db.read_all_parts()?;
        tracing::info!(
            count = parts.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "Read parts"
        );
        Ok(parts)
    }

    pub fn close(mut self) {
        self.db.close();
    }
}
