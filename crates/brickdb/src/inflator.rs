//! Filling a database with batches of records.

use crate::database::LegoDatabase;
use crate::records::{Color, Part};
use crate::statements::{ColorInsertStatement, PartInsertStatement};
use brickdb_core::Result;
use std::time::Instant;

/// Inserts batches of colors and parts, reusing one compiled statement per
/// table for every row.
#[derive(Debug)]
pub struct DatabaseInflator<'db> {
    colors: ColorInsertStatement<'db>,
    parts: PartInsertStatement<'db>,
}

impl<'db> DatabaseInflator<'db> {
    pub fn new(db: &'db LegoDatabase) -> Result<Self> {
        Ok(Self {
            colors: db.prepare_color_insert()?,
            parts: db.prepare_part_insert()?,
        })
    }

    /// Insert colors in order. Stops at the first failure; rows inserted
    /// before it stay in the database.
    #[tracing::instrument(level = "debug", skip_all, fields(count = colors.len()))]
    pub fn insert_colors(&mut self, colors: &[Color]) -> Result<usize> {
        let start = Instant::now();
        for color in colors {
            self.colors.insert_color(color)?;
        }
        tracing::info!(
            count = colors.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "Inserted colors"
        );
        Ok(colors.len())
    }

    /// Insert parts in order. Stops at the first failure.
    #[tracing::instrument(level = "debug", skip_all, fields(count = parts.len()))]
    pub fn insert_parts(&mut self, parts: &[Part]) -> Result<usize> {
        let start = Instant::now();
        for part in parts {
            self.parts.insert_part(part)?;
        }
        tracing::info!(
            count = parts.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "Inserted parts"
        );
        Ok(parts.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brickdb_sqlite::SqliteConfig;

    #[test]
    fn test_inflate_both_tables() {
        let db = LegoDatabase::open(&SqliteConfig::memory()).unwrap();
        db.create_tables().unwrap();

        let mut inflator = DatabaseInflator::new(&db).unwrap();
        let colors = vec![
            Color::new("Black", "05131D", false),
            Color::new("Trans-Clear", "FCFCFC", true),
        ];
        let parts = vec![
            Part::new("Brick 2 x 4", Some("http://x/3001.png".to_string())),
            Part::new("Plate 1 x 1", None),
            Part::new("Tile 1 x 1", None),
        ];
        assert_eq!(inflator.insert_colors(&colors).unwrap(), 2);
        assert_eq!(inflator.insert_parts(&parts).unwrap(), 3);
        assert_eq!(inflator.insert_parts(&[]).unwrap(), 0);

        assert_eq!(db.read_all_colors().unwrap().len(), 2);
        assert_eq!(db.read_all_parts().unwrap().len(), 3);
    }

    #[test]
    fn test_needs_tables() {
        let db = LegoDatabase::open(&SqliteConfig::memory()).unwrap();
        assert!(DatabaseInflator::new(&db).is_err());
    }
}
