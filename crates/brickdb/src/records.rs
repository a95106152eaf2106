//! Record types stored in the LEGO database.
//!
//! Field names follow the database columns. The serde attributes accept the
//! field names used by the upstream catalog JSON.

use crate::schema::{ColorsTable, PartsTable};
use brickdb_core::{Result, Row};
use serde::{Deserialize, Serialize};

/// One row of the `colors` table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Color {
    pub name: String,
    /// Hex RGB triple without the leading `#`, e.g. `05131D`.
    pub rgb: String,
    #[serde(rename = "is_trans")]
    pub transparent: bool,
}

impl Color {
    pub fn new(name: impl Into<String>, rgb: impl Into<String>, transparent: bool) -> Self {
        Self {
            name: name.into(),
            rgb: rgb.into(),
            transparent,
        }
    }

    /// Decode a row read from the colors table.
    pub fn from_row(row: &Row, table: &ColorsTable) -> Result<Self> {
        Ok(Self {
            name: row.get_column(&table.name)?,
            rgb: row.get_column(&table.rgb)?,
            transparent: row.get_column(&table.transparent)?,
        })
    }
}

/// One row of the `parts` table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Part {
    pub name: String,
    #[serde(rename = "part_img_url", default)]
    pub image_url: Option<String>,
}

impl Part {
    pub fn new(name: impl Into<String>, image_url: Option<String>) -> Self {
        Self {
            name: name.into(),
            image_url,
        }
    }

    /// Decode a row read from the parts table.
    pub fn from_row(row: &Row, table: &PartsTable) -> Result<Self> {
        Ok(Self {
            name: row.get_column(&table.name)?,
            image_url: row.get_column(&table.image_url)?,
        })
    }
}
