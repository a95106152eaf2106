//! Paginated result pages as served by the upstream catalog.
//!
//! ```json
//! {"count": 2, "next": null, "results": [{"name": "Black", "rgb": "05131D", "is_trans": false}]}
//! ```

use brickdb_core::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsList<T> {
    /// Total number of results across every page.
    pub count: u64,
    /// URL of the next page, absent on the last one.
    pub next: Option<String>,
    pub results: Vec<T>,
}

impl<T: DeserializeOwned> ResultsList<T> {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Serde(e.to_string()))
    }

    /// Read a page saved to disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| Error::Serde(format!("{}: {}", path.display(), e)))
    }
}

impl<T> ResultsList<T> {
    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }
}
