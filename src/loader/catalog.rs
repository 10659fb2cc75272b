//! Catalog file loader (.json)
//!
//! The catalog is a single JSON array of raw card records.

use crate::core::RawCardRecord;
use crate::{ImportError, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tokio::time::Instant;
use tracing::info;

pub struct CatalogLoader;

impl CatalogLoader {
    /// Load a catalog from a .json file
    pub fn load_from_file(path: &Path) -> Result<Vec<RawCardRecord>> {
        let content = fs::read_to_string(path).map_err(|e| catalog_error(path, e))?;
        Self::parse(&content).map_err(|e| catalog_error(path, e))
    }

    /// Load a catalog asynchronously
    pub async fn load_async(path: &Path) -> Result<Vec<RawCardRecord>> {
        let start = Instant::now();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| catalog_error(path, e))?;
        let records = Self::parse(&content).map_err(|e| catalog_error(path, e))?;

        info!(
            path = %path.display(),
            records = records.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "finished reading card catalog"
        );
        Ok(records)
    }

    /// Parse a catalog from its JSON text
    ///
    /// Each record keeps the object it was read from for the raw mirror.
    pub fn parse(content: &str) -> serde_json::Result<Vec<RawCardRecord>> {
        let documents: Vec<Map<String, Value>> = serde_json::from_str(content)?;
        documents
            .into_iter()
            .map(RawCardRecord::from_document)
            .collect()
    }
}

fn catalog_error(path: &Path, e: impl std::fmt::Display) -> ImportError {
    ImportError::Catalog {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}
