//! Error types for the catalog importer
//!
//! Only fatal conditions are errors. Missing card fields and unknown sets are
//! logged where they are detected and the import carries on.

use std::path::PathBuf;
use thiserror::Error;

/// Failure reported by a [`CatalogStore`](crate::store::CatalogStore) backend
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no document in '{collection}' with key '{key}'")]
    MissingDocument { collection: &'static str, key: String },

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ImportError {
    /// A store read failed during an existence check
    #[error("lookup in '{collection}' for '{key}' failed: {source}")]
    Lookup {
        collection: &'static str,
        key: String,
        #[source]
        source: StoreError,
    },

    /// An insert, upsert or array append failed
    #[error("write to '{collection}' for '{key}' failed: {source}")]
    Write {
        collection: &'static str,
        key: String,
        #[source]
        source: StoreError,
    },

    #[error("Invalid catalog {path}: {message}")]
    Catalog { path: PathBuf, message: String },

    #[error("Invalid keyword tables {path}: {message}")]
    Keywords { path: PathBuf, message: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ImportError {
    pub fn lookup(collection: &'static str, key: impl Into<String>, source: StoreError) -> Self {
        ImportError::Lookup {
            collection,
            key: key.into(),
            source,
        }
    }

    pub fn write(collection: &'static str, key: impl Into<String>, source: StoreError) -> Self {
        ImportError::Write {
            collection,
            key: key.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;
