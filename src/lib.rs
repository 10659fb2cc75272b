//! MTG Catalog Import - card catalog to search-ready document set
//!
//! Loads a static card catalog and rebuilds three collections from it: a raw
//! mirror of the catalog, one canonical card per unique name carrying all of
//! its printings plus search tags, and the deduplicated sets.

pub mod core;
pub mod keywords;
pub mod loader;
pub mod transform;
pub mod store;
pub mod pipeline;
pub mod locks;
pub mod config;
pub mod telemetry;
pub mod error;

pub use error::{ImportError, Result, StoreError};
pub use keywords::Keywords;
pub use pipeline::{ImportPipeline, ImportSummary, PipelineOptions};
