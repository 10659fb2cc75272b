//! Catalog loaders
//!
//! Readers for the external card catalog (.json)

pub mod catalog;

pub use catalog::CatalogLoader;
