//! Document store the importer writes into
//!
//! Three collections: a verbatim mirror of the raw catalog, the deduplicated
//! canonical cards (keyed by name), and the sets (keyed by abbreviation).

pub mod memory;

pub use memory::{MemoryStore, StoreSnapshot};

use crate::core::{CanonicalCard, CardSet, Printing, SetCode};
use crate::error::StoreError;
use async_trait::async_trait;
use serde_json::Value;

/// Collection names, used in logs and errors
pub const RAW_CARDS: &str = "rawCards";
pub const CARDS: &str = "cards";
pub const SETS: &str = "sets";

/// Primitive operations the import pipeline needs from a store
///
/// Implementations must make `upsert_card`, `upsert_set` and `push_printing`
/// atomic per document; the pipeline relies on them for convergence when
/// records race.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Wipe all three collections and ensure the name and abbreviation indexes
    async fn reset(&self) -> Result<(), StoreError>;

    /// Append a raw catalog document to the mirror; duplicates are allowed
    async fn insert_raw_card(&self, document: &Value) -> Result<(), StoreError>;

    /// Find a canonical card by exact name
    async fn find_card(&self, name: &str) -> Result<Option<CanonicalCard>, StoreError>;

    /// Whether a canonical card with this exact name exists
    async fn card_exists(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self.find_card(name).await?.is_some())
    }

    /// Insert or replace the card stored under `card.name`
    async fn upsert_card(&self, card: &CanonicalCard) -> Result<(), StoreError>;

    /// Atomically append a printing to an existing card
    async fn push_printing(&self, name: &str, printing: &Printing) -> Result<(), StoreError>;

    /// Find a set by abbreviation
    async fn find_set(&self, abbreviation: &SetCode) -> Result<Option<CardSet>, StoreError>;

    /// Insert or replace the set stored under `set.abbreviation`
    async fn upsert_set(&self, set: &CardSet) -> Result<(), StoreError>;
}
