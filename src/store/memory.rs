//! In-process document store
//!
//! Keeps every collection in memory behind a tokio `RwLock` and can persist
//! the result as one JSON file per collection.

use crate::core::{CanonicalCard, CardSet, Printing, SetCode};
use crate::error::StoreError;
use crate::store::{CatalogStore, CARDS, RAW_CARDS, SETS};
use async_trait::async_trait;
use rustc_hash::FxHashMap;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::info;

#[derive(Debug, Default)]
struct Collections {
    raw_cards: Vec<Value>,
    /// Keyed by card name; the map is the name index
    cards: FxHashMap<String, CanonicalCard>,
    /// Keyed by abbreviation; the map is the abbreviation index
    sets: FxHashMap<SetCode, CardSet>,
}

/// Point-in-time copy of all collections
///
/// Raw cards are in insertion order; cards and sets are sorted by key.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StoreSnapshot {
    pub raw_cards: Vec<Value>,
    pub cards: Vec<CanonicalCard>,
    pub sets: Vec<CardSet>,
}

impl StoreSnapshot {
    pub fn card(&self, name: &str) -> Option<&CanonicalCard> {
        self.cards.iter().find(|c| c.name == name)
    }

    pub fn set(&self, abbreviation: &str) -> Option<&CardSet> {
        self.sets.iter().find(|s| s.abbreviation.as_str() == abbreviation)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> StoreSnapshot {
        let collections = self.collections.read().await;

        let mut cards: Vec<CanonicalCard> = collections.cards.values().cloned().collect();
        cards.sort_by(|a, b| a.name.cmp(&b.name));

        let mut sets: Vec<CardSet> = collections.sets.values().cloned().collect();
        sets.sort_by(|a, b| a.abbreviation.cmp(&b.abbreviation));

        StoreSnapshot {
            raw_cards: collections.raw_cards.clone(),
            cards,
            sets,
        }
    }

    /// Write `rawCards.json`, `cards.json` and `sets.json` into `dir`
    ///
    /// Returns the paths written.
    pub async fn save_to_dir(&self, dir: &Path) -> Result<Vec<PathBuf>, StoreError> {
        let snapshot = self.snapshot().await;
        tokio::fs::create_dir_all(dir).await?;

        let written = vec![
            write_collection(dir, RAW_CARDS, &snapshot.raw_cards).await?,
            write_collection(dir, CARDS, &snapshot.cards).await?,
            write_collection(dir, SETS, &snapshot.sets).await?,
        ];

        info!(
            dir = %dir.display(),
            raw_cards = snapshot.raw_cards.len(),
            cards = snapshot.cards.len(),
            sets = snapshot.sets.len(),
            "saved collections"
        );
        Ok(written)
    }
}

async fn write_collection<T: Serialize>(
    dir: &Path,
    collection: &str,
    documents: &[T],
) -> Result<PathBuf, StoreError> {
    let path = dir.join(format!("{collection}.json"));
    let json = serde_json::to_vec_pretty(documents)?;
    tokio::fs::write(&path, json).await?;
    Ok(path)
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn reset(&self) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        *collections = Collections::default();
        Ok(())
    }

    async fn insert_raw_card(&self, document: &Value) -> Result<(), StoreError> {
        self.collections.write().await.raw_cards.push(document.clone());
        Ok(())
    }

    async fn find_card(&self, name: &str) -> Result<Option<CanonicalCard>, StoreError> {
        Ok(self.collections.read().await.cards.get(name).cloned())
    }

    async fn card_exists(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self.collections.read().await.cards.contains_key(name))
    }

    async fn upsert_card(&self, card: &CanonicalCard) -> Result<(), StoreError> {
        self.collections
            .write()
            .await
            .cards
            .insert(card.name.clone(), card.clone());
        Ok(())
    }

    async fn push_printing(&self, name: &str, printing: &Printing) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        match collections.cards.get_mut(name) {
            Some(card) => {
                card.printings.push(printing.clone());
                Ok(())
            }
            None => Err(StoreError::MissingDocument {
                collection: CARDS,
                key: name.to_string(),
            }),
        }
    }

    async fn find_set(&self, abbreviation: &SetCode) -> Result<Option<CardSet>, StoreError> {
        Ok(self.collections.read().await.sets.get(abbreviation).cloned())
    }

    async fn upsert_set(&self, set: &CardSet) -> Result<(), StoreError> {
        self.collections
            .write()
            .await
            .sets
            .insert(set.abbreviation.clone(), set.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(name: &str) -> CanonicalCard {
        CanonicalCard {
            name: name.to_string(),
            lcase_name: name.to_lowercase(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_upsert_card_replaces_by_name() {
        let store = MemoryStore::new();
        store.upsert_card(&card("Shock")).await.unwrap();

        let mut updated = card("Shock");
        updated.tags.push("shock".to_string());
        store.upsert_card(&updated).await.unwrap();

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.cards.len(), 1);
        assert_eq!(snapshot.cards[0].tags, vec!["shock"]);
    }

    #[tokio::test]
    async fn test_push_printing_appends_in_order() {
        let store = MemoryStore::new();
        store.upsert_card(&card("Shock")).await.unwrap();

        for set in ["STH", "10E"] {
            let printing = Printing {
                card_set_id: Some(SetCode::new(set)),
                ..Default::default()
            };
            store.push_printing("Shock", &printing).await.unwrap();
        }

        let found = store.find_card("Shock").await.unwrap().unwrap();
        let sets: Vec<_> = found
            .printings
            .iter()
            .filter_map(|p| p.card_set_id.as_ref().map(SetCode::as_str))
            .collect();
        assert_eq!(sets, vec!["STH", "10E"]);
    }

    #[tokio::test]
    async fn test_card_exists_by_exact_name() {
        let store = MemoryStore::new();
        assert!(!store.card_exists("Shock").await.unwrap());

        store.upsert_card(&card("Shock")).await.unwrap();
        assert!(store.card_exists("Shock").await.unwrap());
        assert!(!store.card_exists("shock").await.unwrap());
    }

    #[tokio::test]
    async fn test_push_printing_to_missing_card_fails() {
        let store = MemoryStore::new();
        let err = store
            .push_printing("Nope", &Printing::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::MissingDocument { .. }));
    }

    #[tokio::test]
    async fn test_reset_wipes_everything() {
        let store = MemoryStore::new();
        store.insert_raw_card(&serde_json::json!({})).await.unwrap();
        store.upsert_card(&card("Shock")).await.unwrap();
        store
            .upsert_set(&CardSet::new("Stronghold", SetCode::new("STH"), None))
            .await
            .unwrap();

        store.reset().await.unwrap();
        assert_eq!(store.snapshot().await, StoreSnapshot::default());
    }

    #[tokio::test]
    async fn test_save_to_dir_writes_each_collection() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryStore::new();
        store.upsert_card(&card("Shock")).await.unwrap();

        let written = store.save_to_dir(dir.path()).await.unwrap();
        assert_eq!(written.len(), 3);

        let cards: Vec<CanonicalCard> =
            serde_json::from_slice(&std::fs::read(dir.path().join("cards.json")).unwrap())
                .unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].name, "Shock");

        let raw: Vec<Value> =
            serde_json::from_slice(&std::fs::read(dir.path().join("rawCards.json")).unwrap())
                .unwrap();
        assert!(raw.is_empty());
    }
}
