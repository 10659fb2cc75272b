//! New card or new printing?
//!
//! Two records with the same exact name are printings of one card. The first
//! one seen becomes the canonical card; every later one only contributes its
//! printing.

use crate::core::RawCardRecord;
use crate::locks::KeyedLocks;
use crate::store::{CatalogStore, CARDS};
use crate::transform::{CardNormalizer, PrintingExtractor};
use crate::{ImportError, Result};
use rand::Rng;
use std::sync::Arc;
use tracing::debug;

/// What happened to a record's card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardOutcome {
    /// First record for this name; a canonical card was written
    Created,
    /// Name already known; the record's printing was appended
    PrintingAppended,
}

pub struct Deduplicator {
    normalizer: Arc<CardNormalizer>,
    extractor: Arc<PrintingExtractor>,
    locks: KeyedLocks,
}

impl Deduplicator {
    pub fn new(normalizer: Arc<CardNormalizer>, extractor: Arc<PrintingExtractor>) -> Self {
        Deduplicator {
            normalizer,
            extractor,
            locks: KeyedLocks::new(),
        }
    }

    /// Insert the record's card, or append its printing to the existing card
    ///
    /// The lookup and the write for one name run under that name's lock, so
    /// concurrent records of the same card cannot both take the insert path.
    /// The insert is still an upsert keyed by name.
    pub async fn upsert_card<S, R>(
        &self,
        store: &S,
        record: RawCardRecord,
        rng: &mut R,
    ) -> Result<CardOutcome>
    where
        S: CatalogStore + ?Sized,
        R: Rng + Send,
    {
        let key = record.card_key().to_string();
        let _guard = self.locks.lock(&key).await;

        let exists = store
            .card_exists(&key)
            .await
            .map_err(|e| ImportError::lookup(CARDS, key.as_str(), e))?;

        if !exists {
            let card = self.normalizer.format_card(record, rng);
            debug!(name = %key, tags = card.tags.len(), "inserting card");
            store
                .upsert_card(&card)
                .await
                .map_err(|e| ImportError::write(CARDS, key.as_str(), e))?;
            Ok(CardOutcome::Created)
        } else {
            let printing = self.extractor.get_printing(&record);
            debug!(name = %key, set = ?printing.card_set_id, "appending printing");
            store
                .push_printing(&key, &printing)
                .await
                .map_err(|e| ImportError::write(CARDS, key.as_str(), e))?;
            Ok(CardOutcome::PrintingAppended)
        }
    }

    /// Forget per-run state
    pub fn reset(&self) {
        self.locks.clear();
    }
}
