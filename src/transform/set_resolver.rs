//! Set identity resolution
//!
//! Maps a raw record onto a canonical set abbreviation and makes sure every
//! abbreviation is written to the sets collection exactly once per run.

use crate::core::{CardSet, RawCardRecord, SetCode};
use crate::keywords::Keywords;
use crate::locks::KeyedLocks;
use crate::store::{CatalogStore, SETS};
use crate::{ImportError, Result};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct SetResolver {
    keywords: Arc<Keywords>,
    locks: KeyedLocks,
}

impl SetResolver {
    pub fn new(keywords: Arc<Keywords>) -> Self {
        SetResolver {
            keywords,
            locks: KeyedLocks::new(),
        }
    }

    /// Resolve the set abbreviation of a record
    ///
    /// Uses the record's own `cardSetId` when present, otherwise looks the set
    /// name up in the set table. Unknown sets get the `UNKNOWN` sentinel. The
    /// result is written back onto the record so later stages see it.
    pub fn resolve_set(&self, record: &mut RawCardRecord) -> SetCode {
        if let Some(code) = record.card_set_id.as_ref().filter(|c| !c.is_empty()) {
            return code.clone();
        }

        let code = match record
            .card_set_name
            .as_deref()
            .and_then(|name| self.keywords.set_abbreviation(name))
        {
            Some(code) => code.clone(),
            None => {
                warn!(
                    id = ?record.id,
                    name = ?record.name,
                    card_set_name = ?record.card_set_name,
                    "unknown card set"
                );
                SetCode::unknown()
            }
        };

        record.card_set_id = Some(code.clone());
        code
    }

    /// Release date used for the record's set
    ///
    /// Falls back to the exception table for the handful of sets the catalog
    /// ships undated. The record itself is left untouched, so printings keep
    /// whatever date the catalog gave them.
    pub fn card_released_at<'a>(&'a self, record: &'a RawCardRecord) -> Option<&'a str> {
        if let Some(date) = record.released_at.as_deref().filter(|d| !d.is_empty()) {
            return Some(date);
        }
        record
            .card_set_id
            .as_ref()
            .and_then(|code| self.keywords.release_date_for(code))
    }

    /// Write the set to the store unless it is already there
    ///
    /// Existence is checked and written under the abbreviation, and workflows
    /// for the same abbreviation are serialized, so concurrent records of one
    /// set produce a single insert. Returns whether this call created the set.
    pub async fn ensure_set_persisted<S>(
        &self,
        store: &S,
        code: &SetCode,
        name: &str,
        released_at: Option<&str>,
    ) -> Result<bool>
    where
        S: CatalogStore + ?Sized,
    {
        let _guard = self.locks.lock(code.as_str()).await;

        let existing = store
            .find_set(code)
            .await
            .map_err(|e| ImportError::lookup(SETS, code.as_str(), e))?;
        if existing.is_some() {
            return Ok(false);
        }

        let set = CardSet::new(name, code.clone(), released_at);
        debug!(abbreviation = %code, name, released_at = ?set.released_at, "inserting set");
        store
            .upsert_set(&set)
            .await
            .map_err(|e| ImportError::write(SETS, code.as_str(), e))?;
        Ok(true)
    }

    /// Forget per-run state
    pub fn reset(&self) {
        self.locks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn resolver() -> SetResolver {
        SetResolver::new(Arc::new(Keywords::builtin()))
    }

    fn record(set_name: &str, set_id: Option<&str>) -> RawCardRecord {
        RawCardRecord {
            name: Some("Elvish Mystic".to_string()),
            card_set_name: Some(set_name.to_string()),
            card_set_id: set_id.map(SetCode::new),
            ..Default::default()
        }
    }

    #[test]
    fn test_record_set_id_wins() {
        let mut card = record("Theros", Some("XYZ"));
        assert_eq!(resolver().resolve_set(&mut card), SetCode::new("XYZ"));
    }

    #[test]
    fn test_set_name_lookup_is_memoized() {
        let mut card = record("Theros", None);
        assert_eq!(resolver().resolve_set(&mut card), SetCode::new("THS"));
        assert_eq!(card.card_set_id, Some(SetCode::new("THS")));
    }

    #[test]
    fn test_empty_set_id_falls_back_to_table() {
        let mut card = record("Theros", Some(""));
        assert_eq!(resolver().resolve_set(&mut card), SetCode::new("THS"));
    }

    #[test]
    fn test_unknown_set_gets_sentinel() {
        let mut card = record("Not A Real Set", None);
        let code = resolver().resolve_set(&mut card);
        assert!(code.is_unknown());
        assert_eq!(card.card_set_id, Some(SetCode::unknown()));
    }

    #[test]
    fn test_released_at_exceptions() {
        let resolver = resolver();

        let mut commander = record("Commander 2014", None);
        resolver.resolve_set(&mut commander);
        assert_eq!(resolver.card_released_at(&commander), Some("2014-11-07"));
        assert_eq!(commander.released_at, None);

        let mut dated = record("Theros", Some("THS"));
        dated.released_at = Some("2013-09-27".to_string());
        assert_eq!(resolver.card_released_at(&dated), Some("2013-09-27"));

        let undated = record("Theros", Some("THS"));
        assert_eq!(resolver.card_released_at(&undated), None);
    }

    #[tokio::test]
    async fn test_set_persisted_once() {
        let resolver = resolver();
        let store = MemoryStore::new();
        let code = SetCode::new("THS");

        let created = resolver
            .ensure_set_persisted(&store, &code, "Theros", Some("2013-09-27"))
            .await
            .unwrap();
        assert!(created);

        let created_again = resolver
            .ensure_set_persisted(&store, &code, "Theros (renamed)", None)
            .await
            .unwrap();
        assert!(!created_again);

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.sets.len(), 1);
        assert_eq!(snapshot.sets[0].name, "Theros");
        assert!(snapshot.sets[0].released_at.is_some());
    }
}
