//! Printing extraction
//!
//! Splits a raw record into its edition-specific part (a [`Printing`]) and the
//! card-shared remainder.

use crate::core::{CardAttributes, Printing, RawCardRecord};
use crate::keywords::Keywords;
use std::sync::Arc;

pub struct PrintingExtractor {
    keywords: Arc<Keywords>,
}

impl PrintingExtractor {
    pub fn new(keywords: Arc<Keywords>) -> Self {
        PrintingExtractor { keywords }
    }

    /// Copy the printing fields of a record
    ///
    /// The set abbreviation is reconciled to its canonical form: when the
    /// catalog code has an entry in the replacement table, the printing carries
    /// the mapped code instead.
    pub fn get_printing(&self, record: &RawCardRecord) -> Printing {
        let mut printing = Printing {
            id: record.id.clone(),
            artist: record.artist.clone(),
            card_set_name: record.card_set_name.clone(),
            card_set_id: record.card_set_id.clone(),
            flavor: record.flavor.clone(),
            rarity: record.rarity.clone(),
            released_at: record.released_at.clone(),
            set_number: record.set_number.clone(),
        };

        if let Some(replacement) = printing
            .card_set_id
            .as_ref()
            .and_then(|code| self.keywords.replacement_for(code))
        {
            printing.card_set_id = Some(replacement.clone());
        }

        printing
    }

    /// Drop the printing fields, keeping only what every printing shares
    pub fn delete_printing_information(record: RawCardRecord) -> CardAttributes {
        let RawCardRecord {
            name,
            card_type,
            description,
            mana_cost,
            colors,
            mut extra,
            ..
        } = record;

        for field in Printing::FIELDS {
            extra.remove(field);
        }

        CardAttributes {
            name,
            card_type,
            description,
            mana_cost,
            colors,
            extra,
        }
    }
}
