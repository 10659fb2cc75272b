//! Card normalization
//!
//! Turns the first record seen for a card name into a [`CanonicalCard`]:
//! lowercase search mirrors, a sampling value, search tags, detected
//! abilities and the first printing.

use crate::core::{CanonicalCard, RawCardRecord};
use crate::keywords::Keywords;
use crate::transform::{PrintingExtractor, SetResolver};
use rand::Rng;
use std::sync::Arc;
use tracing::warn;

pub struct CardNormalizer {
    resolver: Arc<SetResolver>,
    extractor: Arc<PrintingExtractor>,
    /// Ability keywords, lowercased once up front
    abilities: Vec<String>,
}

impl CardNormalizer {
    pub fn new(
        keywords: &Keywords,
        resolver: Arc<SetResolver>,
        extractor: Arc<PrintingExtractor>,
    ) -> Self {
        CardNormalizer {
            resolver,
            extractor,
            abilities: keywords.abilities.iter().map(|a| a.to_lowercase()).collect(),
        }
    }

    /// Build the canonical card for a first-seen card name
    ///
    /// Tags are accumulated in a fixed order and never deduplicated.
    pub fn format_card<R: Rng>(
        &self,
        mut record: RawCardRecord,
        rng: &mut R,
    ) -> CanonicalCard {
        validate(&record);

        let name = record.name.clone().unwrap_or_default();
        let card_type = record.card_type.clone().unwrap_or_default();
        let description = record.description.clone().unwrap_or_default();

        let lcase_name = name.to_lowercase();
        let lcase_type = card_type.to_lowercase();
        let lcase_description = description.to_lowercase();

        let random = rng.gen::<f64>();

        let mut tags = Vec::new();
        let set_code = self.resolver.resolve_set(&mut record);
        tags.push(set_code.to_lowercase());
        if let Some(set_name) = &record.card_set_name {
            tags.push(set_name.to_lowercase());
        }

        let printings = vec![self.extractor.get_printing(&record)];
        let attributes = PrintingExtractor::delete_printing_information(record);

        tags.push(name.clone());
        tags.push(lcase_name.clone());
        tags.extend(name_tokens(&lcase_name));

        let abilities = self.find_abilities(&lcase_description);
        tags.extend(abilities.iter().cloned());

        if let Some(mana_cost) = &attributes.mana_cost {
            if !mana_cost.is_empty() {
                tags.push(mana_cost.to_lowercase());
            }
        }

        tags.extend(attributes.colors.iter().map(|c| c.to_lowercase()));

        CanonicalCard {
            name,
            card_type,
            description,
            lcase_name,
            lcase_type,
            lcase_description,
            mana_cost: attributes.mana_cost,
            colors: attributes.colors,
            tags,
            abilities,
            printings,
            random,
            extra: attributes.extra,
        }
    }

    /// Known ability keywords occurring anywhere in the (lowercased) rules text
    pub fn find_abilities(&self, lcase_description: &str) -> Vec<String> {
        self.abilities
            .iter()
            .filter(|ability| lcase_description.contains(ability.as_str()))
            .cloned()
            .collect()
    }
}

/// Report, but do not reject, records missing a shared field
///
/// An empty description is fine (vanilla creatures, basic lands).
fn validate(record: &RawCardRecord) {
    let mut missing = Vec::new();
    if record.name.as_deref().map_or(true, str::is_empty) {
        missing.push("name");
    }
    if record.card_type.as_deref().map_or(true, str::is_empty) {
        missing.push("type");
    }
    if record.description.is_none() {
        missing.push("description");
    }

    if !missing.is_empty() {
        warn!(
            id = ?record.id,
            name = ?record.name,
            card_set_name = ?record.card_set_name,
            missing = ?missing,
            "card record is missing required fields"
        );
    }
}

/// Search tokens for a lowercase card name
///
/// Each whitespace-separated word is stripped of punctuation. A possessive
/// word also yields its base form, so "serra" finds "Serra's Sanctum".
pub(crate) fn name_tokens(lcase_name: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for word in lcase_name.split_whitespace() {
        let token = strip_punctuation(word);
        if token.is_empty() {
            continue;
        }

        let base = possessive_base(word).map(strip_punctuation);

        tokens.push(token);
        if let Some(base) = base.filter(|b| !b.is_empty()) {
            tokens.push(base);
        }
    }
    tokens
}

/// The word without a trailing `'s` (straight or curly apostrophe)
///
/// Punctuation after the possessive ("urza's," or "serra's:") is ignored.
fn possessive_base(word: &str) -> Option<&str> {
    let word = word.trim_end_matches(|c: char| !c.is_alphanumeric());
    word.strip_suffix("'s")
        .or_else(|| word.strip_suffix("\u{2019}s"))
}

fn strip_punctuation(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}
