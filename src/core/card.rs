//! Canonical cards and their printings

use crate::core::{CatalogValue, SetCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Edition-specific attributes of one printing of a card
///
/// A printing is a detached copy: it never carries the shared gameplay
/// attributes, and changing it never touches the card it belongs to.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Printing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CatalogValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_set_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_set_id: Option<SetCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flavor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub released_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_number: Option<CatalogValue>,
}

impl Printing {
    /// Catalog keys that belong to a printing rather than to the card
    pub const FIELDS: [&'static str; 8] = [
        "id",
        "artist",
        "cardSetName",
        "cardSetId",
        "flavor",
        "rarity",
        "releasedAt",
        "setNumber",
    ];
}

/// The card-shared part of a record, left over once printing fields are removed
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mana_cost: Option<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Deduplicated card: one document per unique card name
///
/// Identity is the exact `name`. Every further catalog record with the same
/// name contributes only a [`Printing`] appended to `printings`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalCard {
    pub name: String,

    #[serde(rename = "type")]
    pub card_type: String,

    pub description: String,

    /// Lowercase mirrors for case-insensitive search
    pub lcase_name: String,
    pub lcase_type: String,
    pub lcase_description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mana_cost: Option<String>,

    #[serde(default)]
    pub colors: Vec<String>,

    /// Search tokens. Not deduplicated.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Known ability keywords found in the description
    #[serde(default)]
    pub abilities: Vec<String>,

    /// Append-only, in import order
    #[serde(default)]
    pub printings: Vec<Printing>,

    /// Uniform sampling value in [0, 1) for picking a random card
    pub random: f64,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printing_fields_match_serialized_keys() {
        let printing = Printing {
            id: Some(CatalogValue::Number(1)),
            artist: Some("Rebecca Guay".to_string()),
            card_set_name: Some("Theros".to_string()),
            card_set_id: Some(SetCode::new("THS")),
            flavor: Some(String::new()),
            rarity: Some("Rare".to_string()),
            released_at: Some("2013-09-27".to_string()),
            set_number: Some(CatalogValue::from("1")),
        };

        let value = serde_json::to_value(&printing).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        for field in Printing::FIELDS {
            assert!(keys.contains(&field), "missing printing key {field}");
        }
        assert_eq!(keys.len(), Printing::FIELDS.len());
    }

    #[test]
    fn test_canonical_card_wire_names() {
        let card = CanonicalCard {
            name: "Forest".to_string(),
            card_type: "Basic Land - Forest".to_string(),
            lcase_name: "forest".to_string(),
            ..Default::default()
        };

        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(value["type"], "Basic Land - Forest");
        assert_eq!(value["lcaseName"], "forest");
        assert!(value.get("manaCost").is_none());
    }
}
