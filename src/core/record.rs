//! Raw catalog records, exactly as ingested

use crate::core::{CatalogValue, SetCode};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One entry of the external catalog
///
/// A record describes a single printing of a card: the shared gameplay
/// attributes (name, type, rules text, cost, colors) together with the
/// edition-specific ones (set, artist, rarity, flavor). Every field the
/// catalog may omit is optional here; missing shared fields are reported
/// during normalization rather than rejected at parse time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCardRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CatalogValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Type line (e.g., "Creature - Elf Druid")
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,

    /// Rules text; an empty string is a valid description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_set_name: Option<String>,

    /// Set abbreviation. Filled in by set resolution when the catalog omits it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_set_id: Option<SetCode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mana_cost: Option<String>,

    /// Color names; an explicit `null` reads as no colors
    #[serde(default, deserialize_with = "null_as_empty")]
    pub colors: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flavor: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_number: Option<CatalogValue>,

    /// Release date as printed in the catalog (e.g., "2013-09-27")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub released_at: Option<String>,

    /// Attributes this importer does not interpret, kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    /// The catalog object this record was read from, when it came from one
    #[serde(skip)]
    pub source: Option<Map<String, Value>>,
}

impl RawCardRecord {
    /// Name used as the canonical card key
    ///
    /// A record without a name still gets written (under the empty name) so
    /// malformed catalog entries stay visible in the output.
    pub fn card_key(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Read a record from one catalog object, keeping the object itself
    pub fn from_document(document: Map<String, Value>) -> serde_json::Result<Self> {
        let mut record: RawCardRecord = serde_json::from_value(Value::Object(document.clone()))?;
        record.source = Some(document);
        Ok(record)
    }

    /// Document for the raw mirror
    ///
    /// The catalog object exactly as read (explicit nulls, key spelling and
    /// absent keys included) with only `cardSetId` set to the resolved code.
    /// Records built in code have no source object and serialize their fields.
    pub fn mirror_document(&self) -> serde_json::Result<Value> {
        match &self.source {
            Some(source) => {
                let mut document = source.clone();
                if let Some(code) = &self.card_set_id {
                    document.insert("cardSetId".to_string(), Value::from(code.as_str()));
                }
                Ok(Value::Object(document))
            }
            None => serde_json::to_value(self),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<String>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_camel_case_record() {
        let json = r#"{
            "id": 373661,
            "name": "Elvish Mystic",
            "type": "Creature - Elf Druid",
            "description": "{T}: Add {G}.",
            "cardSetName": "Magic 2014 Core Set",
            "cardSetId": "M14",
            "manaCost": "G",
            "colors": ["green"],
            "rarity": "Common",
            "artist": "Wesley Burt",
            "flavor": "",
            "setNumber": 169,
            "releasedAt": "2013-07-19",
            "convertedManaCost": 1
        }"#;

        let record: RawCardRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name.as_deref(), Some("Elvish Mystic"));
        assert_eq!(record.card_type.as_deref(), Some("Creature - Elf Druid"));
        assert_eq!(record.card_set_id, Some(SetCode::new("M14")));
        assert_eq!(record.set_number, Some(CatalogValue::Number(169)));
        assert_eq!(record.colors, vec!["green".to_string()]);

        // Unknown attributes survive untouched
        assert_eq!(record.extra.get("convertedManaCost"), Some(&Value::from(1)));
    }

    #[test]
    fn test_round_trip_keeps_unknown_attributes() {
        let json = r#"{"name":"Forest","type":"Basic Land - Forest","description":"","colors":[],"power":null}"#;
        let record: RawCardRecord = serde_json::from_str(json).unwrap();
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["type"], "Basic Land - Forest");
        assert!(value.as_object().unwrap().contains_key("power"));
        assert!(!value.as_object().unwrap().contains_key("cardSetId"));
    }

    #[test]
    fn test_null_colors_read_as_empty() {
        let json = r#"{"name":"Black Lotus","type":"Artifact","description":"","colors":null}"#;
        let record: RawCardRecord = serde_json::from_str(json).unwrap();
        assert!(record.colors.is_empty());
    }

    #[test]
    fn test_mirror_document_is_source_plus_set_code() {
        let source = serde_json::json!({
            "name": "Black Lotus",
            "type": "Artifact",
            "description": "",
            "cardSetName": "Limited Edition Alpha",
            "manaCost": null,
            "releasedAt": null,
            "power": null
        });
        let map = source.as_object().unwrap().clone();
        let mut record = RawCardRecord::from_document(map).unwrap();
        record.card_set_id = Some(SetCode::new("LEA"));

        let mut expected = source;
        expected["cardSetId"] = Value::from("LEA");
        assert_eq!(record.mirror_document().unwrap(), expected);
    }

    #[test]
    fn test_card_key_for_nameless_record() {
        let record = RawCardRecord::default();
        assert_eq!(record.card_key(), "");
    }
}
