//! Static keyword tables
//!
//! The importer needs four lookup tables: set names to abbreviations, the
//! ability keywords searched for in rules text, the reconciliation from the
//! catalog's three-letter set codes to the canonical ones, and release dates
//! for the few sets the catalog ships without one.
//!
//! The tables are loaded once, wrapped in an `Arc` and handed to the
//! components that need them.

use crate::core::SetCode;
use crate::{ImportError, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

const SET_NAMES: &[(&str, &str)] = &[
    ("Limited Edition Alpha", "LEA"),
    ("Limited Edition Beta", "LEB"),
    ("Unlimited Edition", "2ED"),
    ("Revised Edition", "3ED"),
    ("Fourth Edition", "4ED"),
    ("Fifth Edition", "5ED"),
    ("Classic Sixth Edition", "6ED"),
    ("Seventh Edition", "7ED"),
    ("Eighth Edition", "8ED"),
    ("Ninth Edition", "9ED"),
    ("Tenth Edition", "10E"),
    ("Magic 2010", "M10"),
    ("Magic 2011", "M11"),
    ("Magic 2012", "M12"),
    ("Magic 2013", "M13"),
    ("Magic 2014 Core Set", "M14"),
    ("Magic 2015 Core Set", "M15"),
    ("Arabian Nights", "ARN"),
    ("Antiquities", "ATQ"),
    ("Legends", "LEG"),
    ("The Dark", "DRK"),
    ("Fallen Empires", "FEM"),
    ("Homelands", "HML"),
    ("Ice Age", "ICE"),
    ("Alliances", "ALL"),
    ("Coldsnap", "CSP"),
    ("Mirage", "MIR"),
    ("Visions", "VIS"),
    ("Weatherlight", "WTH"),
    ("Tempest", "TMP"),
    ("Stronghold", "STH"),
    ("Exodus", "EXO"),
    ("Urza's Saga", "USG"),
    ("Urza's Legacy", "ULG"),
    ("Urza's Destiny", "UDS"),
    ("Mercadian Masques", "MMQ"),
    ("Nemesis", "NMS"),
    ("Prophecy", "PCY"),
    ("Invasion", "INV"),
    ("Planeshift", "PLS"),
    ("Apocalypse", "APC"),
    ("Odyssey", "ODY"),
    ("Torment", "TOR"),
    ("Judgment", "JUD"),
    ("Onslaught", "ONS"),
    ("Legions", "LGN"),
    ("Scourge", "SCG"),
    ("Mirrodin", "MRD"),
    ("Darksteel", "DST"),
    ("Fifth Dawn", "5DN"),
    ("Champions of Kamigawa", "CHK"),
    ("Betrayers of Kamigawa", "BOK"),
    ("Saviors of Kamigawa", "SOK"),
    ("Ravnica: City of Guilds", "RAV"),
    ("Guildpact", "GPT"),
    ("Dissension", "DIS"),
    ("Time Spiral", "TSP"),
    ("Planar Chaos", "PLC"),
    ("Future Sight", "FUT"),
    ("Lorwyn", "LRW"),
    ("Morningtide", "MOR"),
    ("Shadowmoor", "SHM"),
    ("Eventide", "EVE"),
    ("Shards of Alara", "ALA"),
    ("Conflux", "CON"),
    ("Alara Reborn", "ARB"),
    ("Zendikar", "ZEN"),
    ("Worldwake", "WWK"),
    ("Rise of the Eldrazi", "ROE"),
    ("Scars of Mirrodin", "SOM"),
    ("Mirrodin Besieged", "MBS"),
    ("New Phyrexia", "NPH"),
    ("Innistrad", "ISD"),
    ("Dark Ascension", "DKA"),
    ("Avacyn Restored", "AVR"),
    ("Return to Ravnica", "RTR"),
    ("Gatecrash", "GTC"),
    ("Dragon's Maze", "DGM"),
    ("Theros", "THS"),
    ("Born of the Gods", "BNG"),
    ("Journey into Nyx", "JOU"),
    ("Khans of Tarkir", "KTK"),
    ("Fate Reforged", "FRF"),
    ("Modern Masters", "MMA"),
    ("Conspiracy", "CNS"),
    ("Commander", "CMD"),
    ("Commander 2013 Edition", "C13"),
    ("Commander 2014", "C14"),
    ("From the Vault: Annihilation (2014)", "V14"),
    ("Portal", "POR"),
    ("Portal Second Age", "PO2"),
    ("Portal Three Kingdoms", "PTK"),
    ("Starter 1999", "S99"),
    ("Chronicles", "CHR"),
];

const ABILITIES: &[&str] = &[
    "Absorb",
    "Affinity",
    "Amplify",
    "Annihilator",
    "Banding",
    "Battle cry",
    "Bestow",
    "Bloodthirst",
    "Bushido",
    "Buyback",
    "Cascade",
    "Champion",
    "Changeling",
    "Cipher",
    "Conspire",
    "Convoke",
    "Cumulative upkeep",
    "Cycling",
    "Deathtouch",
    "Defender",
    "Delve",
    "Devour",
    "Double strike",
    "Dredge",
    "Echo",
    "Entwine",
    "Epic",
    "Equip",
    "Evoke",
    "Evolve",
    "Exalted",
    "Extort",
    "Fading",
    "Fear",
    "First strike",
    "Flanking",
    "Flash",
    "Flashback",
    "Flying",
    "Forecast",
    "Fortify",
    "Frenzy",
    "Fuse",
    "Graft",
    "Gravestorm",
    "Haste",
    "Haunt",
    "Hexproof",
    "Hideaway",
    "Horsemanship",
    "Infect",
    "Indestructible",
    "Intimidate",
    "Kicker",
    "Landwalk",
    "Level up",
    "Lifelink",
    "Living weapon",
    "Madness",
    "Miracle",
    "Modular",
    "Morph",
    "Multikicker",
    "Ninjutsu",
    "Offering",
    "Overload",
    "Persist",
    "Phasing",
    "Poisonous",
    "Protection",
    "Provoke",
    "Prowess",
    "Prowl",
    "Rampage",
    "Reach",
    "Rebound",
    "Recover",
    "Reinforce",
    "Replicate",
    "Retrace",
    "Ripple",
    "Scavenge",
    "Shadow",
    "Shroud",
    "Soulbond",
    "Soulshift",
    "Splice",
    "Split second",
    "Storm",
    "Sunburst",
    "Suspend",
    "Totem armor",
    "Trample",
    "Transfigure",
    "Transmute",
    "Tribute",
    "Undying",
    "Unearth",
    "Unleash",
    "Vanishing",
    "Vigilance",
    "Wither",
];

/// The catalog pads every abbreviation to three characters; the canonical
/// codes for the early sets are shorter.
const SET_REPLACEMENTS: &[(&str, &str)] = &[
    ("LEA", "1E"),
    ("LEB", "2E"),
    ("2ED", "2U"),
    ("3ED", "3E"),
    ("4ED", "4E"),
    ("5ED", "5E"),
    ("6ED", "6E"),
    ("7ED", "7E"),
    ("ARN", "AN"),
    ("ATQ", "AQ"),
    ("LEG", "LE"),
    ("DRK", "DK"),
    ("FEM", "FE"),
    ("HML", "HM"),
    ("ICE", "IA"),
    ("ALL", "AL"),
    ("MIR", "MI"),
    ("VIS", "VI"),
    ("WTH", "WL"),
    ("TMP", "TE"),
    ("STH", "ST"),
    ("EXO", "EX"),
    ("USG", "UZ"),
    ("ULG", "GU"),
    ("UDS", "CG"),
    ("MMQ", "MM"),
    ("NMS", "NE"),
    ("PCY", "PR"),
    ("INV", "IN"),
    ("PLS", "PS"),
    ("APC", "AP"),
    ("ODY", "OD"),
    ("CHR", "CH"),
    ("POR", "PO"),
    ("PO2", "P2"),
    ("PTK", "PK"),
];

const RELEASE_DATES: &[(&str, &str)] = &[("C14", "2014-11-07"), ("V14", "2014-08-22")];

/// Lookup tables shared by set resolution, printing extraction and normalization
///
/// Any table omitted from an override file falls back to the built-in one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Keywords {
    /// Set name -> set abbreviation
    pub set_names: FxHashMap<String, SetCode>,
    /// Ability keywords, matched case-insensitively against rules text
    pub abilities: Vec<String>,
    /// Catalog set abbreviation -> canonical set abbreviation
    pub set_replacements: FxHashMap<SetCode, SetCode>,
    /// Set abbreviation -> release date, for sets the catalog leaves undated
    pub release_dates: FxHashMap<SetCode, String>,
}

impl Keywords {
    /// The compiled-in tables
    pub fn builtin() -> Self {
        Keywords {
            set_names: SET_NAMES
                .iter()
                .map(|(name, code)| (name.to_string(), SetCode::new(*code)))
                .collect(),
            abilities: ABILITIES.iter().map(|a| a.to_string()).collect(),
            set_replacements: SET_REPLACEMENTS
                .iter()
                .map(|(from, to)| (SetCode::new(*from), SetCode::new(*to)))
                .collect(),
            release_dates: RELEASE_DATES
                .iter()
                .map(|(code, date)| (SetCode::new(*code), date.to_string()))
                .collect(),
        }
    }

    /// Parse an override document
    pub fn parse(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Load an override document from disk
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ImportError::Keywords {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(&content).map_err(|e| ImportError::Keywords {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn set_abbreviation(&self, set_name: &str) -> Option<&SetCode> {
        self.set_names.get(set_name)
    }

    pub fn replacement_for(&self, code: &SetCode) -> Option<&SetCode> {
        self.set_replacements.get(code)
    }

    pub fn release_date_for(&self, code: &SetCode) -> Option<&str> {
        self.release_dates.get(code).map(String::as_str)
    }
}

impl Default for Keywords {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables() {
        let keywords = Keywords::builtin();
        assert_eq!(
            keywords.set_abbreviation("Theros"),
            Some(&SetCode::new("THS"))
        );
        assert_eq!(
            keywords.replacement_for(&SetCode::new("LEA")),
            Some(&SetCode::new("1E"))
        );
        assert_eq!(
            keywords.release_date_for(&SetCode::new("C14")),
            Some("2014-11-07")
        );
        assert_eq!(
            keywords.release_date_for(&SetCode::new("V14")),
            Some("2014-08-22")
        );
        assert!(keywords.abilities.iter().any(|a| a == "Flying"));
    }

    #[test]
    fn test_partial_override_keeps_builtin_tables() {
        let keywords = Keywords::parse(r#"{"abilities": ["Flying", "Trample"]}"#).unwrap();
        assert_eq!(keywords.abilities, vec!["Flying", "Trample"]);
        assert_eq!(
            keywords.set_abbreviation("Theros"),
            Some(&SetCode::new("THS"))
        );
    }

    #[test]
    fn test_override_replaces_set_names() {
        let keywords = Keywords::parse(r#"{"setNames": {"Homebrew": "HBW"}}"#).unwrap();
        assert_eq!(
            keywords.set_abbreviation("Homebrew"),
            Some(&SetCode::new("HBW"))
        );
        assert_eq!(keywords.set_abbreviation("Theros"), None);
    }

    #[test]
    fn test_load_missing_file_is_keywords_error() {
        let err = Keywords::load_from_file(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, ImportError::Keywords { .. }));
    }
}
