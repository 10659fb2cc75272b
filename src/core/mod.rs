//! Core catalog types: raw records, canonical cards, printings and sets

pub mod types;
pub mod record;
pub mod card;
pub mod set;

pub use types::{CatalogValue, SetCode};
pub use record::RawCardRecord;
pub use card::{CanonicalCard, CardAttributes, Printing};
pub use set::{parse_release_date, CardSet};
