//! Record transformation stages
//!
//! Set resolution, printing extraction, card normalization and the
//! card-or-printing decision.

pub mod set_resolver;
pub mod printing;
pub mod normalizer;
pub mod dedup;

pub use set_resolver::SetResolver;
pub use printing::PrintingExtractor;
pub use normalizer::CardNormalizer;
pub use dedup::{CardOutcome, Deduplicator};
