//! Pronunciation annotation pipeline
//!
//! - `lookup`: the collaborator trait that maps text to per-character readings
//! - `dictionary`: JSON dictionary lookup, with a bundled default
//! - `context`: neighbour-based readings for 的 / 地 / 得
//! - `annotator`: builds [`AnnotatedText`](crate::models::AnnotatedText)

pub mod annotator;
pub mod context;
pub mod dictionary;
pub mod lookup;

pub use annotator::Annotator;
pub use context::{is_particle, resolve_particle, NEUTRAL_READING};
pub use dictionary::{default_dictionary, Dictionary, DictionaryEntry};
pub use lookup::{PronunciationLookup, Readings};
