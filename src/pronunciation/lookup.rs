//! Pronunciation lookup collaborator interface

use crate::error::LookupError;
use std::collections::BTreeMap;

/// Candidate readings keyed by character, primary reading first
pub type Readings = BTreeMap<char, Vec<String>>;

/// Source of per-character pinyin
///
/// Implementations must answer for the whole input text at once, so that a
/// segmentation-aware backend can see context. Characters the backend does
/// not know are simply absent from the result; that is not an error.
pub trait PronunciationLookup {
    fn lookup(&self, text: &str) -> Result<Readings, LookupError>;
}

impl<T: PronunciationLookup + ?Sized> PronunciationLookup for &T {
    fn lookup(&self, text: &str) -> Result<Readings, LookupError> {
        (**self).lookup(text)
    }
}

impl<T: PronunciationLookup + ?Sized> PronunciationLookup for Box<T> {
    fn lookup(&self, text: &str) -> Result<Readings, LookupError> {
        (**self).lookup(text)
    }
}

/// Trim the candidates for `ch` and drop blanks
///
/// An entry that had candidates but none usable is a malformed answer.
pub fn clean_candidates(ch: char, candidates: &[String]) -> Result<Vec<String>, LookupError> {
    let cleaned: Vec<String> = candidates
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();

    if cleaned.is_empty() && !candidates.is_empty() {
        Err(LookupError::Malformed(format!(
            "{} has only blank readings {:?}",
            ch, candidates
        )))
    } else {
        Ok(cleaned)
    }
}
