//! Pronunciation annotations produced from the raw input text

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pinyin data for one distinct character
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CharacterAnnotation {
    pub char: char,

    /// Primary reading (first dictionary candidate)
    pub pronunciation: String,

    /// Every known reading, primary first
    pub all_pronunciations: Vec<String>,
}

impl CharacterAnnotation {
    /// Annotation with no readings, used when the lookup failed for `ch`
    pub fn empty(ch: char) -> Self {
        Self {
            char: ch,
            pronunciation: String::new(),
            all_pronunciations: Vec::new(),
        }
    }

    pub fn from_candidates(ch: char, candidates: Vec<String>) -> Self {
        Self {
            char: ch,
            pronunciation: candidates.first().cloned().unwrap_or_default(),
            all_pronunciations: candidates,
        }
    }

    /// Text printed in the header band of a worksheet block
    pub fn header_text(&self) -> Option<String> {
        let joined = self.all_pronunciations.join(", ");
        if !joined.trim().is_empty() {
            Some(joined)
        } else if !self.pronunciation.trim().is_empty() {
            Some(self.pronunciation.clone())
        } else {
            None
        }
    }
}

/// One input position in the inline ruby preview
///
/// Non-qualifying characters keep their slot with an empty pronunciation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PositionAnnotation {
    pub char: char,
    pub pronunciation: String,
}

impl PositionAnnotation {
    pub fn has_pronunciation(&self) -> bool {
        !self.pronunciation.is_empty()
    }
}

/// Full result of annotating one input string
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedText {
    /// Context-disambiguated reading for every input position
    pub per_position: Vec<PositionAnnotation>,

    /// Full candidate list per distinct qualifying character
    pub per_unique_char: BTreeMap<char, CharacterAnnotation>,
}

impl AnnotatedText {
    pub fn is_empty(&self) -> bool {
        self.per_position.is_empty()
    }

    pub fn get(&self, ch: char) -> Option<&CharacterAnnotation> {
        self.per_unique_char.get(&ch)
    }
}
