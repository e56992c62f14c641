//! Pronunciation annotator
//!
//! Turns a raw input string into the two views the UI needs: a reading for
//! every input position (inline ruby preview) and the full candidate list
//! for every distinct character (printed header band).

use super::context::{is_particle, resolve_particle};
use super::dictionary::{default_dictionary, Dictionary};
use super::lookup::{clean_candidates, PronunciationLookup, Readings};
use crate::models::{AnnotatedText, CharacterAnnotation, PositionAnnotation};
use crate::text::{is_qualifying, unique_qualifying_chars};
use std::collections::BTreeMap;

/// Annotator bound to one lookup collaborator
///
/// Holds no mutable state: the result depends only on the input string, so
/// one annotator can serve any number of independent requests.
pub struct Annotator<L> {
    lookup: L,
}

impl Annotator<&'static Dictionary> {
    /// Annotator backed by the bundled dictionary
    pub fn with_default_dictionary() -> Self {
        Self::new(default_dictionary())
    }
}

impl<L: PronunciationLookup> Annotator<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    /// Annotate `text`; never fails
    ///
    /// A lookup failure degrades the affected characters to empty readings.
    pub fn annotate(&self, text: &str) -> AnnotatedText {
        let chars: Vec<char> = text.chars().collect();
        let unique = unique_qualifying_chars(text);

        let readings = if unique.is_empty() {
            Readings::new()
        } else {
            match self.lookup.lookup(text) {
                Ok(readings) => readings,
                Err(e) => {
                    log::warn!("pronunciation lookup failed, annotating without readings: {}", e);
                    Readings::new()
                }
            }
        };

        let per_unique_char: BTreeMap<char, CharacterAnnotation> = unique
            .iter()
            .map(|&ch| (ch, annotation_for(ch, readings.get(&ch))))
            .collect();

        let per_position = chars
            .iter()
            .enumerate()
            .map(|(index, &ch)| PositionAnnotation {
                char: ch,
                pronunciation: position_reading(&chars, index, per_unique_char.get(&ch)),
            })
            .collect();

        AnnotatedText {
            per_position,
            per_unique_char,
        }
    }
}

fn annotation_for(ch: char, raw: Option<&Vec<String>>) -> CharacterAnnotation {
    let Some(raw) = raw else {
        return CharacterAnnotation::empty(ch);
    };

    match clean_candidates(ch, raw) {
        Ok(candidates) => CharacterAnnotation::from_candidates(ch, candidates),
        Err(e) => {
            log::warn!("{}", e);
            CharacterAnnotation::empty(ch)
        }
    }
}

fn position_reading(chars: &[char], index: usize, annotation: Option<&CharacterAnnotation>) -> String {
    let ch = chars[index];
    if !is_qualifying(ch) {
        return String::new();
    }
    let Some(annotation) = annotation else {
        return String::new();
    };
    if annotation.all_pronunciations.is_empty() {
        return annotation.pronunciation.clone();
    }

    if is_particle(ch) {
        if let Some(reading) = resolve_particle(chars, index, &annotation.all_pronunciations) {
            return reading;
        }
    }
    annotation.pronunciation.clone()
}
