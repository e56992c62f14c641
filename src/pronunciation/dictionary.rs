//! JSON pronunciation dictionary
//!
//! The dictionary file is a flat object keyed by character:
//!
//! ```json
//! { "好": { "pinyin": "hǎo, hào", "definition": "good" } }
//! ```
//!
//! `pinyin` may also be an array of readings. Entries that cannot be read
//! are skipped with a warning instead of failing the whole file.

use super::lookup::{PronunciationLookup, Readings};
use crate::error::{DictionaryError, LookupError};
use lazy_static::lazy_static;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

const BUNDLED_DICTIONARY: &str = include_str!("../../data/dictionary.json");

lazy_static! {
    static ref DEFAULT_DICTIONARY: Dictionary = match Dictionary::from_json(BUNDLED_DICTIONARY) {
        Ok(dict) => dict,
        Err(e) => {
            log::error!("bundled dictionary failed to load: {}", e);
            Dictionary::default()
        }
    };
}

/// Dictionary that ships with the module
pub fn default_dictionary() -> &'static Dictionary {
    &DEFAULT_DICTIONARY
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPinyin {
    Joined(String),
    List(Vec<String>),
}

#[derive(Deserialize)]
struct RawEntry {
    #[serde(default)]
    pinyin: Option<RawPinyin>,
    #[serde(default)]
    definition: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct DictionaryEntry {
    pub readings: Vec<String>,
    pub definition: String,
}

#[derive(Clone, Debug, Default)]
pub struct Dictionary {
    entries: HashMap<char, DictionaryEntry>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, DictionaryError> {
        let root: Value = serde_json::from_str(json)?;
        let object = root.as_object().ok_or(DictionaryError::NotAnObject)?;

        let mut dict = Dictionary::new();
        for (key, value) in object {
            let mut chars = key.chars();
            let ch = match (chars.next(), chars.next()) {
                (Some(ch), None) => ch,
                _ => {
                    log::warn!("dictionary key {:?} is not a single character, skipping", key);
                    continue;
                }
            };

            match RawEntry::deserialize(value) {
                Ok(raw) => {
                    dict.entries.insert(ch, raw.into_entry());
                }
                Err(e) => log::warn!("dictionary entry for {} is malformed: {}", ch, e),
            }
        }

        log::debug!("dictionary loaded with {} entries", dict.entries.len());
        Ok(dict)
    }

    pub fn insert(&mut self, ch: char, readings: Vec<String>, definition: impl Into<String>) {
        self.entries.insert(
            ch,
            DictionaryEntry {
                readings,
                definition: definition.into(),
            },
        );
    }

    pub fn get(&self, ch: char) -> Option<&DictionaryEntry> {
        self.entries.get(&ch)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl RawEntry {
    fn into_entry(self) -> DictionaryEntry {
        let readings = match self.pinyin {
            Some(RawPinyin::Joined(joined)) => split_readings(&joined),
            Some(RawPinyin::List(list)) => list,
            None => Vec::new(),
        };
        DictionaryEntry {
            readings,
            definition: self.definition.unwrap_or_default(),
        }
    }
}

/// Split "hǎo, hào" / "hǎo/hào" / "hǎo hào" into individual readings
fn split_readings(joined: &str) -> Vec<String> {
    joined
        .split(|c: char| c == ',' || c == '/' || c == '，' || c.is_whitespace())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl PronunciationLookup for Dictionary {
    fn lookup(&self, text: &str) -> Result<Readings, LookupError> {
        Ok(text
            .chars()
            .filter_map(|ch| self.entries.get(&ch).map(|entry| (ch, entry.readings.clone())))
            .collect())
    }
}
