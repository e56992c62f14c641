//! Character classification for grid placement
//!
//! Only CJK Unified Ideographs (U+4E00..=U+9FFF) get a block on the sheet.
//! Everything else stays in the raw input and inline preview but is
//! filtered out before layout.

use std::collections::HashSet;

pub const CJK_UNIFIED_START: char = '\u{4E00}';
pub const CJK_UNIFIED_END: char = '\u{9FFF}';

/// Whether `ch` is eligible for grid placement
pub fn is_qualifying(ch: char) -> bool {
    (CJK_UNIFIED_START..=CJK_UNIFIED_END).contains(&ch)
}

/// Qualifying characters of `text`, in input order, duplicates kept
pub fn qualifying_chars(text: &str) -> Vec<char> {
    text.chars().filter(|&ch| is_qualifying(ch)).collect()
}

pub fn contains_qualifying(text: &str) -> bool {
    text.chars().any(is_qualifying)
}

/// Distinct qualifying characters in first-occurrence order
pub fn unique_qualifying_chars(text: &str) -> Vec<char> {
    let mut seen = HashSet::new();
    text.chars()
        .filter(|&ch| is_qualifying(ch) && seen.insert(ch))
        .collect()
}

/// "Clean Up": drop non-qualifying characters and repeats
pub fn sanitize_input(text: &str) -> String {
    unique_qualifying_chars(text).into_iter().collect()
}
