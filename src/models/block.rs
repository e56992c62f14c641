//! Blocks and pages produced by the layout engine

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// A real character occurrence from the input
    Character,
    /// Filler that pads the last page
    Blank,
}

/// Stable identity of a block across recomputations
///
/// Character blocks are keyed by their occurrence index, so repeated
/// characters still get distinct keys.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SequenceKey {
    Char { ch: char, index: usize },
    Blank { page: usize, slot: usize },
}

impl fmt::Display for SequenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceKey::Char { ch, index } => write!(f, "char-{}-{}", ch, index),
            SequenceKey::Blank { page, slot } => write!(f, "empty-{}-{}", page, slot),
        }
    }
}

/// One placement unit on a page
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub char: Option<char>,

    /// Header text (every known reading, comma separated)
    pub pronunciation: Option<String>,

    pub key: SequenceKey,
}

impl Block {
    pub fn character(ch: char, index: usize, pronunciation: Option<String>) -> Self {
        Self {
            kind: BlockKind::Character,
            char: Some(ch),
            pronunciation,
            key: SequenceKey::Char { ch, index },
        }
    }

    pub fn blank(page: usize, slot: usize) -> Self {
        Self {
            kind: BlockKind::Blank,
            char: None,
            pronunciation: None,
            key: SequenceKey::Blank { page, slot },
        }
    }

    pub fn is_character(&self) -> bool {
        self.kind == BlockKind::Character
    }

    /// Glyph drawn in the grid, only for character blocks
    pub fn glyph(&self) -> Option<char> {
        match self.kind {
            BlockKind::Character => self.char,
            BlockKind::Blank => None,
        }
    }

    /// Non-blank header text, if any
    pub fn header_text(&self) -> Option<&str> {
        self.pronunciation
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}

/// Ordered blocks that fit in one page's content area
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct Page {
    pub blocks: Vec<Block>,
}

impl Page {
    pub fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn characters(&self) -> impl Iterator<Item = char> + '_ {
        self.blocks.iter().filter_map(Block::glyph)
    }

    pub fn has_glyphs(&self) -> bool {
        self.blocks.iter().any(|block| block.glyph().is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_keys_format() {
        assert_eq!(Block::character('你', 3, None).key.to_string(), "char-你-3");
        assert_eq!(Block::blank(1, 4).key.to_string(), "empty-1-4");
    }

    #[test]
    fn test_blank_block_has_no_glyph() {
        let block = Block::blank(0, 0);
        assert!(!block.is_character());
        assert_eq!(block.glyph(), None);
        assert_eq!(block.header_text(), None);
    }

    #[test]
    fn test_whitespace_header_is_ignored() {
        let block = Block::character('好', 0, Some("  ".to_string()));
        assert_eq!(block.header_text(), None);
    }
}
