//! Text handling for the character input
//!
//! - `hanzi`: which characters are placed on the grid, and the Clean Up sanitiser
//! - `input`: the 50-character capped input field and its notices

pub mod hanzi;
pub mod input;

pub use hanzi::{contains_qualifying, is_qualifying, qualifying_chars, sanitize_input, unique_qualifying_chars};
pub use input::{EditOutcome, InputField, Notice, NoticeKind, MAX_CHARACTERS};
