//! Length-capped character input field
//!
//! Mirrors the textarea behaviour: edits that would push the value past
//! [`MAX_CHARACTERS`] are refused outright rather than truncated, and the
//! limit notice is raised only when the user is actually growing the text.

use serde::{Deserialize, Serialize};

/// Maximum number of Unicode scalars accepted in the input
pub const MAX_CHARACTERS: usize = 50;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient toast message
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
}

impl Notice {
    pub fn limit_reached() -> Self {
        Self {
            text: format!("{} Characters Max", MAX_CHARACTERS),
            kind: NoticeKind::Error,
        }
    }

    pub fn settings_saved() -> Self {
        Self {
            text: "Settings Saved".to_string(),
            kind: NoticeKind::Success,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// Result of offering a new value to the field
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    Accepted,
    /// The value was refused; `notice` is set when a limit toast should appear
    Rejected { notice: Option<Notice> },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputField {
    value: String,
    len: usize,
}

impl InputField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Length in Unicode scalars
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn apply_edit(&mut self, new_value: &str) -> EditOutcome {
        let new_len = new_value.chars().count();
        if new_len <= MAX_CHARACTERS {
            self.value = new_value.to_string();
            self.len = new_len;
            return EditOutcome::Accepted;
        }

        let notice = (new_len > self.len).then(Notice::limit_reached);
        EditOutcome::Rejected { notice }
    }

    pub fn is_limit_reached(&self) -> bool {
        self.len >= MAX_CHARACTERS
    }

    pub fn counter_label(&self) -> String {
        format!("{} / {} Characters", self.len, MAX_CHARACTERS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fifty() -> String {
        "字".repeat(MAX_CHARACTERS)
    }

    #[test]
    fn test_accepts_up_to_limit() {
        let mut field = InputField::new();
        assert_eq!(field.apply_edit(&fifty()), EditOutcome::Accepted);
        assert_eq!(field.len(), 50);
        assert!(field.is_limit_reached());
        assert_eq!(field.counter_label(), "50 / 50 Characters");
    }

    #[test]
    fn test_rejects_51st_character_with_notice() {
        let mut field = InputField::new();
        field.apply_edit(&fifty());
        let outcome = field.apply_edit(&format!("{}好", fifty()));
        assert_eq!(
            outcome,
            EditOutcome::Rejected {
                notice: Some(Notice::limit_reached())
            }
        );
        assert_eq!(field.len(), 50);
        assert_eq!(Notice::limit_reached().text, "50 Characters Max");
    }

    #[test]
    fn test_shrinking_oversized_value_is_silent() {
        // Deleting from a value that is somehow over the cap is still refused,
        // but without a toast.
        let mut field = InputField::new();
        field.len = 60;
        let outcome = field.apply_edit(&"字".repeat(55));
        assert_eq!(outcome, EditOutcome::Rejected { notice: None });
    }

    #[test]
    fn test_counts_scalars_not_bytes() {
        let mut field = InputField::new();
        field.apply_edit("你好");
        assert_eq!(field.len(), 2);
    }
}
