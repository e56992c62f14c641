//! Worksheet session state machine
//!
//! Owns everything between keystrokes and pages: the capped input field, the
//! debounced text the preview is built from, the latest accepted annotation,
//! the layout parameters, the single-flight export guard and the current
//! notice.
//!
//! Annotation runs outside the session. [`SheetSession::poll`] hands out an
//! [`AnnotationRequest`] tagged with a generation number, and
//! [`SheetSession::commit_annotation`] only applies a result whose generation
//! is still the newest one issued.

use super::debounce::Debouncer;
use crate::error::PreferencesError;
use crate::models::{AnnotatedText, LayoutParameters, Page};
use crate::preferences::{load_preferences, save_preferences, PreferenceStore};
use crate::renderers::{LayoutEngine, SheetLayout};
use crate::text::{contains_qualifying, qualifying_chars, sanitize_input, EditOutcome, InputField, Notice};
use serde::{Deserialize, Serialize};

/// Text to annotate, tagged with the generation it belongs to
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AnnotationRequest {
    pub generation: u64,
    pub text: String,
}

/// Proof that an export was started; hand it back to `finish_export`
#[derive(Clone, Debug, PartialEq)]
pub struct ExportTicket {
    id: u64,
    pub pages: Vec<Page>,
    pub params: LayoutParameters,
}

impl ExportTicket {
    pub fn id(&self) -> u64 {
        self.id
    }
}

#[derive(Debug)]
pub struct SheetSession {
    input: InputField,
    debouncer: Debouncer,
    /// Text the preview and the annotation are based on
    debounced: String,
    /// Newest generation handed out
    generation: u64,
    /// Generation of the annotation currently applied
    applied_generation: u64,
    annotated: AnnotatedText,
    params: LayoutParameters,
    engine: LayoutEngine,
    export_in_flight: Option<u64>,
    next_export_id: u64,
    notice: Option<Notice>,
}

impl SheetSession {
    pub fn new(params: LayoutParameters) -> Self {
        Self {
            input: InputField::new(),
            debouncer: Debouncer::default(),
            debounced: String::new(),
            generation: 0,
            applied_generation: 0,
            annotated: AnnotatedText::default(),
            params: params.normalized(),
            engine: LayoutEngine::new(),
            export_in_flight: None,
            next_export_id: 1,
            notice: None,
        }
    }

    /// Session seeded with stored preferences
    pub fn from_store<S: PreferenceStore>(store: &S) -> Self {
        Self::new(load_preferences(store))
    }

    /// Replace the default quiet interval
    pub fn with_debouncer(mut self, debouncer: Debouncer) -> Self {
        self.debouncer = debouncer;
        self
    }

    // ========================================================================
    // Input
    // ========================================================================

    pub fn input(&self) -> &InputField {
        &self.input
    }

    pub fn debounced_text(&self) -> &str {
        &self.debounced
    }

    /// Offer a new input value at time `now` (ms)
    pub fn edit(&mut self, value: &str, now: u64) -> EditOutcome {
        let outcome = self.input.apply_edit(value);
        match &outcome {
            EditOutcome::Accepted => {
                if self.notice.as_ref().is_some_and(Notice::is_error) {
                    self.notice = None;
                }
                self.debouncer.touch(now);
            }
            EditOutcome::Rejected { notice: Some(notice) } => {
                self.notice = Some(notice.clone());
            }
            EditOutcome::Rejected { notice: None } => {}
        }
        outcome
    }

    pub fn composition_start(&mut self) {
        self.debouncer.composition_start();
    }

    /// End IME composition with the committed field value
    pub fn composition_end(&mut self, value: &str, now: u64) -> EditOutcome {
        self.debouncer.composition_end(now);
        self.edit(value, now)
    }

    pub fn is_composing(&self) -> bool {
        self.debouncer.is_composing()
    }

    /// Replace the input with its unique hanzi (the Clean Up button)
    pub fn sanitize(&mut self, now: u64) -> EditOutcome {
        let cleaned = sanitize_input(self.input.value());
        self.edit(&cleaned, now)
    }

    /// Advance the clock; returns a request when the input has settled
    pub fn poll(&mut self, now: u64) -> Option<AnnotationRequest> {
        if !self.debouncer.fire(now) {
            return None;
        }
        if self.input.value() == self.debounced {
            return None;
        }
        self.debounced = self.input.value().to_string();
        Some(self.request_annotation())
    }

    /// Issue a request for the current debounced text, superseding older ones
    pub fn request_annotation(&mut self) -> AnnotationRequest {
        self.generation += 1;
        log::debug!("Annotation generation {} issued", self.generation);
        AnnotationRequest {
            generation: self.generation,
            text: self.debounced.clone(),
        }
    }

    /// Apply an annotation result if it is still the newest
    pub fn commit_annotation(&mut self, generation: u64, result: AnnotatedText) -> bool {
        if generation != self.generation {
            log::debug!(
                "Dropping stale annotation generation {} (latest {})",
                generation,
                self.generation
            );
            return false;
        }
        self.annotated = result;
        self.applied_generation = generation;
        true
    }

    pub fn annotation(&self) -> &AnnotatedText {
        &self.annotated
    }

    /// An issued annotation has not come back yet
    pub fn is_annotating(&self) -> bool {
        self.applied_generation != self.generation
    }

    /// Raw input is ahead of the preview and no composition is running
    pub fn is_preview_updating(&self) -> bool {
        self.input.value() != self.debounced && !self.is_composing()
    }

    pub fn header_checkbox_label(&self) -> &'static str {
        if contains_qualifying(self.input.value()) {
            "Show Pinyin"
        } else {
            "Pinyin Space"
        }
    }

    // ========================================================================
    // Layout
    // ========================================================================

    pub fn params(&self) -> &LayoutParameters {
        &self.params
    }

    pub fn set_params(&mut self, params: LayoutParameters) {
        self.params = params.normalized();
    }

    /// Pages for the debounced text and the applied annotation
    pub fn layout(&self) -> SheetLayout {
        let chars = qualifying_chars(&self.debounced);
        self.engine
            .compute_layout(&chars, &self.annotated.per_unique_char, &self.params)
    }

    // ========================================================================
    // Export
    // ========================================================================

    /// Start an export, unless one is running or there is nothing to draw
    pub fn begin_export(&mut self) -> Option<ExportTicket> {
        if let Some(id) = self.export_in_flight {
            log::debug!("Export {} already in flight; ignoring request", id);
            return None;
        }
        let layout = self.layout();
        if layout.pages.is_empty() {
            return None;
        }

        let id = self.next_export_id;
        self.next_export_id += 1;
        self.export_in_flight = Some(id);
        Some(ExportTicket {
            id,
            pages: layout.pages,
            params: self.params,
        })
    }

    /// Clear the in-flight flag, whether the export succeeded or not
    pub fn finish_export(&mut self, ticket: ExportTicket) {
        if self.export_in_flight == Some(ticket.id) {
            self.export_in_flight = None;
        } else {
            log::warn!("Unknown export ticket {}", ticket.id);
        }
    }

    pub fn is_exporting(&self) -> bool {
        self.export_in_flight.is_some()
    }

    pub fn export_button_label(&self) -> &'static str {
        if self.is_exporting() {
            "Generating..."
        } else {
            "Generate Worksheet"
        }
    }

    // ========================================================================
    // Preferences and notices
    // ========================================================================

    pub fn save_preferences<S: PreferenceStore>(
        &mut self,
        store: &mut S,
    ) -> Result<(), PreferencesError> {
        save_preferences(store, &self.params)?;
        self.notice = Some(Notice::settings_saved());
        Ok(())
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}

impl Default for SheetSession {
    fn default() -> Self {
        Self::new(LayoutParameters::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::MemoryStore;

    #[test]
    fn test_edit_then_settle_issues_request() {
        let mut session = SheetSession::default();
        session.edit("你好", 0);
        assert!(session.is_preview_updating());
        assert_eq!(session.poll(499), None);

        let request = session.poll(500).unwrap();
        assert_eq!(request.text, "你好");
        assert_eq!(request.generation, 1);
        assert!(!session.is_preview_updating());
    }

    #[test]
    fn test_custom_debouncer_shortens_quiet_interval() {
        let mut session = SheetSession::default().with_debouncer(Debouncer::new(100));
        session.edit("好", 0);
        assert_eq!(session.poll(99), None);
        assert_eq!(session.poll(100).map(|r| r.text), Some("好".to_string()));
    }

    #[test]
    fn test_unchanged_text_issues_nothing() {
        let mut session = SheetSession::default();
        session.edit("", 0);
        assert_eq!(session.poll(1_000), None);
    }

    #[test]
    fn test_limit_notice_cleared_by_next_accepted_edit() {
        let mut session = SheetSession::default();
        session.edit(&"字".repeat(50), 0);
        session.edit(&"字".repeat(51), 10);
        assert!(session.notice().unwrap().is_error());
        session.edit(&"字".repeat(49), 20);
        assert_eq!(session.notice(), None);
    }

    #[test]
    fn test_save_preferences_raises_success_notice() {
        let mut store = MemoryStore::new();
        let mut session = SheetSession::default();
        session.save_preferences(&mut store).unwrap();
        assert_eq!(session.notice(), Some(&Notice::settings_saved()));
        assert!(store.get(crate::preferences::PREFERENCES_KEY).is_some());
    }

    #[test]
    fn test_header_label_follows_raw_input() {
        let mut session = SheetSession::default();
        assert_eq!(session.header_checkbox_label(), "Pinyin Space");
        session.edit("abc 好", 0);
        assert_eq!(session.header_checkbox_label(), "Show Pinyin");
    }

    #[test]
    fn test_sanitize_keeps_unique_hanzi() {
        let mut session = SheetSession::default();
        session.edit("你好 hello 你", 0);
        session.sanitize(10);
        assert_eq!(session.input().value(), "你好");
    }
}
