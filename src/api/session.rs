//! `PracticeSheet`: the stateful session exposed to the UI
//!
//! JS forwards input events and calls `tick` from a timer; the session decides
//! when annotation runs and when results are stale. Every `now` argument is
//! optional and defaults to `Date.now()`.

use super::core::font_sources;
use super::helpers::{deserialize, js_error, params_from_js, serialize, timestamp_or_now};
use super::storage::LocalStorageStore;
use crate::models::AnnotatedText;
use crate::pronunciation::Annotator;
use crate::renderers::pdf::export_pdf;
use crate::renderers::render_sheet;
use crate::session::SheetSession;
use crate::text::{EditOutcome, Notice};
use crate::{wasm_info, wasm_log, wasm_warn};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Snapshot of everything the controls need to redraw
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionView<'a> {
    text: &'a str,
    counter_label: String,
    limit_reached: bool,
    header_checkbox_label: &'static str,
    page_count_label: String,
    preview_updating: bool,
    annotating: bool,
    exporting: bool,
    export_button_label: &'static str,
    notice: Option<&'a Notice>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EditResult {
    accepted: bool,
    notice: Option<Notice>,
}

impl From<EditOutcome> for EditResult {
    fn from(outcome: EditOutcome) -> Self {
        match outcome {
            EditOutcome::Accepted => Self {
                accepted: true,
                notice: None,
            },
            EditOutcome::Rejected { notice } => Self {
                accepted: false,
                notice,
            },
        }
    }
}

#[wasm_bindgen]
pub struct PracticeSheet {
    session: SheetSession,
}

#[wasm_bindgen]
impl PracticeSheet {
    /// New session seeded from localStorage preferences
    #[wasm_bindgen(constructor)]
    pub fn new() -> PracticeSheet {
        let session = match LocalStorageStore::open() {
            Some(store) => SheetSession::from_store(&store),
            None => SheetSession::default(),
        };
        wasm_info!("PracticeSheet created");
        PracticeSheet { session }
    }

    pub fn edit(&mut self, value: &str, now: Option<f64>) -> Result<JsValue, JsValue> {
        let result = EditResult::from(self.session.edit(value, timestamp_or_now(now)));
        serialize(&result, "Failed to serialize edit result")
    }

    #[wasm_bindgen(js_name = compositionStart)]
    pub fn composition_start(&mut self) {
        self.session.composition_start();
    }

    #[wasm_bindgen(js_name = compositionEnd)]
    pub fn composition_end(&mut self, value: &str, now: Option<f64>) -> Result<JsValue, JsValue> {
        let result = EditResult::from(self.session.composition_end(value, timestamp_or_now(now)));
        serialize(&result, "Failed to serialize edit result")
    }

    /// Clean Up button; returns the new input value
    pub fn sanitize(&mut self, now: Option<f64>) -> String {
        self.session.sanitize(timestamp_or_now(now));
        self.session.input().value().to_string()
    }

    /// Hand out an annotation request once the input has settled
    pub fn poll(&mut self, now: Option<f64>) -> Result<JsValue, JsValue> {
        serialize(&self.session.poll(timestamp_or_now(now)), "Failed to serialize request")
    }

    /// Apply an externally computed annotation; false if it was stale
    #[wasm_bindgen(js_name = commitAnnotation)]
    pub fn commit_annotation(&mut self, generation: f64, annotated: JsValue) -> Result<bool, JsValue> {
        let annotated: AnnotatedText = deserialize(annotated, "Invalid annotation")?;
        Ok(self.session.commit_annotation(generation as u64, annotated))
    }

    /// Poll and, when a request comes out, annotate with the bundled dictionary
    ///
    /// Returns true when the preview should be redrawn.
    pub fn tick(&mut self, now: Option<f64>) -> bool {
        let Some(request) = self.session.poll(timestamp_or_now(now)) else {
            return false;
        };
        let annotated = Annotator::with_default_dictionary().annotate(&request.text);
        self.session.commit_annotation(request.generation, annotated)
    }

    #[wasm_bindgen(js_name = setParams)]
    pub fn set_params(&mut self, params: JsValue) -> Result<(), JsValue> {
        let params = params_from_js(params)?;
        self.session.set_params(params);
        Ok(())
    }

    pub fn params(&self) -> Result<JsValue, JsValue> {
        serialize(self.session.params(), "Failed to serialize params")
    }

    pub fn annotation(&self) -> Result<JsValue, JsValue> {
        serialize(self.session.annotation(), "Failed to serialize annotation")
    }

    pub fn layout(&self) -> Result<JsValue, JsValue> {
        serialize(&self.session.layout(), "Failed to serialize layout")
    }

    #[wasm_bindgen(js_name = displayList)]
    pub fn display_list(&self) -> Result<JsValue, JsValue> {
        let layout = self.session.layout();
        let list = render_sheet(&layout.pages, self.session.params());
        serialize(&list, "Failed to serialize display list")
    }

    pub fn view(&self) -> Result<JsValue, JsValue> {
        let input = self.session.input();
        let view = SessionView {
            text: input.value(),
            counter_label: input.counter_label(),
            limit_reached: input.is_limit_reached(),
            header_checkbox_label: self.session.header_checkbox_label(),
            page_count_label: self.session.layout().page_count_label(),
            preview_updating: self.session.is_preview_updating(),
            annotating: self.session.is_annotating(),
            exporting: self.session.is_exporting(),
            export_button_label: self.session.export_button_label(),
            notice: self.session.notice(),
        };
        serialize(&view, "Failed to serialize view")
    }

    /// Generate the worksheet PDF
    ///
    /// `undefined` when an export is already running or there is nothing to
    /// draw.
    #[wasm_bindgen(js_name = generateWorksheet)]
    pub fn generate_worksheet(&mut self) -> Result<Option<Vec<u8>>, JsValue> {
        let Some(ticket) = self.session.begin_export() else {
            wasm_log!("generateWorksheet: nothing to do");
            return Ok(None);
        };
        let result = export_pdf(&ticket.pages, &ticket.params, &font_sources());
        self.session.finish_export(ticket);
        result.map_err(|e| js_error("Vector PDF generation failed", e))
    }

    #[wasm_bindgen(js_name = saveSettings)]
    pub fn save_settings(&mut self) -> Result<(), JsValue> {
        let Some(mut store) = LocalStorageStore::open() else {
            wasm_warn!("localStorage unavailable; settings not saved");
            return Err(JsValue::from_str("localStorage unavailable"));
        };
        self.session
            .save_preferences(&mut store)
            .map_err(|e| js_error("Could not save preferences", e))
    }

    #[wasm_bindgen(js_name = dismissNotice)]
    pub fn dismiss_notice(&mut self) {
        self.session.dismiss_notice();
    }
}

impl Default for PracticeSheet {
    fn default() -> Self {
        Self::new()
    }
}
