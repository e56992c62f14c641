//! Stateless WASM API
//!
//! Each function is a pure step of the pipeline: annotate, lay out, render,
//! export. Font bytes are fetched by JS once and kept here for later exports.

use super::helpers::{deserialize, js_error, params_from_js, serialize};
use super::storage::LocalStorageStore;
use crate::models::{layout_options, Block, CharacterAnnotation, Page};
use crate::preferences::{load_preferences, parse_preferences, save_preferences};
use crate::pronunciation::Annotator;
use crate::renderers::pdf::{export_pdf, FontSources, EXPORT_FILE_NAME};
use crate::renderers::{render_block, render_sheet, LayoutEngine};
use crate::text::{qualifying_chars, sanitize_input};
use crate::{wasm_info, wasm_log, wasm_warn};
use lazy_static::lazy_static;
use std::collections::BTreeMap;
use std::sync::Mutex;
use wasm_bindgen::prelude::*;

// Font bytes supplied by the page, reused by every export
lazy_static! {
    static ref FONTS: Mutex<FontSources> = Mutex::new(FontSources::default());
}

pub(crate) fn font_sources() -> FontSources {
    match FONTS.lock() {
        Ok(fonts) => fonts.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Provide TTF bytes for the hanzi and pinyin fonts (either may be omitted)
#[wasm_bindgen(js_name = registerFonts)]
pub fn register_fonts(glyph_font: Option<Vec<u8>>, pinyin_font: Option<Vec<u8>>) {
    wasm_info!(
        "registerFonts: glyph={} bytes, pinyin={} bytes",
        glyph_font.as_ref().map_or(0, Vec::len),
        pinyin_font.as_ref().map_or(0, Vec::len)
    );
    let mut fonts = match FONTS.lock() {
        Ok(fonts) => fonts,
        Err(poisoned) => poisoned.into_inner(),
    };
    fonts.glyph_font = glyph_font;
    fonts.pronunciation_font = pinyin_font;
}

/// Annotate text with the bundled dictionary
#[wasm_bindgen(js_name = annotateText)]
pub fn annotate_text(text: &str) -> Result<JsValue, JsValue> {
    wasm_log!("annotateText: {} chars", text.chars().count());
    let annotated = Annotator::with_default_dictionary().annotate(text);
    serialize(&annotated, "Failed to serialize annotation")
}

/// Paginate `text` into pages of character and blank blocks
///
/// `annotations` is the per-character map from `annotateText`
/// (`perUniqueChar`); pass `undefined` to lay out without pinyin.
#[wasm_bindgen(js_name = layoutSheet)]
pub fn layout_sheet(text: &str, annotations: JsValue, params: JsValue) -> Result<JsValue, JsValue> {
    let params = params_from_js(params)?;
    let annotations: BTreeMap<char, CharacterAnnotation> =
        if annotations.is_undefined() || annotations.is_null() {
            BTreeMap::new()
        } else {
            deserialize(annotations, "Invalid annotations")?
        };

    let layout = LayoutEngine::new().compute_layout(&qualifying_chars(text), &annotations, &params);
    wasm_log!("layoutSheet: {}", layout.page_count_label());
    serialize(&layout, "Failed to serialize layout")
}

#[wasm_bindgen(js_name = renderBlock)]
pub fn render_block_js(block: JsValue, params: JsValue) -> Result<JsValue, JsValue> {
    let block: Block = deserialize(block, "Invalid block")?;
    let params = params_from_js(params)?;
    serialize(&render_block(&block, &params), "Failed to serialize block")
}

#[wasm_bindgen(js_name = renderSheet)]
pub fn render_sheet_js(pages: JsValue, params: JsValue) -> Result<JsValue, JsValue> {
    let pages: Vec<Page> = deserialize(pages, "Invalid pages")?;
    let params = params_from_js(params)?;
    serialize(&render_sheet(&pages, &params), "Failed to serialize display list")
}

/// Export pages to PDF bytes; `undefined` when there is nothing to export
#[wasm_bindgen(js_name = exportWorksheet)]
pub fn export_worksheet(pages: JsValue, params: JsValue) -> Result<Option<Vec<u8>>, JsValue> {
    let pages: Vec<Page> = deserialize(pages, "Invalid pages")?;
    let params = params_from_js(params)?;
    export_pdf(&pages, &params, &font_sources()).map_err(|e| js_error("Vector PDF generation failed", e))
}

#[wasm_bindgen(js_name = exportFileName)]
pub fn export_file_name() -> String {
    EXPORT_FILE_NAME.to_string()
}

/// Values and labels for the grid, spacing and opacity pickers
#[wasm_bindgen(js_name = layoutOptions)]
pub fn layout_options_js() -> Result<JsValue, JsValue> {
    serialize(&layout_options(), "Failed to serialize layout options")
}

/// Clean Up: keep the first occurrence of each hanzi
#[wasm_bindgen(js_name = sanitizeInput)]
pub fn sanitize_input_js(text: &str) -> String {
    sanitize_input(text)
}

/// Load preferences from localStorage, defaulting field by field
#[wasm_bindgen(js_name = loadPreferences)]
pub fn load_preferences_js() -> Result<JsValue, JsValue> {
    let params = match LocalStorageStore::open() {
        Some(store) => load_preferences(&store),
        None => {
            wasm_warn!("localStorage unavailable; using default preferences");
            parse_preferences(None)
        }
    };
    serialize(&params, "Failed to serialize preferences")
}

#[wasm_bindgen(js_name = savePreferences)]
pub fn save_preferences_js(params: JsValue) -> Result<(), JsValue> {
    let params = params_from_js(params)?;
    let mut store = LocalStorageStore::open()
        .ok_or_else(|| js_error("Could not save preferences", "localStorage unavailable"))?;
    save_preferences(&mut store, &params).map_err(|e| js_error("Could not save preferences", e))
}
