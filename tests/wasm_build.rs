//! WASM build test
//!
//! Exercises the JS-facing API in a browser (`wasm-pack test --headless`).

#![cfg(target_arch = "wasm32")]

use practice_sheet_wasm::api::helpers::timestamp_or_now;
use practice_sheet_wasm::api::{export_file_name, layout_options_js, sanitize_input_js, PracticeSheet};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_session_creation() {
    let sheet = PracticeSheet::new();
    assert!(sheet.view().is_ok());
}

#[wasm_bindgen_test]
fn test_tick_annotates_after_quiet_interval() {
    let mut sheet = PracticeSheet::new();
    sheet.edit("你好", Some(0.0)).unwrap();
    assert!(!sheet.tick(Some(100.0)));
    assert!(sheet.tick(Some(600.0)));
}

#[wasm_bindgen_test]
fn test_omitted_timestamp_uses_wall_clock() {
    let before = js_sys::Date::now();
    assert!(timestamp_or_now(None) >= before as u64);
    assert_eq!(timestamp_or_now(Some(42.0)), 42);

    // The edit is stamped with the current time, far past a zero timestamp
    let mut sheet = PracticeSheet::new();
    sheet.edit("你好", None).unwrap();
    assert!(!sheet.tick(Some(600.0)));
    assert!(!sheet.tick(None));
    assert!(sheet.tick(Some(js_sys::Date::now() + 600.0)));
}

#[wasm_bindgen_test]
fn test_generate_worksheet_produces_pdf() {
    let mut sheet = PracticeSheet::new();
    sheet.edit("你好", Some(0.0)).unwrap();
    sheet.tick(Some(600.0));

    let bytes = sheet.generate_worksheet().unwrap().unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[wasm_bindgen_test]
fn test_helpers() {
    assert_eq!(sanitize_input_js("a你b你好"), "你好");
    assert_eq!(export_file_name(), "chinese-worksheet.pdf");
    assert!(layout_options_js().unwrap().is_object());
}
