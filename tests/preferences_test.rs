// Preference persistence through both stores

use practice_sheet_wasm::models::{GridStyle, LayoutParameters, TopSpacing, TraceOpacity};
use practice_sheet_wasm::preferences::{
    load_preferences, save_preferences, JsonFileStore, MemoryStore, PreferenceStore, PREFERENCES_KEY,
};

fn custom() -> LayoutParameters {
    LayoutParameters {
        trace_count: 0,
        rows_per_character: 5,
        show_pronunciation_header: false,
        grid_style: GridStyle::SquareGuide,
        top_spacing: TopSpacing::Medium,
        trace_opacity: TraceOpacity::Low,
    }
}

#[test]
fn test_memory_round_trip() {
    let mut store = MemoryStore::new();
    save_preferences(&mut store, &custom()).unwrap();
    assert_eq!(load_preferences(&store), custom());
}

#[test]
fn test_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let mut store = JsonFileStore::new(&path);
    save_preferences(&mut store, &custom()).unwrap();

    let reopened = JsonFileStore::new(&path);
    assert_eq!(load_preferences(&reopened), custom());
}

#[test]
fn test_persisted_field_names() {
    let mut store = MemoryStore::new();
    save_preferences(&mut store, &LayoutParameters::default()).unwrap();
    let raw: serde_json::Value = serde_json::from_str(&store.get(PREFERENCES_KEY).unwrap()).unwrap();
    assert_eq!(
        raw,
        serde_json::json!({
            "traceCount": 5,
            "rowsPerChar": 2,
            "showHeaderInfo": true,
            "gridType": "mi-zi-ge",
            "topSpacing": 5,
            "traceOpacity": "medium"
        })
    );
}

#[test]
fn test_partial_object_keeps_valid_fields() {
    let mut store = MemoryStore::new();
    store
        .set(PREFERENCES_KEY, r#"{"gridType": "empty", "topSpacing": 17}"#)
        .unwrap();
    let params = load_preferences(&store);
    assert_eq!(params.grid_style, GridStyle::Blank);
    assert_eq!(params.top_spacing, TopSpacing::Small);
    assert_eq!(params.trace_count, 5);
}

#[test]
fn test_garbage_never_fails_load() {
    let mut store = MemoryStore::new();
    store.set(PREFERENCES_KEY, "not json at all").unwrap();
    assert_eq!(load_preferences(&store), LayoutParameters::default());
}
