//! Persisted layout preferences
//!
//! The six [`LayoutParameters`] fields are stored as one JSON object under
//! [`PREFERENCES_KEY`]. Loading is tolerant: each field that is missing, of
//! the wrong type, or out of range falls back to its own default, and the
//! rest of the object is still used.

pub mod store;

pub use store::{JsonFileStore, MemoryStore, PreferenceStore};

use crate::error::PreferencesError;
use crate::models::params::{MAX_ROWS_PER_CHAR, MAX_TRACE_COUNT, MIN_ROWS_PER_CHAR};
use crate::models::{GridStyle, LayoutParameters, TopSpacing, TraceOpacity};
use serde_json::{Map, Value};

pub const PREFERENCES_KEY: &str = "practiceSheetPreferences";

pub fn save_preferences<S: PreferenceStore>(
    store: &mut S,
    params: &LayoutParameters,
) -> Result<(), PreferencesError> {
    let body = serde_json::to_string(params)?;
    store.set(PREFERENCES_KEY, &body)?;
    log::debug!("Saved preferences: {}", body);
    Ok(())
}

/// Load preferences, never failing
pub fn load_preferences<S: PreferenceStore>(store: &S) -> LayoutParameters {
    parse_preferences(store.get(PREFERENCES_KEY).as_deref())
}

/// Parse a stored preference object field by field
pub fn parse_preferences(raw: Option<&str>) -> LayoutParameters {
    let defaults = LayoutParameters::default();
    let Some(raw) = raw else {
        return defaults;
    };

    let fields = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(fields)) => fields,
        Ok(_) => {
            log::warn!("Stored preferences are not an object; using defaults");
            return defaults;
        }
        Err(e) => {
            log::warn!("Could not parse saved preferences: {}", e);
            return defaults;
        }
    };

    LayoutParameters {
        trace_count: field(&fields, "traceCount", defaults.trace_count, |v| {
            v.as_u64()
                .filter(|n| *n <= MAX_TRACE_COUNT as u64)
                .map(|n| n as u8)
        }),
        rows_per_character: field(&fields, "rowsPerChar", defaults.rows_per_character, |v| {
            v.as_u64()
                .filter(|n| (MIN_ROWS_PER_CHAR as u64..=MAX_ROWS_PER_CHAR as u64).contains(n))
                .map(|n| n as u8)
        }),
        show_pronunciation_header: field(
            &fields,
            "showHeaderInfo",
            defaults.show_pronunciation_header,
            Value::as_bool,
        ),
        grid_style: field(&fields, "gridType", defaults.grid_style, |v| {
            v.as_str().and_then(GridStyle::from_key)
        }),
        top_spacing: field(&fields, "topSpacing", defaults.top_spacing, |v| {
            v.as_u64().and_then(TopSpacing::from_points)
        }),
        trace_opacity: field(&fields, "traceOpacity", defaults.trace_opacity, |v| {
            v.as_str().and_then(TraceOpacity::from_key)
        }),
    }
}

fn field<T: std::fmt::Debug>(
    fields: &Map<String, Value>,
    name: &str,
    default: T,
    parse: impl Fn(&Value) -> Option<T>,
) -> T {
    match fields.get(name) {
        None | Some(Value::Null) => default,
        Some(value) => parse(value).unwrap_or_else(|| {
            log::debug!("Preference {} = {} is invalid; using {:?}", name, value, default);
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_entry_gives_defaults() {
        assert_eq!(parse_preferences(None), LayoutParameters::default());
        assert_eq!(parse_preferences(Some("[]")), LayoutParameters::default());
        assert_eq!(parse_preferences(Some("{oops")), LayoutParameters::default());
    }

    #[test]
    fn test_bad_fields_fall_back_individually() {
        let raw = r#"{"traceCount": 99, "rowsPerChar": 3, "gridType": "hexagon",
                      "topSpacing": 60, "traceOpacity": "high", "showHeaderInfo": "yes"}"#;
        let params = parse_preferences(Some(raw));
        assert_eq!(params.trace_count, 5);
        assert_eq!(params.rows_per_character, 3);
        assert_eq!(params.grid_style, GridStyle::DiamondGuide);
        assert_eq!(params.top_spacing, TopSpacing::Large);
        assert_eq!(params.trace_opacity, TraceOpacity::High);
        assert!(params.show_pronunciation_header);
    }

    #[test]
    fn test_null_field_uses_default() {
        let params = parse_preferences(Some(r#"{"traceCount": null, "rowsPerChar": 1}"#));
        assert_eq!(params.trace_count, 5);
        assert_eq!(params.rows_per_character, 1);
    }
}
