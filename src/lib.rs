//! Practice Sheet WASM Module
//!
//! Generates printable Chinese handwriting practice sheets: pinyin
//! annotation of the input text, pagination into fixed-height blocks, the
//! grid display list shared by the live preview and the PDF export.

pub mod error;
pub mod models;
pub mod text;
pub mod pronunciation;
pub mod renderers;
pub mod session;
pub mod preferences;
pub mod api;

// Re-export commonly used types
pub use error::{CanvasError, DictionaryError, ExportError, LookupError, PreferencesError};
pub use models::*;
pub use pronunciation::{Annotator, Dictionary, PronunciationLookup};
pub use renderers::{paginate, render_block, render_sheet, DisplayList, LayoutEngine, SheetLayout};
pub use session::{AnnotationRequest, ExportTicket, SheetSession};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        crate::wasm_warn!("Logger already initialized: {}", e);
    }

    log::info!("Practice Sheet WASM module initialized");
}
