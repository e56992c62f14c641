//! Vector PDF export
//!
//! The driver in [`export`] talks to a [`VectorCanvas`]; [`PrintPdfCanvas`]
//! is the production backend and [`RecordingCanvas`] captures the primitives
//! for inspection.

pub mod canvas;
pub mod export;
pub mod printpdf_canvas;
pub mod recording;

pub use canvas::{Capabilities, FontId, RgbColor, StrokeStyle, TextAlign, TextBaseline, VectorCanvas};
pub use export::{
    export_document, export_pdf, resolve_fonts, save_document, FontSources, ResolvedFonts,
    EXPORT_FILE_NAME, GRID_COLOR,
};
pub use printpdf_canvas::PrintPdfCanvas;
pub use recording::{DrawOp, RecordingCanvas};
