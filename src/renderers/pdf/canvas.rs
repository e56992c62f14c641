//! Vector-drawing collaborator interface
//!
//! Coordinates are points with the origin at the page's top-left corner and
//! y growing downwards. Backends with a different origin flip internally.

use crate::error::CanvasError;
use crate::renderers::display_list::{Point, Rect};

/// Handle to a font known to the canvas
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FontId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextBaseline {
    Alphabetic,
    Middle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Line style for subsequent strokes
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    pub color: RgbColor,
    pub width: f64,
    /// `[dash, gap]` in points; `None` is solid
    pub dash: Option<[f64; 2]>,
}

/// Optional features of a backend
///
/// Queried once per export; the driver picks its fallbacks from this rather
/// than probing the backend on every call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    /// Can embed fonts from raw TTF/OTF bytes
    pub custom_fonts: bool,
    /// Honors `StrokeStyle::dash`
    pub dashed_lines: bool,
    /// Supports `TextBaseline::Middle`
    pub middle_baseline: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            custom_fonts: true,
            dashed_lines: true,
            middle_baseline: true,
        }
    }
}

pub trait VectorCanvas {
    fn capabilities(&self) -> Capabilities;

    /// The built-in fallback font (Helvetica)
    fn builtin_font(&self) -> FontId;

    fn register_font(&mut self, name: &str, bytes: &[u8]) -> Result<FontId, CanvasError>;

    fn set_font(&mut self, font: FontId, size: f64) -> Result<(), CanvasError>;

    /// Text fill as 8-bit gray (0 black, 255 white)
    fn set_text_gray(&mut self, gray: u8) -> Result<(), CanvasError>;

    fn set_stroke(&mut self, style: StrokeStyle) -> Result<(), CanvasError>;

    fn line(&mut self, from: Point, to: Point) -> Result<(), CanvasError>;

    /// Stroke-only rectangle
    fn stroke_rect(&mut self, rect: Rect) -> Result<(), CanvasError>;

    fn text(
        &mut self,
        text: &str,
        at: Point,
        align: TextAlign,
        baseline: TextBaseline,
    ) -> Result<(), CanvasError>;

    fn new_page(&mut self) -> Result<(), CanvasError>;

    /// Serialize the finished document
    fn finish(self) -> Result<Vec<u8>, CanvasError>
    where
        Self: Sized;
}
