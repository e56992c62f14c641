//! In-memory canvas that records every primitive
//!
//! Used to inspect export output without a PDF backend, and to simulate
//! backends that lack optional capabilities or fail mid-document.

use super::canvas::{Capabilities, FontId, StrokeStyle, TextAlign, TextBaseline, VectorCanvas};
use crate::error::CanvasError;
use crate::renderers::display_list::{Point, Rect};
use serde::Serialize;

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawOp {
    RegisterFont { name: String, id: usize },
    SetFont { id: usize, size: f64 },
    SetTextGray { gray: u8 },
    SetStroke { color: [u8; 3], width: f64, dash: Option<[f64; 2]> },
    Line { from: Point, to: Point },
    StrokeRect { rect: Rect },
    Text { text: String, at: Point, centered: bool, middle: bool },
    NewPage,
}

#[derive(Debug, Default)]
pub struct RecordingCanvas {
    ops: Vec<DrawOp>,
    fonts: Vec<String>,
    capabilities: Capabilities,
    reject_fonts: bool,
    fail_after: Option<usize>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Make every font registration fail
    pub fn rejecting_fonts(mut self) -> Self {
        self.reject_fonts = true;
        self
    }

    /// Fail the drawing call made after `count` primitives were recorded
    pub fn failing_after(mut self, count: usize) -> Self {
        self.fail_after = Some(count);
        self
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn font_name(&self, id: FontId) -> Option<&str> {
        if id.0 == 0 {
            return Some("Helvetica");
        }
        self.fonts.get(id.0 - 1).map(String::as_str)
    }

    fn record(&mut self, op: DrawOp) -> Result<(), CanvasError> {
        if self.fail_after.is_some_and(|limit| self.ops.len() >= limit) {
            return Err(CanvasError::new(format!("simulated failure at {:?}", op)));
        }
        self.ops.push(op);
        Ok(())
    }
}

impl VectorCanvas for RecordingCanvas {
    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn builtin_font(&self) -> FontId {
        FontId(0)
    }

    fn register_font(&mut self, name: &str, bytes: &[u8]) -> Result<FontId, CanvasError> {
        if self.reject_fonts || bytes.is_empty() {
            return Err(CanvasError::new(format!("cannot load font {}", name)));
        }
        self.fonts.push(name.to_string());
        let id = self.fonts.len();
        self.record(DrawOp::RegisterFont {
            name: name.to_string(),
            id,
        })?;
        Ok(FontId(id))
    }

    fn set_font(&mut self, font: FontId, size: f64) -> Result<(), CanvasError> {
        self.record(DrawOp::SetFont { id: font.0, size })
    }

    fn set_text_gray(&mut self, gray: u8) -> Result<(), CanvasError> {
        self.record(DrawOp::SetTextGray { gray })
    }

    fn set_stroke(&mut self, style: StrokeStyle) -> Result<(), CanvasError> {
        let c = style.color;
        self.record(DrawOp::SetStroke {
            color: [c.r, c.g, c.b],
            width: style.width,
            dash: if self.capabilities.dashed_lines { style.dash } else { None },
        })
    }

    fn line(&mut self, from: Point, to: Point) -> Result<(), CanvasError> {
        self.record(DrawOp::Line { from, to })
    }

    fn stroke_rect(&mut self, rect: Rect) -> Result<(), CanvasError> {
        self.record(DrawOp::StrokeRect { rect })
    }

    fn text(
        &mut self,
        text: &str,
        at: Point,
        align: TextAlign,
        baseline: TextBaseline,
    ) -> Result<(), CanvasError> {
        if baseline == TextBaseline::Middle && !self.capabilities.middle_baseline {
            return Err(CanvasError::new("middle baseline not supported"));
        }
        self.record(DrawOp::Text {
            text: text.to_string(),
            at,
            centered: align == TextAlign::Center,
            middle: baseline == TextBaseline::Middle,
        })
    }

    fn new_page(&mut self) -> Result<(), CanvasError> {
        self.record(DrawOp::NewPage)
    }

    fn finish(self) -> Result<Vec<u8>, CanvasError> {
        serde_json::to_vec(&self.ops).map_err(|e| CanvasError::new(e.to_string()))
    }
}
