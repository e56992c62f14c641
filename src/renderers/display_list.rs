//! Display List for sheet rendering
//!
//! This module defines the drawable output of the grid renderer. The live
//! preview receives it as JSON; the PDF export walks the very same structure,
//! so both consumers place every line and glyph at identical coordinates.
//!
//! All coordinates are in points. Cell and header rectangles are relative to
//! the block's top-left corner; block offsets are relative to the page's
//! content area.

use super::layout_engine::BlockMetrics;
use crate::models::SequenceKey;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn top_right(&self) -> Point {
        Point::new(self.x + self.width, self.y)
    }

    pub fn bottom_left(&self) -> Point {
        Point::new(self.x, self.y + self.height)
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height)
    }
}

/// Which guide a line segment is
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum GuideKind {
    Vertical,
    Horizontal,
    /// Top-left to bottom-right
    Diagonal,
    /// Bottom-left to top-right
    AntiDiagonal,
}

/// One guide line inside a cell
///
/// The border is stroked solid as a rectangle; the inner guides are dashed
/// segments.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GuideLine {
    Border { rect: Rect },
    Guide { kind: GuideKind, from: Point, to: Point },
}

impl GuideLine {
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        match self {
            GuideLine::Border { rect } => GuideLine::Border {
                rect: rect.offset(dx, dy),
            },
            GuideLine::Guide { kind, from, to } => GuideLine::Guide {
                kind,
                from: from.offset(dx, dy),
                to: to.offset(dx, dy),
            },
        }
    }

    pub fn is_border(&self) -> bool {
        matches!(self, GuideLine::Border { .. })
    }
}

/// One grid cell with everything needed to draw it
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub rect: Rect,
    pub guide_lines: Vec<GuideLine>,
    pub glyph: Option<char>,
    /// 1.0 for the model character, the trace alpha for copies, 0.0 when empty
    pub glyph_opacity: f64,
}

impl Cell {
    /// Row-major position within the block
    pub fn index(&self, columns: usize) -> usize {
        self.row * columns + self.col
    }
}

/// Drawable form of one block
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RenderedBlock {
    pub key: SequenceKey,
    /// Pinyin band, present when headers are enabled
    pub header_band: Option<Rect>,
    pub header_text: Option<String>,
    pub cells: Vec<Cell>,
    pub height: f64,
}

/// A rendered block placed on a page
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlacedBlock {
    /// Offset of the block top from the content area top
    pub y: f64,
    pub block: RenderedBlock,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RenderedPage {
    pub index: usize,
    pub blocks: Vec<PlacedBlock>,
}

/// Everything the preview or the export needs to draw a sheet
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DisplayList {
    pub page_width: f64,
    pub page_height: f64,
    pub margin: f64,
    pub metrics: BlockMetrics,
    pub pages: Vec<RenderedPage>,
}
