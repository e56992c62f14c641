//! Renderers module for practice sheets
//!
//! Pagination, the per-block grid renderer, and the PDF export that replays
//! the rendered display list.

pub mod display_list;
pub mod font_utils;
pub mod grid;
pub mod layout_engine;
pub mod pdf;

// Re-export commonly used types
pub use display_list::{Cell, DisplayList, GuideKind, GuideLine, PlacedBlock, Point, Rect, RenderedBlock, RenderedPage};
pub use grid::{render_block, render_sheet};
pub use layout_engine::{paginate, BlockMetrics, LayoutEngine, SheetLayout};
