//! Models module for the practice sheet generator
//!
//! This module contains the data structures shared by the annotator,
//! the layout engine and the renderers.

pub mod annotation;
pub mod block;
pub mod params;

// Re-export commonly used types
pub use annotation::{AnnotatedText, CharacterAnnotation, PositionAnnotation};
pub use block::{Block, BlockKind, Page, SequenceKey};
pub use params::{
    layout_options, GridStyle, LayoutOption, LayoutOptions, LayoutParameters, TopSpacing, TraceOpacity,
};
