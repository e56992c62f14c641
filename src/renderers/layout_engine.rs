//! Layout Engine - paginates character blocks onto fixed-size pages
//!
//! This module contains the page geometry shared by the preview and the PDF
//! export, and the greedy pagination that partitions a character sequence
//! into pages of equal-height blocks.

use crate::models::{Block, CharacterAnnotation, LayoutParameters, Page};
use crate::text::is_qualifying;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Page Geometry (points)
// ============================================================================

/// US Letter, 8.5in x 11in
pub const PAGE_WIDTH_PT: f64 = 8.5 * 72.0;
pub const PAGE_HEIGHT_PT: f64 = 11.0 * 72.0;

pub const MARGIN_PT: f64 = 18.0;
pub const CONTENT_WIDTH_PT: f64 = PAGE_WIDTH_PT - MARGIN_PT * 2.0;
pub const CONTENT_HEIGHT_PT: f64 = PAGE_HEIGHT_PT - MARGIN_PT * 2.0;

/// Height of the pinyin band above a block's grid
pub const HEADER_AREA_HEIGHT_PT: f64 = 15.0;

/// Grid cells per row; preview and export both depend on this
pub const GRIDS_PER_ROW: usize = 11;

pub const GRID_BORDER_WIDTH_PT: f64 = 0.5;
pub const GRID_BOX_WIDTH_PT: f64 = CONTENT_WIDTH_PT / GRIDS_PER_ROW as f64;
pub const GRID_BOX_HEIGHT_PT: f64 =
    (CONTENT_WIDTH_PT - 2.0 * GRID_BORDER_WIDTH_PT) / GRIDS_PER_ROW as f64;

/// Vertical measurements of one block, derived once per layout
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlockMetrics {
    pub top_spacing: f64,
    /// Zero when the header band is hidden
    pub header_height: f64,
    pub row_height: f64,
    pub cell_width: f64,
    pub rows: usize,
    /// Top spacing + header + rows + grid border allowance
    pub block_height: f64,
}

impl BlockMetrics {
    pub fn from_params(params: &LayoutParameters) -> Self {
        let params = params.normalized();
        let top_spacing = params.top_spacing.points() as f64;
        let header_height = if params.show_pronunciation_header {
            HEADER_AREA_HEIGHT_PT
        } else {
            0.0
        };
        let rows = params.rows_per_character as usize;
        let block_height = top_spacing
            + header_height
            + GRID_BOX_HEIGHT_PT * rows as f64
            + GRID_BORDER_WIDTH_PT * 2.0;

        Self {
            top_spacing,
            header_height,
            row_height: GRID_BOX_HEIGHT_PT,
            cell_width: GRID_BOX_WIDTH_PT,
            rows,
            block_height,
        }
    }

    /// Offset of the first grid row from the block top
    pub fn grid_top(&self) -> f64 {
        self.top_spacing + self.header_height + GRID_BORDER_WIDTH_PT
    }

    /// Blocks that fit in `available` points of height
    pub fn blocks_fitting(&self, available: f64) -> usize {
        if available <= 0.0 || self.block_height <= 0.0 {
            return 0;
        }
        (available / self.block_height).floor() as usize
    }
}

/// Pages plus the metrics they were laid out with
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SheetLayout {
    pub pages: Vec<Page>,
    pub metrics: BlockMetrics,
}

impl SheetLayout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// "1 Page" / "3 Pages"
    pub fn page_count_label(&self) -> String {
        let count = self.pages.len();
        format!("{} Page{}", count, if count == 1 { "" } else { "s" })
    }

    pub fn has_glyphs(&self) -> bool {
        self.pages.iter().any(Page::has_glyphs)
    }
}

/// Greedy paginator
#[derive(Clone, Debug)]
pub struct LayoutEngine {
    content_height: f64,
}

impl LayoutEngine {
    /// Create a layout engine for the standard letter-size content area
    pub fn new() -> Self {
        Self {
            content_height: CONTENT_HEIGHT_PT,
        }
    }

    /// Layout engine with a custom content height (points)
    ///
    /// A height smaller than one block still yields pages: each block gets a
    /// page of its own and empty input gets a single blank block.
    pub fn with_content_height(content_height: f64) -> Self {
        Self { content_height }
    }

    pub fn content_height(&self) -> f64 {
        self.content_height
    }

    /// Compute the complete page layout
    ///
    /// Walks the qualifying characters in order, closing a page strictly
    /// before a block would overflow it. A page that is still empty always
    /// accepts the block, so an oversized block gets a page of its own rather
    /// than looping or being dropped. The last page is then padded with blank
    /// blocks; empty input yields exactly one all-blank page with at least
    /// one block.
    ///
    /// # Arguments
    /// * `chars` - Input characters; non-qualifying ones are skipped
    /// * `annotations` - Readings per distinct character, used for header text
    /// * `params` - Layout options
    ///
    /// # Returns
    /// SheetLayout with at least one page and no empty pages
    pub fn compute_layout(
        &self,
        chars: &[char],
        annotations: &BTreeMap<char, CharacterAnnotation>,
        params: &LayoutParameters,
    ) -> SheetLayout {
        let metrics = BlockMetrics::from_params(params);
        let block_height = metrics.block_height;

        let mut pages = vec![Page::new()];
        let mut current_height = 0.0;

        for (index, ch) in chars.iter().copied().filter(|&ch| is_qualifying(ch)).enumerate() {
            let page_has_content = pages.last().is_some_and(|page| !page.is_empty());
            if current_height + block_height > self.content_height && page_has_content {
                pages.push(Page::new());
                current_height = 0.0;
            }

            let header = annotations.get(&ch).and_then(CharacterAnnotation::header_text);
            if let Some(page) = pages.last_mut() {
                page.blocks.push(Block::character(ch, index, header));
            }
            current_height += block_height;
        }

        let last_index = pages.len() - 1;
        let last_page = &mut pages[last_index];
        let used = last_page.len() as f64 * block_height;
        let mut fill = metrics.blocks_fitting(self.content_height - used);
        if last_page.is_empty() {
            // Same rule as an oversized character block
            fill = fill.max(1);
        }
        last_page
            .blocks
            .extend((0..fill).map(|slot| Block::blank(last_index, slot)));

        log::debug!(
            "layout: {} chars -> {} pages (block height {:.2}pt)",
            chars.len(),
            pages.len(),
            block_height
        );

        SheetLayout { pages, metrics }
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Paginate with the standard content area
pub fn paginate(
    chars: &[char],
    annotations: &BTreeMap<char, CharacterAnnotation>,
    params: &LayoutParameters,
) -> Vec<Page> {
    LayoutEngine::new()
        .compute_layout(chars, annotations, params)
        .pages
}
