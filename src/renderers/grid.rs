//! Grid renderer
//!
//! Maps one block to its header band and `rows × 11` cells: guide lines per
//! grid style, and the glyph/opacity schedule (solid model character first,
//! then `trace_count` faint copies in row-major order).

use super::display_list::{
    Cell, DisplayList, GuideKind, GuideLine, PlacedBlock, Point, Rect, RenderedBlock, RenderedPage,
};
use super::layout_engine::{BlockMetrics, CONTENT_WIDTH_PT, GRIDS_PER_ROW, MARGIN_PT, PAGE_HEIGHT_PT, PAGE_WIDTH_PT};
use crate::models::{Block, GridStyle, LayoutParameters, Page};

/// Glyph and opacity for the cell at row-major `index`
pub fn glyph_for_cell(block: &Block, index: usize, params: &LayoutParameters) -> Option<(char, f64)> {
    let ch = block.glyph()?;
    if index == 0 {
        Some((ch, 1.0))
    } else if index <= params.normalized().trace_count as usize {
        Some((ch, params.trace_opacity.alpha()))
    } else {
        None
    }
}

/// Guide lines for a cell occupying `rect`
pub fn guide_lines(rect: Rect, style: GridStyle) -> Vec<GuideLine> {
    let mut lines = vec![GuideLine::Border { rect }];
    let center = rect.center();

    if style.has_center_cross() {
        lines.push(GuideLine::Guide {
            kind: GuideKind::Vertical,
            from: Point::new(center.x, rect.y),
            to: Point::new(center.x, rect.y + rect.height),
        });
        lines.push(GuideLine::Guide {
            kind: GuideKind::Horizontal,
            from: Point::new(rect.x, center.y),
            to: Point::new(rect.x + rect.width, center.y),
        });
    }

    if style.has_diagonals() {
        lines.push(GuideLine::Guide {
            kind: GuideKind::Diagonal,
            from: rect.top_left(),
            to: rect.bottom_right(),
        });
        lines.push(GuideLine::Guide {
            kind: GuideKind::AntiDiagonal,
            from: rect.bottom_left(),
            to: rect.top_right(),
        });
    }

    lines
}

/// Render one block in block-local coordinates
pub fn render_block(block: &Block, params: &LayoutParameters) -> RenderedBlock {
    let metrics = BlockMetrics::from_params(params);
    render_block_with(block, params, &metrics)
}

fn render_block_with(block: &Block, params: &LayoutParameters, metrics: &BlockMetrics) -> RenderedBlock {
    let (header_band, header_text) = if params.show_pronunciation_header {
        (
            Some(Rect::new(0.0, metrics.top_spacing, CONTENT_WIDTH_PT, metrics.header_height)),
            block.header_text().map(str::to_string),
        )
    } else {
        (None, None)
    };

    let grid_top = metrics.grid_top();
    let mut cells = Vec::with_capacity(metrics.rows * GRIDS_PER_ROW);
    for row in 0..metrics.rows {
        for col in 0..GRIDS_PER_ROW {
            let rect = Rect::new(
                col as f64 * metrics.cell_width,
                grid_top + row as f64 * metrics.row_height,
                metrics.cell_width,
                metrics.row_height,
            );
            let (glyph, glyph_opacity) = match glyph_for_cell(block, row * GRIDS_PER_ROW + col, params) {
                Some((ch, opacity)) => (Some(ch), opacity),
                None => (None, 0.0),
            };
            cells.push(Cell {
                row,
                col,
                rect,
                guide_lines: guide_lines(rect, params.grid_style),
                glyph,
                glyph_opacity,
            });
        }
    }

    RenderedBlock {
        key: block.key,
        header_band,
        header_text,
        cells,
        height: metrics.block_height,
    }
}

/// Render every page into one display list
pub fn render_sheet(pages: &[Page], params: &LayoutParameters) -> DisplayList {
    let metrics = BlockMetrics::from_params(params);

    let pages = pages
        .iter()
        .enumerate()
        .map(|(index, page)| {
            let mut y = 0.0;
            let blocks = page
                .blocks
                .iter()
                .map(|block| {
                    let placed = PlacedBlock {
                        y,
                        block: render_block_with(block, params, &metrics),
                    };
                    y += metrics.block_height;
                    placed
                })
                .collect();
            RenderedPage { index, blocks }
        })
        .collect();

    DisplayList {
        page_width: PAGE_WIDTH_PT,
        page_height: PAGE_HEIGHT_PT,
        margin: MARGIN_PT,
        metrics,
        pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TraceOpacity;

    fn guide_kinds(lines: &[GuideLine]) -> Vec<Option<GuideKind>> {
        lines
            .iter()
            .map(|line| match line {
                GuideLine::Border { .. } => None,
                GuideLine::Guide { kind, .. } => Some(*kind),
            })
            .collect()
    }

    #[test]
    fn test_cell_count_is_rows_times_eleven() {
        let params = LayoutParameters {
            rows_per_character: 3,
            ..LayoutParameters::default()
        };
        let rendered = render_block(&Block::character('你', 0, None), &params);
        assert_eq!(rendered.cells.len(), 33);
        assert_eq!(rendered.cells[11].row, 1);
        assert_eq!(rendered.cells[11].col, 0);
        for (position, cell) in rendered.cells.iter().enumerate() {
            assert_eq!(cell.index(GRIDS_PER_ROW), position);
            assert_eq!(cell.guide_lines.iter().filter(|line| line.is_border()).count(), 1);
        }
    }

    #[test]
    fn test_default_opacity_schedule() {
        let rendered = render_block(&Block::character('你', 0, None), &LayoutParameters::default());
        assert_eq!(rendered.cells[0].glyph, Some('你'));
        assert_eq!(rendered.cells[0].glyph_opacity, 1.0);
        for cell in &rendered.cells[1..=5] {
            assert_eq!(cell.glyph, Some('你'));
            assert_eq!(cell.glyph_opacity, 0.25);
        }
        for cell in &rendered.cells[6..] {
            assert_eq!(cell.glyph, None);
        }
    }

    #[test]
    fn test_traces_continue_into_next_row() {
        let params = LayoutParameters {
            trace_count: 10,
            trace_opacity: TraceOpacity::High,
            ..LayoutParameters::default()
        };
        let rendered = render_block(&Block::character('好', 0, None), &params);
        assert_eq!(rendered.cells[10].glyph_opacity, 0.5);
        assert_eq!(rendered.cells[11].glyph, None);
    }

    #[test]
    fn test_zero_traces_only_model_character() {
        let params = LayoutParameters {
            trace_count: 0,
            ..LayoutParameters::default()
        };
        let rendered = render_block(&Block::character('好', 0, None), &params);
        assert_eq!(rendered.cells.iter().filter(|c| c.glyph.is_some()).count(), 1);
    }

    #[test]
    fn test_blank_block_never_shows_glyph() {
        let rendered = render_block(&Block::blank(0, 0), &LayoutParameters::default());
        assert!(rendered.cells.iter().all(|c| c.glyph.is_none() && c.glyph_opacity == 0.0));
    }

    #[test]
    fn test_guide_patterns_per_style() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(guide_kinds(&guide_lines(rect, GridStyle::Blank)), vec![None]);
        assert_eq!(
            guide_kinds(&guide_lines(rect, GridStyle::SquareGuide)),
            vec![None, Some(GuideKind::Vertical), Some(GuideKind::Horizontal)]
        );
        assert_eq!(
            guide_kinds(&guide_lines(rect, GridStyle::DiamondGuide)),
            vec![
                None,
                Some(GuideKind::Vertical),
                Some(GuideKind::Horizontal),
                Some(GuideKind::Diagonal),
                Some(GuideKind::AntiDiagonal)
            ]
        );
    }

    #[test]
    fn test_header_band_follows_params() {
        let block = Block::character('好', 0, Some("hǎo".into()));
        let shown = render_block(&block, &LayoutParameters::default());
        assert_eq!(shown.header_text.as_deref(), Some("hǎo"));
        assert_eq!(shown.header_band.unwrap().y, 5.0);

        let hidden = render_block(
            &block,
            &LayoutParameters {
                show_pronunciation_header: false,
                ..LayoutParameters::default()
            },
        );
        assert_eq!(hidden.header_band, None);
        assert_eq!(hidden.header_text, None);
        assert_eq!(hidden.cells[0].rect.y, 5.5);
    }

    #[test]
    fn test_sheet_places_blocks_one_block_height_apart() {
        let pages = vec![Page {
            blocks: vec![Block::character('你', 0, None), Block::blank(0, 0)],
        }];
        let list = render_sheet(&pages, &LayoutParameters::default());
        let placed = &list.pages[0].blocks;
        assert_eq!(placed[0].y, 0.0);
        assert_eq!(placed[1].y, list.metrics.block_height);
    }
}
