//! PDF export driver
//!
//! Walks the same [`DisplayList`] the live preview draws and replays it onto a
//! [`VectorCanvas`]. Font registration is best-effort: a font that fails to
//! load degrades to the canvas's built-in font. A failed drawing primitive
//! aborts the whole export and the partial document is dropped.

use super::canvas::{
    Capabilities, FontId, RgbColor, StrokeStyle, TextAlign, TextBaseline, VectorCanvas,
};
use super::printpdf_canvas::PrintPdfCanvas;
use crate::error::{CanvasError, ExportError};
use crate::models::{LayoutParameters, Page};
use crate::renderers::display_list::{GuideLine, PlacedBlock, Point, RenderedPage};
use crate::renderers::font_utils::{
    glyph_font_size, gray_for_opacity, GLYPH_FONT_NAME, HEADER_FONT_NAME, HEADER_FONT_SIZE_PT,
};
use crate::renderers::grid::render_sheet;
use crate::renderers::layout_engine::GRID_BORDER_WIDTH_PT;
use std::fs;
use std::path::Path;

pub const EXPORT_FILE_NAME: &str = "chinese-worksheet.pdf";

/// Grid stroke colour, #56ab91
pub const GRID_COLOR: RgbColor = RgbColor::new(0x56, 0xab, 0x91);

pub const GUIDE_DASH: [f64; 2] = [3.0, 3.0];

/// Left inset of the pinyin text inside its band
const HEADER_TEXT_INSET_PT: f64 = 2.0;

/// Extra drop below the band's middle line for the pinyin baseline
const HEADER_BASELINE_DROP_PT: f64 = 3.0;

/// Baseline nudge used when the canvas cannot middle-align text
const MIDDLE_BASELINE_NUDGE: f64 = 0.12;

/// Raw TTF/OTF bytes for the optional embedded fonts
#[derive(Clone, Debug, Default)]
pub struct FontSources {
    pub glyph_font: Option<Vec<u8>>,
    pub pronunciation_font: Option<Vec<u8>>,
}

/// Fonts resolved for one export
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedFonts {
    pub glyph: FontId,
    pub header: FontId,
}

// ============================================================================
// Font registration
// ============================================================================

fn register_or_fallback<C: VectorCanvas>(
    canvas: &mut C,
    capabilities: &Capabilities,
    name: &str,
    bytes: Option<&[u8]>,
) -> FontId {
    let fallback = canvas.builtin_font();
    if !capabilities.custom_fonts {
        log::warn!("Canvas cannot embed fonts; using built-in font for {}", name);
        return fallback;
    }
    let Some(bytes) = bytes else {
        log::warn!("No font data for {}; using built-in font", name);
        return fallback;
    };
    match canvas.register_font(name, bytes) {
        Ok(id) => {
            log::debug!("Registered font {} ({} bytes)", name, bytes.len());
            id
        }
        Err(e) => {
            log::warn!("Font {} failed to register: {}; using built-in font", name, e);
            fallback
        }
    }
}

/// Register only the fonts the document will actually use
///
/// The glyph font is needed when any page shows a character; the pinyin font
/// only when headers are on and some block has non-blank pinyin.
pub fn resolve_fonts<C: VectorCanvas>(
    canvas: &mut C,
    capabilities: &Capabilities,
    pages: &[Page],
    params: &LayoutParameters,
    fonts: &FontSources,
) -> ResolvedFonts {
    let builtin = canvas.builtin_font();

    let needs_glyph_font = pages.iter().any(Page::has_glyphs);
    let needs_header_font = params.show_pronunciation_header
        && pages
            .iter()
            .flat_map(|page| page.blocks.iter())
            .any(|block| block.header_text().is_some());

    let glyph = if needs_glyph_font {
        register_or_fallback(canvas, capabilities, GLYPH_FONT_NAME, fonts.glyph_font.as_deref())
    } else {
        builtin
    };
    let header = if needs_header_font {
        register_or_fallback(
            canvas,
            capabilities,
            HEADER_FONT_NAME,
            fonts.pronunciation_font.as_deref(),
        )
    } else {
        builtin
    };

    ResolvedFonts { glyph, header }
}

// ============================================================================
// Drawing
// ============================================================================

/// Tracks canvas state so unchanged settings are not re-emitted
struct Pen<'a, C: VectorCanvas> {
    canvas: &'a mut C,
    capabilities: Capabilities,
    stroke: Option<StrokeStyle>,
    font: Option<(FontId, u64)>,
    gray: Option<u8>,
}

impl<'a, C: VectorCanvas> Pen<'a, C> {
    fn new(canvas: &'a mut C, capabilities: Capabilities) -> Self {
        Self {
            canvas,
            capabilities,
            stroke: None,
            font: None,
            gray: None,
        }
    }

    fn stroke(&mut self, style: StrokeStyle) -> Result<(), CanvasError> {
        let style = if self.capabilities.dashed_lines {
            style
        } else {
            StrokeStyle { dash: None, ..style }
        };
        if self.stroke != Some(style) {
            self.canvas.set_stroke(style)?;
            self.stroke = Some(style);
        }
        Ok(())
    }

    fn font(&mut self, font: FontId, size: f64) -> Result<(), CanvasError> {
        let key = (font, size.to_bits());
        if self.font != Some(key) {
            self.canvas.set_font(font, size)?;
            self.font = Some(key);
        }
        Ok(())
    }

    fn gray(&mut self, gray: u8) -> Result<(), CanvasError> {
        if self.gray != Some(gray) {
            self.canvas.set_text_gray(gray)?;
            self.gray = Some(gray);
        }
        Ok(())
    }

    /// Text centered on `center` both ways
    fn centered_text(&mut self, text: &str, center: Point, size: f64) -> Result<(), CanvasError> {
        if self.capabilities.middle_baseline {
            self.canvas
                .text(text, center, TextAlign::Center, TextBaseline::Middle)
        } else {
            let nudged = center.offset(0.0, size * MIDDLE_BASELINE_NUDGE);
            self.canvas
                .text(text, nudged, TextAlign::Center, TextBaseline::Alphabetic)
        }
    }

    fn new_page(&mut self) -> Result<(), CanvasError> {
        self.canvas.new_page()?;
        // Graphics state does not carry across pages on every backend
        self.stroke = None;
        self.font = None;
        self.gray = None;
        Ok(())
    }
}

fn border_style() -> StrokeStyle {
    StrokeStyle {
        color: GRID_COLOR,
        width: GRID_BORDER_WIDTH_PT * 2.0,
        dash: None,
    }
}

fn guide_style() -> StrokeStyle {
    StrokeStyle {
        color: GRID_COLOR,
        width: 1.0,
        dash: Some(GUIDE_DASH),
    }
}

fn draw_block<C: VectorCanvas>(
    pen: &mut Pen<'_, C>,
    placed: &PlacedBlock,
    origin: Point,
    fonts: &ResolvedFonts,
) -> Result<(), CanvasError> {
    let block = &placed.block;
    let (dx, dy) = (origin.x, origin.y + placed.y);

    if let (Some(band), Some(text)) = (block.header_band, block.header_text.as_deref()) {
        pen.font(fonts.header, HEADER_FONT_SIZE_PT)?;
        pen.gray(0)?;
        let at = Point::new(
            dx + band.x + HEADER_TEXT_INSET_PT,
            dy + band.y + band.height / 2.0 + HEADER_BASELINE_DROP_PT,
        );
        pen.canvas
            .text(text, at, TextAlign::Left, TextBaseline::Alphabetic)?;
    }

    for cell in &block.cells {
        for line in &cell.guide_lines {
            match line.offset(dx, dy) {
                GuideLine::Border { rect } => {
                    pen.stroke(border_style())?;
                    pen.canvas.stroke_rect(rect)?;
                }
                GuideLine::Guide { from, to, .. } => {
                    pen.stroke(guide_style())?;
                    pen.canvas.line(from, to)?;
                }
            }
        }

        if let Some(glyph) = cell.glyph {
            let rect = cell.rect.offset(dx, dy);
            let size = glyph_font_size(rect.width, rect.height);
            pen.font(fonts.glyph, size)?;
            pen.gray(gray_for_opacity(cell.glyph_opacity))?;
            let mut buf = [0u8; 4];
            pen.centered_text(glyph.encode_utf8(&mut buf), rect.center(), size)?;
        }
    }

    Ok(())
}

fn draw_page<C: VectorCanvas>(
    pen: &mut Pen<'_, C>,
    page: &RenderedPage,
    origin: Point,
    fonts: &ResolvedFonts,
) -> Result<(), ExportError> {
    let drawing = |e: CanvasError| ExportError::Drawing {
        page: page.index,
        message: e.to_string(),
    };

    if page.index > 0 {
        pen.new_page().map_err(drawing)?;
    }
    for placed in &page.blocks {
        draw_block(pen, placed, origin, fonts).map_err(drawing)?;
    }
    Ok(())
}

// ============================================================================
// Entry points
// ============================================================================

/// Draw `pages` onto `canvas` and serialize the result
///
/// # Arguments
/// * `canvas` - Drawing backend; its first page must already exist
/// * `pages` - Output of pagination
/// * `params` - The parameters the pages were laid out with
/// * `fonts` - Optional font bytes for hanzi glyphs and pinyin
///
/// # Returns
/// `Ok(None)` when there is nothing to export, the document bytes otherwise
pub fn export_document<C: VectorCanvas>(
    mut canvas: C,
    pages: &[Page],
    params: &LayoutParameters,
    fonts: &FontSources,
) -> Result<Option<Vec<u8>>, ExportError> {
    if pages.is_empty() {
        log::info!("Nothing to export");
        return Ok(None);
    }

    let capabilities = canvas.capabilities();
    let resolved = resolve_fonts(&mut canvas, &capabilities, pages, params, fonts);
    let display_list = render_sheet(pages, params);
    let origin = Point::new(display_list.margin, display_list.margin);

    {
        let mut pen = Pen::new(&mut canvas, capabilities);
        for page in &display_list.pages {
            if let Err(e) = draw_page(&mut pen, page, origin, &resolved) {
                log::error!("Export aborted: {}", e);
                return Err(e);
            }
        }
    }

    let bytes = canvas
        .finish()
        .map_err(|e| ExportError::Serialization(e.to_string()))?;
    log::info!(
        "Exported {} page(s), {} bytes",
        display_list.pages.len(),
        bytes.len()
    );
    Ok(Some(bytes))
}

/// Export to a PDF document using the printpdf backend
pub fn export_pdf(
    pages: &[Page],
    params: &LayoutParameters,
    fonts: &FontSources,
) -> Result<Option<Vec<u8>>, ExportError> {
    if pages.is_empty() {
        return Ok(None);
    }
    let canvas = PrintPdfCanvas::new("Chinese Worksheet").map_err(|e| ExportError::Drawing {
        page: 0,
        message: e.to_string(),
    })?;
    export_document(canvas, pages, params, fonts)
}

/// Write `bytes` to `path` without leaving a truncated file behind
pub fn save_document(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    let tmp = path.with_extension("pdf.tmp");
    fs::write(&tmp, bytes).map_err(|e| ExportError::Io(e.to_string()))?;
    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        ExportError::Io(e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Block;
    use crate::renderers::pdf::recording::{DrawOp, RecordingCanvas};

    fn one_page(blocks: Vec<Block>) -> Vec<Page> {
        vec![Page { blocks }]
    }

    #[test]
    fn test_no_pages_exports_nothing() {
        let result = export_document(
            RecordingCanvas::new(),
            &[],
            &LayoutParameters::default(),
            &FontSources::default(),
        );
        assert_eq!(result, Ok(None));
    }

    #[test]
    fn test_blank_only_sheet_skips_font_registration() {
        let mut canvas = RecordingCanvas::new();
        let pages = one_page(vec![Block::blank(0, 0)]);
        let fonts = FontSources {
            glyph_font: Some(vec![1, 2, 3]),
            pronunciation_font: Some(vec![4, 5, 6]),
        };
        let resolved = resolve_fonts(
            &mut canvas,
            &Capabilities::default(),
            &pages,
            &LayoutParameters::default(),
            &fonts,
        );
        assert_eq!(resolved.glyph, canvas.builtin_font());
        assert_eq!(resolved.header, canvas.builtin_font());
        assert!(canvas.ops().is_empty());
    }

    #[test]
    fn test_centered_text_falls_back_without_middle_baseline() {
        let mut canvas = RecordingCanvas::new().with_capabilities(Capabilities {
            middle_baseline: false,
            ..Capabilities::default()
        });
        {
            let caps = canvas.capabilities();
            let mut pen = Pen::new(&mut canvas, caps);
            pen.centered_text("好", Point::new(10.0, 10.0), 50.0).unwrap();
        }
        match &canvas.ops()[0] {
            DrawOp::Text { at, middle, .. } => {
                assert!(!middle);
                assert!((at.y - 16.0).abs() < 1e-9);
            }
            other => panic!("unexpected op {:?}", other),
        }
    }

    #[test]
    fn test_pen_skips_repeated_state() {
        let mut canvas = RecordingCanvas::new();
        {
            let mut pen = Pen::new(&mut canvas, Capabilities::default());
            pen.stroke(guide_style()).unwrap();
            pen.stroke(guide_style()).unwrap();
            pen.gray(0).unwrap();
            pen.gray(0).unwrap();
        }
        assert_eq!(canvas.ops().len(), 2);
    }

    #[test]
    fn test_save_document_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EXPORT_FILE_NAME);
        save_document(&path, b"%PDF-1.3").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"%PDF-1.3");
        assert!(!path.with_extension("pdf.tmp").exists());
    }
}
