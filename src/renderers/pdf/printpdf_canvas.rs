//! printpdf backend for [`VectorCanvas`]
//!
//! printpdf works in millimetres with a bottom-left origin and has no text
//! alignment, so this adapter converts units, flips y, and positions centered
//! or middle-baseline text from an estimated advance width.

use super::canvas::{Capabilities, FontId, StrokeStyle, TextAlign, TextBaseline, VectorCanvas};
use crate::error::CanvasError;
use crate::renderers::display_list::{Point as SheetPoint, Rect};
use crate::renderers::font_utils::estimate_text_width;
use crate::renderers::layout_engine::{PAGE_HEIGHT_PT, PAGE_WIDTH_PT};
use printpdf::{
    BuiltinFont, Color, Greyscale, IndirectFontRef, Line, LineDashPattern, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerReference, Point, Pt, Rgb,
};

/// Distance from the em-box middle down to the alphabetic baseline
const MIDDLE_BASELINE_DROP: f64 = 0.35;

pub struct PrintPdfCanvas {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    fonts: Vec<IndirectFontRef>,
    current_font: usize,
    font_size: f64,
}

fn mm(points: f64) -> Mm {
    Mm::from(Pt(points as f32))
}

fn to_pdf_point(p: SheetPoint) -> Point {
    Point::new(mm(p.x), mm(PAGE_HEIGHT_PT - p.y))
}

fn backend_error(e: impl std::fmt::Display) -> CanvasError {
    CanvasError::new(e.to_string())
}

impl PrintPdfCanvas {
    /// Start a letter-size document with one empty page
    pub fn new(title: &str) -> Result<Self, CanvasError> {
        let (doc, page, layer) = PdfDocument::new(
            title,
            mm(PAGE_WIDTH_PT),
            mm(PAGE_HEIGHT_PT),
            "Layer 1",
        );
        let layer = doc.get_page(page).get_layer(layer);
        let helvetica = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(backend_error)?;

        Ok(Self {
            doc,
            layer,
            fonts: vec![helvetica],
            current_font: 0,
            font_size: 12.0,
        })
    }

    fn font(&self) -> Result<&IndirectFontRef, CanvasError> {
        self.fonts
            .get(self.current_font)
            .ok_or_else(|| CanvasError::new(format!("unknown font id {}", self.current_font)))
    }
}

impl VectorCanvas for PrintPdfCanvas {
    fn capabilities(&self) -> Capabilities {
        Capabilities::default()
    }

    fn builtin_font(&self) -> FontId {
        FontId(0)
    }

    fn register_font(&mut self, name: &str, bytes: &[u8]) -> Result<FontId, CanvasError> {
        if bytes.is_empty() {
            return Err(CanvasError::new(format!("font {} has no data", name)));
        }
        let font = self.doc.add_external_font(bytes).map_err(backend_error)?;
        self.fonts.push(font);
        Ok(FontId(self.fonts.len() - 1))
    }

    fn set_font(&mut self, font: FontId, size: f64) -> Result<(), CanvasError> {
        if font.0 >= self.fonts.len() {
            return Err(CanvasError::new(format!("unknown font id {}", font.0)));
        }
        self.current_font = font.0;
        self.font_size = size;
        Ok(())
    }

    fn set_text_gray(&mut self, gray: u8) -> Result<(), CanvasError> {
        let level = gray as f32 / 255.0;
        self.layer
            .set_fill_color(Color::Greyscale(Greyscale::new(level, None)));
        Ok(())
    }

    fn set_stroke(&mut self, style: StrokeStyle) -> Result<(), CanvasError> {
        let c = style.color;
        self.layer.set_outline_color(Color::Rgb(Rgb::new(
            c.r as f32 / 255.0,
            c.g as f32 / 255.0,
            c.b as f32 / 255.0,
            None,
        )));
        self.layer.set_outline_thickness(style.width as f32);

        let pattern = match style.dash {
            Some([dash, gap]) => LineDashPattern {
                dash_1: Some(dash.round() as i64),
                gap_1: Some(gap.round() as i64),
                ..LineDashPattern::default()
            },
            None => LineDashPattern::default(),
        };
        self.layer.set_line_dash_pattern(pattern);
        Ok(())
    }

    fn line(&mut self, from: SheetPoint, to: SheetPoint) -> Result<(), CanvasError> {
        self.layer.add_line(Line {
            points: vec![(to_pdf_point(from), false), (to_pdf_point(to), false)],
            is_closed: false,
        });
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect) -> Result<(), CanvasError> {
        self.layer.add_line(Line {
            points: vec![
                (to_pdf_point(rect.top_left()), false),
                (to_pdf_point(rect.top_right()), false),
                (to_pdf_point(rect.bottom_right()), false),
                (to_pdf_point(rect.bottom_left()), false),
            ],
            is_closed: true,
        });
        Ok(())
    }

    fn text(
        &mut self,
        text: &str,
        at: SheetPoint,
        align: TextAlign,
        baseline: TextBaseline,
    ) -> Result<(), CanvasError> {
        let size = self.font_size;
        let x = match align {
            TextAlign::Left => at.x,
            TextAlign::Center => at.x - estimate_text_width(text, size) / 2.0,
        };
        let y = match baseline {
            TextBaseline::Alphabetic => at.y,
            TextBaseline::Middle => at.y + size * MIDDLE_BASELINE_DROP,
        };

        let font = self.font()?.clone();
        self.layer
            .use_text(text, size as f32, mm(x), mm(PAGE_HEIGHT_PT - y), &font);
        Ok(())
    }

    fn new_page(&mut self) -> Result<(), CanvasError> {
        let (page, layer) = self
            .doc
            .add_page(mm(PAGE_WIDTH_PT), mm(PAGE_HEIGHT_PT), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        Ok(())
    }

    fn finish(self) -> Result<Vec<u8>, CanvasError> {
        self.doc.save_to_bytes().map_err(backend_error)
    }
}
