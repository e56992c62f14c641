//! Font sizing and trace shading for exported glyphs

/// Glyph size relative to the smaller cell side
pub const GLYPH_SCALE_FACTOR: f64 = 0.9;

/// Pinyin header text size (points)
pub const HEADER_FONT_SIZE_PT: f64 = 10.0;

/// Font registered for hanzi glyphs
pub const GLYPH_FONT_NAME: &str = "KaiTi_GB2312";

/// Font registered for pinyin header text
pub const HEADER_FONT_NAME: &str = "InterTight";

/// Whole-point font size that fits a `width × height` cell
pub fn glyph_font_size(width: f64, height: f64) -> f64 {
    (width.min(height) * GLYPH_SCALE_FACTOR).floor()
}

/// 8-bit gray that simulates `opacity` over white paper
///
/// Opacity 1 is black (0), opacity 0 is white (255); values outside `[0, 1]`
/// are clamped.
pub fn gray_for_opacity(opacity: f64) -> u8 {
    if opacity >= 1.0 {
        return 0;
    }
    (255.0 * (1.0 - opacity.clamp(0.0, 1.0))).round() as u8
}

/// Whether `ch` is drawn with a full-em advance (CJK and fullwidth forms)
pub fn is_wide(ch: char) -> bool {
    matches!(ch as u32,
        0x1100..=0x115F
        | 0x2E80..=0xA4CF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6
        | 0x20000..=0x3FFFD)
}

/// Rough advance width of `text` at `size`, for backends that cannot measure
pub fn estimate_text_width(text: &str, size: f64) -> f64 {
    text.chars()
        .map(|ch| if is_wide(ch) { size } else { size * 0.55 })
        .sum()
}
