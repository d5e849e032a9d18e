//! Page geometry and text helpers shared by the report generators.
//! Coordinates are PDF points from the bottom-left corner, as on a printed
//! US Letter page.

use std::io::BufWriter;

use printpdf::path::PaintMode;
use printpdf::*;

use super::ReportError;

pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;

/// Convert PDF points to printpdf millimetres.
pub fn pt(value: f32) -> Mm {
    Mm(value * 25.4 / 72.0)
}

fn rgb(r: f32, g: f32, b: f32) -> Color {
    Color::Rgb(Rgb::new(r, g, b, None))
}

pub fn teal() -> Color {
    rgb(0.0, 0.502, 0.502)
}

pub fn white() -> Color {
    rgb(1.0, 1.0, 1.0)
}

pub fn black() -> Color {
    rgb(0.0, 0.0, 0.0)
}

pub fn red() -> Color {
    rgb(1.0, 0.0, 0.0)
}

pub fn green() -> Color {
    rgb(0.0, 0.502, 0.0)
}

pub fn dark_grey() -> Color {
    rgb(0.663, 0.663, 0.663)
}

pub fn grey() -> Color {
    rgb(0.502, 0.502, 0.502)
}

/// The Helvetica family used by every report.
pub struct Fonts {
    pub regular: IndirectFontRef,
    pub bold: IndirectFontRef,
    pub oblique: IndirectFontRef,
}

impl Fonts {
    pub fn load(doc: &PdfDocumentReference) -> Result<Self, ReportError> {
        let load = |font| {
            doc.add_builtin_font(font)
                .map_err(|e| ReportError::Font(e.to_string()))
        };
        Ok(Self {
            regular: load(BuiltinFont::Helvetica)?,
            bold: load(BuiltinFont::HelveticaBold)?,
            oblique: load(BuiltinFont::HelveticaOblique)?,
        })
    }
}

/// Full-width filled band across the top of the page.
pub fn header_band(layer: &PdfLayerReference, band_height: f32) {
    layer.set_fill_color(teal());
    let rect = Rect::new(
        pt(0.0),
        pt(PAGE_HEIGHT - band_height),
        pt(PAGE_WIDTH),
        pt(PAGE_HEIGHT),
    )
    .with_mode(PaintMode::Fill);
    layer.add_rect(rect);
}

pub fn draw_text(
    layer: &PdfLayerReference,
    text: &str,
    size: f32,
    x: f32,
    y: f32,
    font: &IndirectFontRef,
) {
    layer.use_text(pdf_safe(text), size, pt(x), pt(y), font);
}

/// Drop characters the builtin fonts cannot encode (emoji, CJK, controls).
pub fn pdf_safe(text: &str) -> String {
    text.chars()
        .filter(|c| (*c as u32) <= 0xFF && !c.is_control())
        .collect()
}

/// First `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Rough Helvetica advance width in points: half an em per character.
pub fn estimate_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.5
}

/// Render a JSON value the way it reads in a sentence: strings as-is, lists
/// joined with ", ", null as empty, anything else in its JSON form.
pub fn value_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(items) => items
            .iter()
            .map(value_text)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

pub fn save(doc: PdfDocumentReference) -> Result<Vec<u8>, ReportError> {
    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| ReportError::Save(e.to_string()))?;
    buf.into_inner()
        .map_err(|e| ReportError::Save(format!("PDF buffer error: {e}")))
}
