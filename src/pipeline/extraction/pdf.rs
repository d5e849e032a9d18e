use std::panic::{self, AssertUnwindSafe};

use super::types::{PageExtraction, PdfExtractor};
use super::ExtractionError;

/// PDF text extractor using the pdf-extract crate.
/// Reads the embedded text layer only; scanned PDFs yield blank pages.
pub struct PdfTextExtractor;

impl PdfExtractor for PdfTextExtractor {
    fn extract_text(&self, pdf_bytes: &[u8]) -> Result<Vec<PageExtraction>, ExtractionError> {
        let page_texts = text_by_pages(pdf_bytes)?;

        let pages = page_texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| {
                let confidence = if text.trim().is_empty() { 0.0 } else { 0.95 };
                PageExtraction {
                    page_number: i + 1,
                    text,
                    confidence,
                }
            })
            .collect();

        Ok(pages)
    }
}

/// pdf-extract panics on some malformed font and resource dictionaries.
/// Those panics are reported as parse failures.
fn text_by_pages(pdf_bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
    match panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
    })) {
        Ok(result) => result.map_err(|e| ExtractionError::PdfParsing(e.to_string())),
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(ExtractionError::PdfParsing(format!("malformed PDF: {reason}")))
        }
    }
}

/// Join page texts with a single space, skipping pages with no text layer.
pub fn join_pages(pages: &[PageExtraction]) -> String {
    pages
        .iter()
        .map(|p| p.text.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    use lopdf::{dictionary, Dictionary};

    /// Build a one-page PDF with a Helvetica text line using lopdf.
    pub(crate) fn make_test_pdf(text: &str) -> Vec<u8> {
        make_pdf_with_font(
            dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => "Helvetica",
            },
            text,
        )
    }

    /// A PDF whose `/F1` font lacks `BaseFont`. pdf-extract panics on it.
    pub(crate) fn make_pdf_without_base_font() -> Vec<u8> {
        make_pdf_with_font(
            dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
            },
            "WIDAL POSITIVE",
        )
    }

    fn make_pdf_with_font(font: Dictionary, text: &str) -> Vec<u8> {
        use lopdf::{Document, Object, Stream};

        let mut doc = Document::with_version("1.4");

        let font_id = doc.add_object(font);

        let content = format!("BT /F1 12 Tf 100 700 Td ({text}) Tj ET");
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

        let resources = dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        };

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
            "Resources" => resources,
        });

        let pages_id = doc.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        });

        if let Ok(Object::Dictionary(dict)) = doc.get_object_mut(page_id) {
            dict.set("Parent", pages_id);
        }

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn extract_text_from_digital_pdf() {
        let pdf_bytes = make_test_pdf("Hemoglobin low 9.1 g/dL");
        let pages = PdfTextExtractor.extract_text(&pdf_bytes).unwrap();

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].page_number, 1);
        let text = join_pages(&pages);
        assert!(text.contains("Hemoglobin"), "got: {text}");
        assert!(pages[0].confidence > 0.9);
    }

    #[test]
    fn invalid_pdf_returns_error() {
        let result = PdfTextExtractor.extract_text(b"not a pdf");
        assert!(matches!(result, Err(ExtractionError::PdfParsing(_))));
    }

    #[test]
    fn font_without_base_font_is_parse_error() {
        let result = PdfTextExtractor.extract_text(&make_pdf_without_base_font());
        assert!(
            matches!(result, Err(ExtractionError::PdfParsing(_))),
            "got: {result:?}"
        );
    }

    #[test]
    fn join_skips_blank_pages() {
        let pages = vec![
            PageExtraction { page_number: 1, text: " first ".into(), confidence: 0.95 },
            PageExtraction { page_number: 2, text: "\n".into(), confidence: 0.0 },
            PageExtraction { page_number: 3, text: "third".into(), confidence: 0.95 },
        ];
        assert_eq!(join_pages(&pages), "first third");
    }
}
