use super::pdf::{join_pages, PdfTextExtractor};
use super::sanitize::sanitize_extracted_text;
use super::types::{
    ExtractionMethod, ExtractionResult, OcrEngine, PdfExtractor, UploadKind, UploadedFile,
};
use super::ExtractionError;

/// Reads text out of uploaded lab reports.
/// PDFs go through the text-layer extractor, images through OCR when an
/// engine is configured.
pub struct DocumentExtractor {
    pdf_extractor: Box<dyn PdfExtractor>,
    ocr_engine: Option<Box<dyn OcrEngine>>,
}

impl DocumentExtractor {
    pub fn new(
        pdf_extractor: Box<dyn PdfExtractor>,
        ocr_engine: Option<Box<dyn OcrEngine>>,
    ) -> Self {
        Self {
            pdf_extractor,
            ocr_engine,
        }
    }

    /// Production extractor: pdf-extract plus Tesseract when available.
    pub fn from_settings(settings: &crate::config::OcrSettings) -> Self {
        Self::new(Box::new(PdfTextExtractor), super::ocr::engine_from_settings(settings))
    }

    pub fn has_ocr(&self) -> bool {
        self.ocr_engine.is_some()
    }

    pub fn try_extract(&self, file: &UploadedFile) -> Result<ExtractionResult, ExtractionError> {
        let kind = UploadKind::classify(file.content_type.as_deref(), file.file_name.as_deref());

        tracing::info!(
            file_name = file.file_name.as_deref().unwrap_or("<unnamed>"),
            content_type = file.content_type.as_deref().unwrap_or("<none>"),
            size = file.bytes.len(),
            ?kind,
            "Starting text extraction"
        );

        let result = match kind {
            UploadKind::Pdf => {
                let pages = self.pdf_extractor.extract_text(&file.bytes)?;
                let confidence = pages
                    .iter()
                    .map(|p| p.confidence)
                    .fold(0.0_f32, f32::max);
                ExtractionResult {
                    method: ExtractionMethod::PdfDirect,
                    text: sanitize_extracted_text(&join_pages(&pages)),
                    page_count: pages.len(),
                    confidence,
                }
            }
            UploadKind::Image => {
                let engine = self
                    .ocr_engine
                    .as_ref()
                    .ok_or(ExtractionError::OcrUnavailable)?;
                let ocr = engine.ocr_image(&file.bytes)?;
                ExtractionResult {
                    method: ExtractionMethod::TesseractOcr,
                    text: sanitize_extracted_text(&ocr.text),
                    page_count: 1,
                    confidence: ocr.confidence,
                }
            }
            UploadKind::Unsupported => {
                return Err(ExtractionError::UnsupportedFormat(
                    file.content_type.clone().unwrap_or_default(),
                ));
            }
        };

        tracing::info!(
            method = ?result.method,
            pages = result.page_count,
            chars = result.text.len(),
            "Text extraction complete"
        );

        Ok(result)
    }

    /// Extract text, degrading every failure to an empty string.
    pub fn extract(&self, file: &UploadedFile) -> String {
        match self.try_extract(file) {
            Ok(result) => result.text,
            Err(e) => {
                tracing::error!(error = %e, "Text extraction failed");
                String::new()
            }
        }
    }
}
