pub mod types;
pub mod sanitize;
pub mod preprocess;
pub mod pdf;
pub mod ocr;
pub mod orchestrator;

pub use types::*;
pub use sanitize::*;
pub use pdf::*;
pub use ocr::*;
pub use orchestrator::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Tesseract OCR initialization failed: {0}")]
    OcrInit(String),

    #[error("OCR processing failed: {0}")]
    OcrProcessing(String),

    #[error("No OCR engine configured")]
    OcrUnavailable,

    #[error("Tessdata not found at: {0}")]
    TessdataNotFound(std::path::PathBuf),

    #[error("PDF parsing failed: {0}")]
    PdfParsing(String),

    #[error("Image processing error: {0}")]
    ImageProcessing(String),

    #[error("Unsupported content type: {0}")]
    UnsupportedFormat(String),
}
