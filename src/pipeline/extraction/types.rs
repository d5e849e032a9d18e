use super::ExtractionError;

/// An uploaded lab report as received from the client.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// How an upload will be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Pdf,
    Image,
    Unsupported,
}

impl UploadKind {
    /// Classify by declared content type, guessing from the file name when
    /// the client sent none.
    pub fn classify(content_type: Option<&str>, file_name: Option<&str>) -> Self {
        let declared = content_type
            .map(|ct| ct.trim().to_lowercase())
            .filter(|ct| !ct.is_empty() && ct != "application/octet-stream");

        let mime = match declared {
            Some(ct) => ct,
            None => match file_name {
                Some(name) => mime_guess::from_path(name)
                    .first_or_octet_stream()
                    .essence_str()
                    .to_string(),
                None => return UploadKind::Unsupported,
            },
        };

        if mime == "application/pdf" {
            UploadKind::Pdf
        } else if mime.contains("image") {
            UploadKind::Image
        } else {
            UploadKind::Unsupported
        }
    }
}

/// Extraction method used for a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMethod {
    PdfDirect,
    TesseractOcr,
}

/// Text recovered from one upload
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    pub method: ExtractionMethod,
    pub text: String,
    pub page_count: usize,
    pub confidence: f32,
}

/// Per-page extraction result
#[derive(Debug, Clone)]
pub struct PageExtraction {
    pub page_number: usize,
    pub text: String,
    pub confidence: f32,
}

/// Raw OCR result from the engine
#[derive(Debug)]
pub struct OcrPageResult {
    pub text: String,
    pub confidence: f32,
}

/// OCR engine abstraction (allows mocking for tests)
pub trait OcrEngine: Send + Sync {
    fn ocr_image(&self, image_bytes: &[u8]) -> Result<OcrPageResult, ExtractionError>;
}

/// PDF text extraction abstraction
pub trait PdfExtractor: Send + Sync {
    fn extract_text(&self, pdf_bytes: &[u8]) -> Result<Vec<PageExtraction>, ExtractionError>;
}
