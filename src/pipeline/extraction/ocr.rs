use super::preprocess::prepare_for_ocr;
use super::types::{OcrEngine, OcrPageResult};
use super::ExtractionError;

/// Tesseract OCR engine.
/// Only available when compiled with the `ocr` feature flag.
#[cfg(feature = "ocr")]
pub struct BundledTesseract {
    tessdata_dir: std::path::PathBuf,
    languages: String,
}

#[cfg(feature = "ocr")]
impl BundledTesseract {
    /// Initialize with a tessdata directory containing at least `eng.traineddata`.
    pub fn new(tessdata_dir: &std::path::Path) -> Result<Self, ExtractionError> {
        if !tessdata_dir.join("eng.traineddata").exists() {
            return Err(ExtractionError::TessdataNotFound(tessdata_dir.to_path_buf()));
        }
        Ok(Self {
            tessdata_dir: tessdata_dir.to_path_buf(),
            languages: "eng".to_string(),
        })
    }

    /// Set language(s) for OCR (e.g., "eng", "eng+hin")
    pub fn with_languages(mut self, langs: &str) -> Self {
        self.languages = langs.to_string();
        self
    }
}

#[cfg(feature = "ocr")]
impl OcrEngine for BundledTesseract {
    fn ocr_image(&self, image_bytes: &[u8]) -> Result<OcrPageResult, ExtractionError> {
        let png = prepare_for_ocr(image_bytes)?;

        let tessdata_str = self
            .tessdata_dir
            .to_str()
            .ok_or_else(|| ExtractionError::OcrInit("Invalid tessdata path".into()))?;

        let tess = tesseract::Tesseract::new(Some(tessdata_str), Some(&self.languages))
            .map_err(|e| ExtractionError::OcrInit(format!("{e:?}")))?;

        let mut tess = tess
            .set_image_from_mem(&png)
            .map_err(|e| ExtractionError::OcrProcessing(format!("{e:?}")))?;

        let text = tess
            .get_text()
            .map_err(|e| ExtractionError::OcrProcessing(format!("{e:?}")))?;

        let confidence = tess.mean_text_conf().max(0) as f32 / 100.0;

        Ok(OcrPageResult { text, confidence })
    }
}

/// Build the OCR engine from settings, if this build and host support one.
pub fn engine_from_settings(
    settings: &crate::config::OcrSettings,
) -> Option<Box<dyn OcrEngine>> {
    #[cfg(feature = "ocr")]
    {
        let Some(dir) = settings.tessdata_dir.as_deref() else {
            tracing::warn!("ocr.tessdata_dir not set; image uploads cannot be read");
            return None;
        };
        match BundledTesseract::new(dir) {
            Ok(engine) => {
                tracing::info!(
                    tessdata = %dir.display(),
                    languages = %settings.languages,
                    "Tesseract OCR ready"
                );
                Some(Box::new(engine.with_languages(&settings.languages)))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Tesseract OCR unavailable");
                None
            }
        }
    }

    #[cfg(not(feature = "ocr"))]
    {
        let _ = settings;
        tracing::info!("Built without the `ocr` feature; image uploads cannot be read");
        None
    }
}

/// Mock OCR engine for unit testing without Tesseract.
/// Still runs the image normalisation step so invalid images fail as they would for real.
pub struct MockOcrEngine {
    pub text: String,
    pub confidence: f32,
}

impl MockOcrEngine {
    pub fn new(text: &str, confidence: f32) -> Self {
        Self {
            text: text.to_string(),
            confidence,
        }
    }
}

impl OcrEngine for MockOcrEngine {
    fn ocr_image(&self, image_bytes: &[u8]) -> Result<OcrPageResult, ExtractionError> {
        prepare_for_ocr(image_bytes)?;
        Ok(OcrPageResult {
            text: self.text.clone(),
            confidence: self.confidence,
        })
    }
}
