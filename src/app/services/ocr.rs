use std::io::Write;
use std::process::{Command, Stdio};

use tracing::{debug, info, warn};

use crate::app::domain::{Document, DocumentSource, FileUpload};
use crate::app::infrastructure::config::OcrConfig;
use crate::app::infrastructure::error::{ExtractionError, SourceKind};

/// Image-to-text recognition, one pass per call.
pub trait OcrEngine: Send + Sync {
    fn recognize(&self, image: &[u8], language: &str) -> Result<String, String>;
}

/// Runs the Tesseract command line tool, feeding the image on stdin.
///
/// Tesseract must be installed:
/// - Linux: sudo apt-get install tesseract-ocr
/// - Mac: brew install tesseract
/// - Windows: https://github.com/UB-Mannheim/tesseract/wiki
pub struct TesseractEngine {
    command: String,
}

impl TesseractEngine {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub fn from_config(config: &OcrConfig) -> Self {
        Self::new(config.command.clone())
    }
}

impl OcrEngine for TesseractEngine {
    fn recognize(&self, image: &[u8], language: &str) -> Result<String, String> {
        debug!("Running {} on {} bytes (language {})", self.command, image.len(), language);

        let mut child = Command::new(&self.command)
            .args(["stdin", "stdout", "-l", language])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| format!("Failed to start {}: {}", self.command, e))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(image)
                .map_err(|e| format!("Failed to send image to {}: {}", self.command, e))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| format!("Failed to read {} output: {}", self.command, e))?;

        // Tesseract reports progress and warnings on stderr
        for line in String::from_utf8_lossy(&output.stderr).lines() {
            debug!("{}: {}", self.command, line);
        }

        if !output.status.success() {
            return Err(format!("{} exited with {}", self.command, output.status));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Recognize the text of an uploaded image.
///
/// Files whose declared type is not `image/*` are rejected without
/// running the engine.
pub fn recognize_image(
    engine: &dyn OcrEngine,
    upload: &FileUpload,
    language: &str,
) -> Result<String, ExtractionError> {
    if !upload.is_image() {
        warn!("Refusing OCR for {} ({})", upload.name, upload.media_type);
        return Err(ExtractionError::UnsupportedType(upload.media_type.clone()));
    }

    info!("Performing OCR on {}", upload.name);
    let text = engine.recognize(&upload.bytes, language).map_err(|e| {
        warn!("OCR error: {}", e);
        ExtractionError::Corrupt {
            source_kind: SourceKind::Image,
            detail: e,
        }
    })?;

    if text.trim().is_empty() {
        return Err(ExtractionError::EmptyExtraction(SourceKind::Image));
    }

    info!("OCR completed: {} characters", text.len());
    Ok(text)
}

/// The OCR acquisition path as a finished document.
pub fn image_document(
    engine: &dyn OcrEngine,
    upload: &FileUpload,
    language: &str,
) -> Result<Document, ExtractionError> {
    recognize_image(engine, upload, language).map(|text| Document::extracted(DocumentSource::Image, text))
}
