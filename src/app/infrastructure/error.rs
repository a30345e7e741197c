use std::fmt;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Speech error: {0}")]
    Speech(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience type alias for Results with AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Which extraction path produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Pdf,
    Image,
    Web,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pdf => "PDF",
            Self::Image => "image",
            Self::Web => "web page",
        };
        f.write_str(name)
    }
}

/// Coarse failure classification, stable enough for callers to branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    EmptyExtraction,
    Corrupt,
    NetworkError,
    UnsupportedType,
}

/// Why an acquisition produced no usable text.
///
/// Every variant maps to a fixed sentence via [`ExtractionError::user_message`];
/// that sentence is what the reader sees in place of the document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionError {
    #[error("{0} produced no text")]
    EmptyExtraction(SourceKind),

    #[error("{source_kind} could not be processed: {detail}")]
    Corrupt { source_kind: SourceKind, detail: String },

    #[error("network error: {0}")]
    NetworkError(String),

    #[error("unsupported media type: {0}")]
    UnsupportedType(String),
}

impl ExtractionError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::EmptyExtraction(_) => FailureKind::EmptyExtraction,
            Self::Corrupt { .. } => FailureKind::Corrupt,
            Self::NetworkError(_) => FailureKind::NetworkError,
            Self::UnsupportedType(_) => FailureKind::UnsupportedType,
        }
    }

    /// The sentence shown to the reader instead of document text.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::EmptyExtraction(SourceKind::Pdf) => {
                "No text could be extracted from this PDF. The file might be scanned or protected."
            }
            Self::EmptyExtraction(SourceKind::Image) => "No text could be extracted from this image.",
            Self::EmptyExtraction(SourceKind::Web) => "No readable text was found at the provided URL.",
            Self::Corrupt { source_kind: SourceKind::Pdf, .. } => {
                "Error processing PDF. Please ensure the file is not corrupted or password protected."
            }
            Self::Corrupt { .. } => "Error processing image. Please try another file.",
            Self::NetworkError(_) => {
                "Error: Could not fetch content from the provided URL. Please make sure the URL is correct and accessible."
            }
            Self::UnsupportedType(_) => "Error: File must be an image for OCR processing.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
        assert!(app_err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_display() {
        let err = AppError::Storage("disk full".to_string());
        assert_eq!(err.to_string(), "Storage error: disk full");

        let err = AppError::Speech("espeak-ng not found".to_string());
        assert_eq!(err.to_string(), "Speech error: espeak-ng not found");

        let err = AppError::InvalidInput("font size 99".to_string());
        assert_eq!(err.to_string(), "Invalid input: font size 99");
    }

    #[test]
    fn test_extraction_kinds() {
        assert_eq!(
            ExtractionError::EmptyExtraction(SourceKind::Pdf).kind(),
            FailureKind::EmptyExtraction
        );
        let corrupt = ExtractionError::Corrupt {
            source_kind: SourceKind::Image,
            detail: "bad header".to_string(),
        };
        assert_eq!(corrupt.kind(), FailureKind::Corrupt);
        assert_eq!(
            ExtractionError::NetworkError("503".to_string()).kind(),
            FailureKind::NetworkError
        );
        assert_eq!(
            ExtractionError::UnsupportedType("text/plain".to_string()).kind(),
            FailureKind::UnsupportedType
        );
    }

    #[test]
    fn test_user_messages_depend_on_source() {
        let pdf = ExtractionError::Corrupt {
            source_kind: SourceKind::Pdf,
            detail: String::new(),
        };
        let image = ExtractionError::Corrupt {
            source_kind: SourceKind::Image,
            detail: String::new(),
        };
        assert!(pdf.user_message().starts_with("Error processing PDF"));
        assert!(image.user_message().starts_with("Error processing image"));
        assert_eq!(
            ExtractionError::UnsupportedType("application/zip".into()).user_message(),
            "Error: File must be an image for OCR processing."
        );
    }

    #[test]
    fn test_internal_display_keeps_detail() {
        let err = ExtractionError::Corrupt {
            source_kind: SourceKind::Pdf,
            detail: "xref table missing".to_string(),
        };
        assert_eq!(err.to_string(), "PDF could not be processed: xref table missing");
    }
}
