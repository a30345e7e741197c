use crate::app::infrastructure::error::{ExtractionError, FailureKind};

/// Monotonic id handed out for every asynchronous acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

/// Which kind of input the reader is currently working with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputType {
    #[default]
    Text,
    File,
    Url,
}

/// Where the current document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentSource {
    Empty,
    Direct,
    Pdf,
    Image,
    Web,
    Failure(FailureKind),
}

/// The working text. Replaced wholesale on every acquisition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    raw_text: String,
    display_text: String,
    source: DocumentSource,
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}

impl Document {
    pub fn empty() -> Self {
        Self {
            raw_text: String::new(),
            display_text: String::new(),
            source: DocumentSource::Empty,
        }
    }

    /// Typed or pasted text: raw and display are the same string.
    pub fn direct(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            display_text: text.clone(),
            raw_text: text,
            source: DocumentSource::Direct,
        }
    }

    /// Text extracted from a file; nothing is cleaned.
    pub fn extracted(source: DocumentSource, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            display_text: text.clone(),
            raw_text: text,
            source,
        }
    }

    /// A fetched page: the HTML is kept as raw text, the cleaned text is displayed.
    pub fn cleaned(raw_html: impl Into<String>, display_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_html.into(),
            display_text: display_text.into(),
            source: DocumentSource::Web,
        }
    }

    /// The fixed user-facing message stands in for the text.
    pub fn failure(error: &ExtractionError) -> Self {
        let message = error.user_message();
        Self {
            raw_text: message.to_string(),
            display_text: message.to_string(),
            source: DocumentSource::Failure(error.kind()),
        }
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    pub fn source(&self) -> DocumentSource {
        self.source
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.source, DocumentSource::Failure(_))
    }

    pub fn is_empty(&self) -> bool {
        self.display_text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::infrastructure::error::SourceKind;

    #[test]
    fn test_direct_document() {
        let doc = Document::direct("Hello reader.");
        assert_eq!(doc.raw_text(), "Hello reader.");
        assert_eq!(doc.display_text(), "Hello reader.");
        assert_eq!(doc.source(), DocumentSource::Direct);
        assert!(!doc.is_failure());
    }

    #[test]
    fn test_cleaned_document_keeps_raw_html() {
        let doc = Document::cleaned("<p>long enough paragraph text</p>", "long enough paragraph text");
        assert_ne!(doc.raw_text(), doc.display_text());
        assert_eq!(doc.source(), DocumentSource::Web);
    }

    #[test]
    fn test_failure_document() {
        let err = ExtractionError::EmptyExtraction(SourceKind::Image);
        let doc = Document::failure(&err);
        assert_eq!(doc.display_text(), "No text could be extracted from this image.");
        assert_eq!(doc.source(), DocumentSource::Failure(FailureKind::EmptyExtraction));
        assert!(doc.is_failure());
    }

    #[test]
    fn test_request_ids_are_ordered() {
        assert!(RequestId(2) > RequestId(1));
    }
}
