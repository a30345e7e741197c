use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, info, warn};

use crate::app::domain::{Document, DocumentSource};
use crate::app::infrastructure::error::{ExtractionError, SourceKind};

/// One content item on a PDF page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageItem {
    Text(String),
    /// Marked-content boundaries and other items without a text payload.
    Marker,
}

/// An opened PDF, paged from 1.
pub trait PdfDocument {
    fn page_count(&self) -> usize;

    /// Items of a 1-based page, in content order.
    fn page_items(&self, page: usize) -> Result<Vec<PageItem>, String>;
}

/// Opens PDF bytes.
pub trait PdfBackend: Send + Sync {
    fn open(&self, bytes: &[u8]) -> Result<Box<dyn PdfDocument>, String>;
}

/// Backend built on the `pdf-extract` crate.
///
/// `pdf-extract` yields the text of each page; each non-empty line of a
/// page is treated as one text item.
pub struct PdfExtractBackend;

struct ExtractedPages {
    pages: Vec<String>,
}

impl PdfDocument for ExtractedPages {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_items(&self, page: usize) -> Result<Vec<PageItem>, String> {
        let text = page
            .checked_sub(1)
            .and_then(|i| self.pages.get(i))
            .ok_or_else(|| format!("page {} out of range 1..={}", page, self.pages.len()))?;

        Ok(text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| PageItem::Text(line.to_string()))
            .collect())
    }
}

impl PdfBackend for PdfExtractBackend {
    fn open(&self, bytes: &[u8]) -> Result<Box<dyn PdfDocument>, String> {
        // pdf-extract panics on some malformed inputs instead of returning an error
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(bytes)
        }));

        match result {
            Ok(Ok(pages)) => Ok(Box::new(ExtractedPages { pages })),
            Ok(Err(e)) => Err(format!("Failed to extract text from PDF: {}", e)),
            Err(_) => Err("PDF parser panicked on malformed input".to_string()),
        }
    }
}

/// Extract the text of every page, in order.
///
/// Items on a page are joined by single spaces and every page is followed
/// by a blank line. Never panics and never returns raw backend errors:
/// failures come back as [`ExtractionError`]s.
pub fn extract_pdf_text(backend: &dyn PdfBackend, bytes: &[u8]) -> Result<String, ExtractionError> {
    let corrupt = |detail: String| ExtractionError::Corrupt {
        source_kind: SourceKind::Pdf,
        detail,
    };

    let document = backend.open(bytes).map_err(|e| {
        warn!("PDF processing error: {}", e);
        corrupt(e)
    })?;

    let page_count = document.page_count();
    info!("Extracting text from {} PDF pages", page_count);

    let mut full_text = String::new();
    for page in 1..=page_count {
        let items = document.page_items(page).map_err(|e| {
            warn!("PDF processing error on page {}: {}", page, e);
            corrupt(e)
        })?;

        let page_text = items
            .iter()
            .filter_map(|item| match item {
                PageItem::Text(s) => Some(s.as_str()),
                PageItem::Marker => None,
            })
            .collect::<Vec<_>>()
            .join(" ");
        debug!("Page {}: {} characters", page, page_text.len());

        full_text.push_str(&page_text);
        full_text.push_str("\n\n");
    }

    if full_text.trim().is_empty() {
        warn!("PDF appears to be scanned or has no extractable text");
        return Err(ExtractionError::EmptyExtraction(SourceKind::Pdf));
    }

    Ok(full_text)
}

/// The PDF acquisition path as a finished document.
pub fn pdf_document(backend: &dyn PdfBackend, bytes: &[u8]) -> Result<Document, ExtractionError> {
    extract_pdf_text(backend, bytes).map(|text| Document::extracted(DocumentSource::Pdf, text))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::app::infrastructure::error::FailureKind;

    /// In-memory PDF with fixed pages.
    pub(crate) struct FakePdf {
        pub pages: Vec<Vec<PageItem>>,
        pub fail_open: bool,
    }

    impl PdfBackend for FakePdf {
        fn open(&self, _bytes: &[u8]) -> Result<Box<dyn PdfDocument>, String> {
            if self.fail_open {
                return Err("password required".to_string());
            }
            Ok(Box::new(FakeDoc {
                pages: self.pages.clone(),
            }))
        }
    }

    struct FakeDoc {
        pages: Vec<Vec<PageItem>>,
    }

    impl PdfDocument for FakeDoc {
        fn page_count(&self) -> usize {
            self.pages.len()
        }

        fn page_items(&self, page: usize) -> Result<Vec<PageItem>, String> {
            self.pages
                .get(page - 1)
                .cloned()
                .ok_or_else(|| "no such page".to_string())
        }
    }

    fn text(s: &str) -> PageItem {
        PageItem::Text(s.to_string())
    }

    #[test]
    fn test_pages_become_blocks_in_order() {
        let backend = FakePdf {
            pages: vec![
                vec![text("Page"), text("one")],
                vec![text("Page"), PageItem::Marker, text("two")],
                vec![text("Page three")],
            ],
            fail_open: false,
        };
        let out = extract_pdf_text(&backend, b"%PDF").unwrap();
        assert_eq!(out, "Page one\n\nPage two\n\nPage three\n\n");

        let blocks: Vec<&str> = out.trim_end().split("\n\n").collect();
        assert_eq!(blocks, vec!["Page one", "Page two", "Page three"]);
    }

    #[test]
    fn test_markers_are_not_text() {
        let backend = FakePdf {
            pages: vec![vec![PageItem::Marker, text("only"), PageItem::Marker]],
            fail_open: false,
        };
        assert_eq!(extract_pdf_text(&backend, b"").unwrap(), "only\n\n");
    }

    #[test]
    fn test_whitespace_only_pdf_is_empty_extraction() {
        let backend = FakePdf {
            pages: vec![vec![text(" ")], vec![PageItem::Marker]],
            fail_open: false,
        };
        let err = extract_pdf_text(&backend, b"").unwrap_err();
        assert_eq!(err.kind(), FailureKind::EmptyExtraction);
        assert_eq!(
            err.user_message(),
            "No text could be extracted from this PDF. The file might be scanned or protected."
        );
    }

    #[test]
    fn test_zero_pages_is_empty_extraction() {
        let backend = FakePdf {
            pages: Vec::new(),
            fail_open: false,
        };
        assert_eq!(
            extract_pdf_text(&backend, b"").unwrap_err().kind(),
            FailureKind::EmptyExtraction
        );
    }

    #[test]
    fn test_open_failure_is_corrupt() {
        let backend = FakePdf {
            pages: Vec::new(),
            fail_open: true,
        };
        let err = extract_pdf_text(&backend, b"").unwrap_err();
        assert_eq!(err.kind(), FailureKind::Corrupt);
        assert!(err.user_message().starts_with("Error processing PDF"));
    }

    #[test]
    fn test_real_backend_rejects_garbage() {
        let err = extract_pdf_text(&PdfExtractBackend, b"this is not a pdf").unwrap_err();
        assert_eq!(err.kind(), FailureKind::Corrupt);
    }

    #[test]
    fn test_pdf_document_source() {
        let backend = FakePdf {
            pages: vec![vec![text("Hello")]],
            fail_open: false,
        };
        let doc = pdf_document(&backend, b"").unwrap();
        assert_eq!(doc.source(), DocumentSource::Pdf);
        assert_eq!(doc.display_text(), "Hello\n\n");
    }

    #[test]
    fn test_extracted_pages_out_of_range() {
        let doc = ExtractedPages {
            pages: vec!["line one\n\n  line two  ".to_string()],
        };
        assert_eq!(
            doc.page_items(1).unwrap(),
            vec![text("line one"), text("line two")]
        );
        assert!(doc.page_items(0).is_err());
        assert!(doc.page_items(2).is_err());
    }
}
