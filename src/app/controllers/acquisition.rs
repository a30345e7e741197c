use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;

use tracing::{debug, info};

use crate::app::domain::{Document, ExtractionJob, Message, RequestId};
use crate::app::infrastructure::config::AppConfig;
use crate::app::infrastructure::error::ExtractionError;
use crate::app::services::ocr::{OcrEngine, TesseractEngine, image_document};
use crate::app::services::pdf::{PdfBackend, PdfExtractBackend, pdf_document};
use crate::app::services::scraper::{HtmlFetcher, ScrapingProxy, web_document};

/// The three extraction backends, shared by every worker.
pub struct Extractors {
    pub pdf: Box<dyn PdfBackend>,
    pub ocr: Box<dyn OcrEngine>,
    pub ocr_language: String,
    pub fetcher: Box<dyn HtmlFetcher>,
}

impl Extractors {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            pdf: Box::new(PdfExtractBackend),
            ocr: Box::new(TesseractEngine::from_config(&config.ocr)),
            ocr_language: config.ocr.language.clone(),
            fetcher: Box::new(ScrapingProxy::from_config(&config.scraper)),
        }
    }

    /// Run one job to completion on the calling thread.
    ///
    /// Files are routed by declared media type: `application/pdf` goes to
    /// the PDF backend, everything else to OCR.
    pub fn run(&self, job: &ExtractionJob) -> Result<Document, ExtractionError> {
        match job {
            ExtractionJob::File(upload) if upload.is_pdf() => {
                info!("Extracting PDF {}", upload.name);
                pdf_document(self.pdf.as_ref(), &upload.bytes)
            }
            ExtractionJob::File(upload) => {
                image_document(self.ocr.as_ref(), upload, &self.ocr_language)
            }
            ExtractionJob::Url(url) => web_document(self.fetcher.as_ref(), url),
        }
    }
}

/// Runs extraction jobs on worker threads and posts the outcome back
/// to the state owner as [`Message::AcquisitionFinished`].
pub struct Acquirer {
    extractors: Arc<Extractors>,
    sender: Sender<Message>,
}

impl Acquirer {
    pub fn new(extractors: Extractors, sender: Sender<Message>) -> Self {
        Self {
            extractors: Arc::new(extractors),
            sender,
        }
    }

    pub fn spawn(&self, request: RequestId, job: ExtractionJob) {
        let extractors = Arc::clone(&self.extractors);
        let sender = self.sender.clone();

        debug!("Starting acquisition {:?}", request);
        thread::spawn(move || {
            let outcome = extractors.run(&job);
            // Receiver gone means the front end already quit
            if sender
                .send(Message::AcquisitionFinished { request, outcome })
                .is_err()
            {
                debug!("Acquisition {:?} finished after shutdown", request);
            }
        });
    }
}
