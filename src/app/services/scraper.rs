use tracing::{debug, info, warn};

use crate::app::domain::Document;
use crate::app::infrastructure::config::ScraperConfig;
use crate::app::infrastructure::error::{ExtractionError, SourceKind};
use crate::app::services::cleaner::clean_html;

/// Fetches the rendered HTML of a page.
pub trait HtmlFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Result<String, String>;
}

/// Fetches pages through a scraping/render proxy.
///
/// The target URL goes out as the `url` query parameter. The `api_key`
/// parameter is only sent when a credential is configured; without one the
/// endpoint is expected to be a mediator that adds it server-side.
pub struct ScrapingProxy {
    endpoint: String,
    api_key: Option<String>,
    timeout_secs: Option<u64>,
}

impl ScrapingProxy {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>, timeout_secs: Option<u64>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key,
            timeout_secs,
        }
    }

    pub fn from_config(config: &ScraperConfig) -> Self {
        let api_key = config.resolve_api_key();
        if api_key.is_none() {
            debug!(
                "No scraper credential in ${} or config; calling {} without api_key",
                config.api_key_env, config.endpoint
            );
        }
        Self::new(config.endpoint.clone(), api_key, config.timeout_secs)
    }

    fn request(&self, url: &str) -> minreq::Request {
        let mut request = minreq::get(&self.endpoint);
        if let Some(key) = &self.api_key {
            request = request.with_param("api_key", key);
        }
        request = request.with_param("url", url);
        if let Some(secs) = self.timeout_secs {
            request = request.with_timeout(secs);
        }
        request
    }
}

impl HtmlFetcher for ScrapingProxy {
    fn fetch(&self, url: &str) -> Result<String, String> {
        info!("Fetching {} via {}", url, self.endpoint);

        let response = self
            .request(url)
            .send()
            .map_err(|e| format!("Failed to reach scraping service: {}", e))?;

        if !(200..300).contains(&response.status_code) {
            return Err(format!(
                "Scraping service returned {} {}",
                response.status_code, response.reason_phrase
            ));
        }

        let body = response
            .as_str()
            .map_err(|e| format!("Response body is not valid UTF-8: {}", e))?;
        debug!("Fetched {} bytes of HTML", body.len());
        Ok(body.to_string())
    }
}

/// The URL acquisition path: fetch, clean, and wrap as a document.
///
/// The fetched HTML is kept as the raw text; the cleaned text is displayed.
pub fn web_document(fetcher: &dyn HtmlFetcher, url: &str) -> Result<Document, ExtractionError> {
    let html = fetcher.fetch(url).map_err(|e| {
        warn!("Error fetching URL content: {}", e);
        ExtractionError::NetworkError(e)
    })?;

    let cleaned = clean_html(&html);
    if cleaned.is_empty() {
        warn!("No readable text left after cleaning {}", url);
        return Err(ExtractionError::EmptyExtraction(SourceKind::Web));
    }

    Ok(Document::cleaned(html, cleaned))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::app::domain::DocumentSource;
    use crate::app::infrastructure::error::FailureKind;

    pub(crate) struct FakeFetcher {
        pub result: Result<String, String>,
    }

    impl FakeFetcher {
        pub fn html(body: &str) -> Self {
            Self {
                result: Ok(body.to_string()),
            }
        }

        pub fn failing(reason: &str) -> Self {
            Self {
                result: Err(reason.to_string()),
            }
        }
    }

    impl HtmlFetcher for FakeFetcher {
        fn fetch(&self, _url: &str) -> Result<String, String> {
            self.result.clone()
        }
    }

    #[test]
    fn test_web_document_is_cleaned() {
        let html = "<html><body><nav>Home | About | Contact | Archive</nav>\
                    <article><p>The article body is what the reader wants to see.</p></article>\
                    </body></html>";
        let doc = web_document(&FakeFetcher::html(html), "https://example.org/post").unwrap();
        assert_eq!(doc.source(), DocumentSource::Web);
        assert_eq!(doc.display_text(), "The article body is what the reader wants to see.");
        assert_eq!(doc.raw_text(), html);
    }

    #[test]
    fn test_fetch_failure_is_network_error() {
        let err = web_document(&FakeFetcher::failing("connection refused"), "https://example.org")
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::NetworkError);
        assert!(err.user_message().contains("Could not fetch content"));
    }

    #[test]
    fn test_page_with_only_chrome_is_empty() {
        let html = "<body><header>Header text that is long enough</header><p>short</p></body>";
        let err = web_document(&FakeFetcher::html(html), "https://example.org").unwrap_err();
        assert_eq!(err, ExtractionError::EmptyExtraction(SourceKind::Web));
    }

    #[test]
    fn test_unreachable_endpoint_is_an_error() {
        let proxy = ScrapingProxy::new("http://127.0.0.1:9/scrape", None, Some(2));
        assert!(proxy.fetch("https://example.org").is_err());
    }

    #[test]
    fn test_from_config_without_credential() {
        let config = ScraperConfig {
            endpoint: "https://mediator.example.org/scrape".to_string(),
            api_key_env: "READEASE_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            api_key: None,
            timeout_secs: Some(15),
        };
        let proxy = ScrapingProxy::from_config(&config);
        assert_eq!(proxy.api_key, None);
        assert_eq!(proxy.endpoint, "https://mediator.example.org/scrape");
        assert_eq!(proxy.timeout_secs, Some(15));
    }
}
