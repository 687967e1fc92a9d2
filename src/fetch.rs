use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;

use crate::config::ScrapeConfig;
use crate::error::ScrapeError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Page(String),
    NotFound,
}

/// Which upstream statuses still yield a page body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusPolicy {
    /// Only 2xx; search pages.
    SuccessOnly,
    /// Anything below 500; translation pages, whose 4xx bodies are still parsed.
    BelowServerError,
}

/// Supplies raw page markup. HTTP status handling happens here, never in the extractor.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url, policy: StatusPolicy) -> Result<FetchOutcome, ScrapeError>;
}

/// 404 is always `NotFound`; other statuses are kept or rejected per `policy`.
pub fn classify(status: u16, body: String, policy: StatusPolicy, url: &Url) -> Result<FetchOutcome, ScrapeError> {
    if status == StatusCode::NOT_FOUND.as_u16() { return Ok(FetchOutcome::NotFound); }
    let accepted = match policy {
        StatusPolicy::SuccessOnly => (200..300).contains(&status),
        StatusPolicy::BelowServerError => status < 500,
    };
    if accepted { Ok(FetchOutcome::Page(body)) } else { Err(ScrapeError::Status { status, url: url.to_string() }) }
}

#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(cfg: &ScrapeConfig) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .user_agent(cfg.user_agent.clone())
            .timeout(cfg.timeout)
            .build()?;
        Ok(HttpFetcher { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url, policy: StatusPolicy) -> Result<FetchOutcome, ScrapeError> {
        let resp = self.client.get(url.clone()).send().await?;
        let status = resp.status().as_u16();
        let text = resp.text().await?;
        classify(status, text, policy, url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> Url { Url::parse("https://site.example/p.html").unwrap() }

    #[test]
    fn not_found_wins_under_any_policy() {
        for policy in [StatusPolicy::SuccessOnly, StatusPolicy::BelowServerError] {
            assert_eq!(classify(404, "gone".into(), policy, &url()).unwrap(), FetchOutcome::NotFound);
        }
    }

    #[test]
    fn lenient_policy_keeps_client_error_bodies() {
        let got = classify(403, "<p>blocked</p>".into(), StatusPolicy::BelowServerError, &url()).unwrap();
        assert_eq!(got, FetchOutcome::Page("<p>blocked</p>".into()));
        assert!(matches!(classify(503, String::new(), StatusPolicy::BelowServerError, &url()), Err(ScrapeError::Status { status: 503, .. })));
    }

    #[test]
    fn strict_policy_rejects_non_success() {
        assert!(matches!(classify(410, "x".into(), StatusPolicy::SuccessOnly, &url()), Err(ScrapeError::Status { status: 410, .. })));
        assert_eq!(classify(200, "ok".into(), StatusPolicy::SuccessOnly, &url()).unwrap(), FetchOutcome::Page("ok".into()));
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    /// Serves canned (status, body) pairs keyed by full URL; anything unknown is a 404.
    #[derive(Default)]
    pub struct StubFetcher {
        pages: HashMap<String, (u16, String)>,
        pub seen: Mutex<Vec<String>>,
    }

    impl StubFetcher {
        pub fn with_page(self, url: &str, html: &str) -> Self {
            self.with_response(url, 200, html)
        }

        pub fn with_status(self, url: &str, status: u16) -> Self {
            self.with_response(url, status, "")
        }

        pub fn with_response(mut self, url: &str, status: u16, html: &str) -> Self {
            self.pages.insert(url.to_string(), (status, html.to_string()));
            self
        }
    }

    #[async_trait]
    impl PageFetcher for StubFetcher {
        async fn fetch(&self, url: &Url, policy: StatusPolicy) -> Result<FetchOutcome, ScrapeError> {
            self.seen.lock().unwrap().push(url.to_string());
            match self.pages.get(url.as_str()) {
                Some((status, body)) => classify(*status, body.clone(), policy, url),
                None => Ok(FetchOutcome::NotFound),
            }
        }
    }
}
