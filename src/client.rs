use std::sync::Arc;
use std::time::Instant;

use tracing::Instrument;
use url::Url;

use crate::config::ScrapeConfig;
use crate::error::ScrapeError;
use crate::extractor::{self, SearchResult, TranslationDetail};
use crate::fetch::{FetchOutcome, HttpFetcher, PageFetcher, StatusPolicy};
use crate::telemetry;
use crate::telemetry::ctx::LogCtx;
use crate::telemetry::ops::detail::{Detail, Phase as DetailPhase};
use crate::telemetry::ops::search::{Search, Phase as SearchPhase};

/// The two site operations shared by the API and the terminal front-ends.
#[derive(Clone)]
pub struct TranslationClient {
    cfg: ScrapeConfig,
    fetcher: Arc<dyn PageFetcher>,
}

impl TranslationClient {
    pub fn new(cfg: ScrapeConfig) -> Result<Self, ScrapeError> {
        let fetcher = HttpFetcher::new(&cfg)?;
        Ok(Self::with_fetcher(cfg, Arc::new(fetcher)))
    }

    pub fn with_fetcher(cfg: ScrapeConfig, fetcher: Arc<dyn PageFetcher>) -> Self {
        TranslationClient { cfg, fetcher }
    }

    pub fn base_url(&self) -> &Url { &self.cfg.base_url }

    pub fn search_url(&self, query: &str) -> Result<Url, ScrapeError> {
        let mut url = self.cfg.base_url.join("search")?;
        url.query_pairs_mut().append_pair("q", query);
        Ok(url)
    }

    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ScrapeError> {
        let query = query.trim();
        if query.is_empty() { return Err(ScrapeError::InvalidQuery); }

        let log = telemetry::search();
        let root = log.root_span_kv([("query", query.to_string())]);
        self.run_search(&log, query).instrument(root).await
    }

    async fn run_search(&self, log: &LogCtx<Search>, query: &str) -> Result<Vec<SearchResult>, ScrapeError> {
        let t0 = Instant::now();
        let url = self.search_url(query)?;
        let markup = match self.fetcher.fetch(&url, StatusPolicy::SuccessOnly).instrument(log.span(&SearchPhase::Fetch)).await? {
            FetchOutcome::Page(html) => html,
            FetchOutcome::NotFound => return Err(ScrapeError::NotFound(url.to_string())),
        };

        let raw = { let _s = log.span(&SearchPhase::Extract).entered(); extractor::extract_search_results(&markup) };

        let (results, dropped) = { let _s = log.span(&SearchPhase::Resolve).entered(); self.absolutize(raw) };
        log.found(query, results.len(), dropped);
        log.info_kv("search done", [("elapsed_ms", t0.elapsed().as_millis().to_string())]);
        Ok(results)
    }

    pub async fn get_details(&self, url: &str) -> Result<TranslationDetail, ScrapeError> {
        let log = telemetry::detail();
        let root = log.root_span_kv([("url", url.to_string())]);
        self.run_details(&log, url).instrument(root).await
    }

    async fn run_details(&self, log: &LogCtx<Detail>, url: &str) -> Result<TranslationDetail, ScrapeError> {
        let parsed = Url::parse(url.trim())?;
        let markup = match self.fetcher.fetch(&parsed, StatusPolicy::BelowServerError).instrument(log.span(&DetailPhase::Fetch)).await? {
            FetchOutcome::Page(html) => html,
            FetchOutcome::NotFound => {
                log.warn(format!("not found: {url}"));
                return Err(ScrapeError::NotFound(url.to_string()));
            }
        };

        let detail = {
            let _s = log.span(&DetailPhase::Extract).entered();
            extractor::extract_translation_detail(&markup, url)?
        };
        log.extracted(url, detail.has_download(), detail.content.chars().count());
        Ok(detail)
    }

    /// Map a site-relative path (as received by `/api/translation/<path>`) to a page URL.
    pub fn resolve_path(&self, path: &str) -> Result<Url, ScrapeError> {
        let trimmed = path.trim().trim_start_matches('/');
        if trimmed.is_empty() || trimmed.contains("..") {
            return Err(ScrapeError::InvalidPath(path.to_string()));
        }
        let url = self.cfg.base_url.join(trimmed)?;
        if url.origin() != self.cfg.base_url.origin() {
            return Err(ScrapeError::InvalidPath(path.to_string()));
        }
        Ok(url)
    }

    // Relative links are joined onto the base URL; links that can't be joined are dropped.
    fn absolutize(&self, raw: Vec<SearchResult>) -> (Vec<SearchResult>, usize) {
        let mut dropped = 0usize;
        let mut out = Vec::with_capacity(raw.len());
        for mut r in raw {
            match self.cfg.base_url.join(&r.link) {
                Ok(u) => { r.link = u.to_string(); out.push(r); }
                Err(_) => dropped += 1,
            }
        }
        (out, dropped)
    }
}
