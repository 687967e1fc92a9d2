use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://www.centraldetraducoes.net.br";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where and how pages are fetched. Passed explicitly to the fetcher and client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeConfig {
    pub base_url: Url,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        ScrapeConfig {
            base_url: Url::parse(DEFAULT_BASE_URL).unwrap_or_else(|e| panic!("bad default base url: {e}")),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ScrapeConfig {
    /// Flags win over TRAD_* env vars, which win over the built-in defaults.
    pub fn resolve(base_url: Option<String>, user_agent: Option<String>, timeout_secs: Option<u64>) -> Result<Self> {
        let mut cfg = ScrapeConfig::default();

        if let Some(raw) = base_url.or_else(|| env::var("TRAD_BASE_URL").ok()) {
            cfg.base_url = parse_base_url(&raw)?;
        }
        if let Some(ua) = user_agent.or_else(|| env::var("TRAD_USER_AGENT").ok()) {
            let ua = ua.trim();
            if !ua.is_empty() { cfg.user_agent = ua.to_string(); }
        }
        let timeout = timeout_secs.or_else(|| env::var("TRAD_TIMEOUT_SECS").ok().and_then(|s| s.parse().ok()));
        if let Some(secs) = timeout { cfg.timeout = Duration::from_secs(secs.max(1)); }

        Ok(cfg)
    }
}

// Joining relative paths onto "https://host/sub" would drop "sub", so keep a trailing slash.
fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim()).with_context(|| format!("invalid base url {raw:?}"))?;
    if url.cannot_be_a_base() {
        anyhow::bail!("base url {raw:?} cannot be used as a base");
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cfg = ScrapeConfig::resolve(Some("http://localhost:8080/mirror".into()), Some("test-agent".into()), Some(5)).unwrap();
        assert_eq!(cfg.base_url.as_str(), "http://localhost:8080/mirror/");
        assert_eq!(cfg.user_agent, "test-agent");
        assert_eq!(cfg.timeout, Duration::from_secs(5));
    }

    #[test]
    fn default_points_at_site() {
        let cfg = ScrapeConfig::default();
        assert_eq!(cfg.base_url.as_str(), "https://www.centraldetraducoes.net.br/");
        assert!(cfg.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn rejects_unusable_base() {
        assert!(ScrapeConfig::resolve(Some("not a url".into()), None, None).is_err());
        assert!(ScrapeConfig::resolve(Some("mailto:someone@example.com".into()), None, None).is_err());
    }
}
