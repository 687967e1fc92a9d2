use serde::Serialize;
use thiserror::Error;

/// Returned in place of a download URL when none of the lookup rules match.
pub const DOWNLOAD_NOT_FOUND: &str = "Link de download não encontrado";

/// One row of a search-results page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub title: String,
    pub link: String,
    /// As printed by the site; never parsed.
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationDetail {
    pub title: String,
    pub content: String,
    pub download_link: String,
    pub url: String,
}

impl TranslationDetail {
    pub fn has_download(&self) -> bool { self.download_link != DOWNLOAD_NOT_FOUND }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("page markup is empty")]
    EmptyMarkup,
}
