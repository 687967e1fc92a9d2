use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

mod download;
mod types;

pub use types::{ExtractError, SearchResult, TranslationDetail, DOWNLOAD_NOT_FOUND};

pub(crate) struct Selectors {
    pub post: Selector,
    pub title: Selector,
    pub title_anchor: Selector,
    pub date: Selector,
    pub content: Selector,
    pub download: Selector,
    pub anchor: Selector,
}

fn parse(sel: &'static str) -> Selector {
    Selector::parse(sel).unwrap_or_else(|e| panic!("invalid built-in selector {sel:?}: {e:?}"))
}

pub(crate) static SELECTORS: LazyLock<Selectors> = LazyLock::new(|| Selectors {
    post: parse(".post"),
    title: parse(".post-title"),
    title_anchor: parse(".post-title a"),
    date: parse(".post-date"),
    content: parse(".post-content"),
    download: parse(".downloadLink .linkDownload"),
    anchor: parse("a"),
});

/// Pull every complete `.post` row out of a search-results page.
///
/// Rows missing a title or a link are skipped. Markup with no rows (or no
/// markup at all) yields an empty list.
pub fn extract_search_results(markup: &str) -> Vec<SearchResult> {
    let doc = Html::parse_document(markup);
    let s = &*SELECTORS;

    let mut out = Vec::new();
    for post in doc.select(&s.post) {
        let title = collect_text(post.select(&s.title));
        let link = post
            .select(&s.title_anchor)
            .next()
            .and_then(|a| a.value().attr("href"))
            .unwrap_or_default();
        let date = collect_text(post.select(&s.date));

        if title.is_empty() || link.is_empty() { continue; }
        out.push(SearchResult { title, link: link.to_string(), date });
    }
    out
}

/// Read title, description and download link from a translation page.
///
/// Absent fields come back empty (or as [`DOWNLOAD_NOT_FOUND`] for the link);
/// only markup with nothing in it is rejected.
pub fn extract_translation_detail(markup: &str, source_url: &str) -> Result<TranslationDetail, ExtractError> {
    if markup.trim().is_empty() { return Err(ExtractError::EmptyMarkup); }

    let doc = Html::parse_document(markup);
    let s = &*SELECTORS;

    let title = doc
        .select(&s.title)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let content_node = doc.select(&s.content).next();
    let content = content_node.map(flatten_inner_html).unwrap_or_default();

    let download_link = download::find_download_link(&doc)
        .unwrap_or_else(|| DOWNLOAD_NOT_FOUND.to_string());

    Ok(TranslationDetail { title, content, download_link, url: source_url.to_string() })
}

fn collect_text<'a>(nodes: impl Iterator<Item = ElementRef<'a>>) -> String {
    let mut buf = String::new();
    for n in nodes {
        for t in n.text() { buf.push_str(t); }
    }
    buf.trim().to_string()
}

// re-parse the node's inner markup on its own and keep only the text
fn flatten_inner_html(node: ElementRef<'_>) -> String {
    let inner = node.inner_html();
    let frag = Html::parse_fragment(&inner);
    frag.root_element().text().collect::<String>().trim().to_string()
}
