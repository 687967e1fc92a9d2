use scraper::{ElementRef, Html};

use super::SELECTORS;

/// First match wins:
/// 1) `.downloadLink .linkDownload[href]` anywhere on the page
/// 2) first anchor across all `.post-content` blocks whose text or href mentions "download"
pub(super) fn find_download_link(doc: &Html) -> Option<String> {
    if let Some(href) = doc
        .select(&SELECTORS.download)
        .next()
        .and_then(non_empty_href)
    {
        return Some(href.to_string());
    }

    doc.select(&SELECTORS.content)
        .flat_map(|c| c.select(&SELECTORS.anchor))
        .find_map(|a| {
            let href = non_empty_href(a)?;
            mentions_download(a, href).then(|| href.to_string())
        })
}

fn non_empty_href<'a>(el: ElementRef<'a>) -> Option<&'a str> {
    el.value().attr("href").filter(|h| !h.is_empty())
}

fn mentions_download(anchor: ElementRef<'_>, href: &str) -> bool {
    let text = anchor.text().collect::<String>().to_lowercase();
    text.contains("download") || href.to_lowercase().contains("download")
}

#[cfg(test)]
mod tests {
    use crate::extractor::{extract_translation_detail, DOWNLOAD_NOT_FOUND};

    fn link_of(html: &str) -> String {
        extract_translation_detail(html, "https://site.example/p.html").unwrap().download_link
    }

    #[test]
    fn container_link_wins_over_content_anchors() {
        let html = r#"
        <div class="post-content">
          <a href="http://a/download.zip">Download here</a>
        </div>
        <div class="downloadLink"><a class="linkDownload" href="http://x/d.zip">x</a></div>
        "#;
        assert_eq!(link_of(html), "http://x/d.zip");
    }

    #[test]
    fn falls_back_to_anchor_text() {
        let html = r#"
        <div class="post-content">
          <a href="http://a/readme.html">Read me</a>
          <a href="http://a/file.rar">Download here</a>
          <a href="http://a/download/second.rar">second</a>
        </div>
        "#;
        assert_eq!(link_of(html), "http://a/file.rar");
    }

    #[test]
    fn falls_back_to_href_case_insensitive() {
        let html = r#"
        <div class="post-content">
          <a href="http://a/about">About</a>
          <a href="http://files.example/DOWNLOAD?id=7">Mirror</a>
        </div>
        "#;
        assert_eq!(link_of(html), "http://files.example/DOWNLOAD?id=7");
    }

    #[test]
    fn container_without_href_falls_through() {
        let html = r#"
        <div class="downloadLink"><a class="linkDownload">broken</a></div>
        <div class="post-content"><a href="http://a/patch.zip">DOWNLOAD</a></div>
        "#;
        assert_eq!(link_of(html), "http://a/patch.zip");
    }

    #[test]
    fn anchors_without_href_are_ignored() {
        let html = r#"
        <div class="post-content">
          <a name="download">Download anchor</a>
          <a href="">Download empty</a>
        </div>
        "#;
        assert_eq!(link_of(html), DOWNLOAD_NOT_FOUND);
    }

    #[test]
    fn anchors_outside_content_are_ignored() {
        let html = r#"
        <nav><a href="http://a/download">Download app</a></nav>
        <div class="post-content"><a href="http://a/b">b</a></div>
        "#;
        assert_eq!(link_of(html), DOWNLOAD_NOT_FOUND);
    }

    #[test]
    fn scans_every_content_block_in_order() {
        let html = r#"
        <div class="post-title">Game</div>
        <div class="post-content"><p>intro</p></div>
        <div class="post-content"><a href="http://a/patch.zip">Download here</a></div>
        <div class="post-content"><a href="http://a/download/later.zip">later</a></div>
        "#;
        assert_eq!(link_of(html), "http://a/patch.zip");
    }

    #[test]
    fn no_qualifying_anchor_yields_sentinel() {
        let html = r#"<div class="post-title">Game</div><div class="post-content"><p>no links</p></div>"#;
        let got = link_of(html);
        assert_eq!(got, DOWNLOAD_NOT_FOUND);
        assert!(!got.is_empty());
    }
}
