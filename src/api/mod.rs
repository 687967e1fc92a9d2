use std::future::IntoFuture;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use clap::Args;
use tracing::Instrument;

use crate::client::TranslationClient;
use crate::telemetry;
use crate::telemetry::ops::serve::Phase as ServePhase;

mod error;
mod handlers;

/// `trad serve`
#[derive(Args, Debug, Default)]
pub struct ServeCmd {
    /// Interface to bind (falls back to HOST, then 0.0.0.0)
    #[arg(long)]
    pub host: Option<String>,
    /// Port to bind (falls back to PORT, then 3000)
    #[arg(long)]
    pub port: Option<u16>,
}

impl ServeCmd {
    pub fn addr(&self) -> String {
        let host = self.host.clone()
            .or_else(|| std::env::var("HOST").ok())
            .unwrap_or_else(|| "0.0.0.0".to_string());
        let port = self.port
            .or_else(|| std::env::var("PORT").ok().and_then(|s| s.parse().ok()))
            .unwrap_or(3000);
        format!("{host}:{port}")
    }
}

pub async fn run(client: TranslationClient, args: ServeCmd) -> Result<()> {
    serve(client, &args.addr()).await
}

pub struct AppState {
    pub client: TranslationClient,
}

pub fn router(client: TranslationClient) -> Router {
    let state = Arc::new(AppState { client });
    Router::new()
        .route("/", get(handlers::api_root))
        .route("/api/search", get(handlers::api_search))
        .route("/api/translation", get(handlers::api_translation_missing))
        .route("/api/translation/", get(handlers::api_translation_missing))
        .route("/api/translation/{*path}", get(handlers::api_translation))
        .with_state(state)
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        // method + path only; search terms stay out of the span
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                }),
        )
}

pub async fn serve(client: TranslationClient, addr: &str) -> Result<()> {
    let log = telemetry::serve();
    let _g = log.root_span_kv([("addr", addr.to_string()), ("source", client.base_url().to_string())]).entered();

    let listener = tokio::net::TcpListener::bind(addr)
        .instrument(log.span(&ServePhase::Bind))
        .await
        .with_context(|| format!("bind {addr}"))?;
    log.info(format!("🚀 Translations API listening on http://{addr}"));
    log.info("   GET /api/search?q=<game>   GET /api/translation/<path>");

    axum::serve(listener, router(client))
        .into_future()
        .instrument(log.span(&ServePhase::Handle))
        .await
        .context("http server")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;
    use url::Url;

    use super::*;
    use crate::config::ScrapeConfig;
    use crate::extractor::DOWNLOAD_NOT_FOUND;
    use crate::fetch::testing::StubFetcher;

    fn app(stub: StubFetcher) -> Router {
        let cfg = ScrapeConfig { base_url: Url::parse("https://site.example/").unwrap(), ..ScrapeConfig::default() };
        router(TranslationClient::with_fetcher(cfg, Arc::new(stub)))
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
        let resp = app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap()).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn search_returns_json_array() {
        let page = r#"<div class="post"><h3 class="post-title"><a href="https://site.example/x.html">Game X</a></h3><span class="post-date">Today</span></div>"#;
        let (status, body) = get(app(StubFetcher::default().with_page("https://site.example/search?q=game", page)), "/api/search?q=game").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([{ "title": "Game X", "link": "https://site.example/x.html", "date": "Today" }]));
    }

    #[tokio::test]
    async fn search_without_query_is_bad_request() {
        let (status, body) = get(app(StubFetcher::default()), "/api/search").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
        let (status, _) = get(app(StubFetcher::default()), "/api/search?q=").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn search_upstream_failure_is_500() {
        let stub = StubFetcher::default().with_status("https://site.example/search?q=game", 502);
        let (status, body) = get(app(stub), "/api/search?q=game").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to search translations");
    }

    #[tokio::test]
    async fn translation_detail_ok() {
        let page = r#"
        <div class="post-title">Game X</div>
        <div class="post-content"><p>About</p><div class="downloadLink"><a class="linkDownload" href="http://x/d.zip">get</a></div></div>
        "#;
        let stub = StubFetcher::default().with_page("https://site.example/2024/01/game-x.html", page);
        let (status, body) = get(app(stub), "/api/translation/2024/01/game-x.html").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Game X");
        assert_eq!(body["downloadLink"], "http://x/d.zip");
        assert_eq!(body["url"], "https://site.example/2024/01/game-x.html");
    }

    #[tokio::test]
    async fn translation_without_download_uses_sentinel() {
        let stub = StubFetcher::default().with_page("https://site.example/p.html", r#"<div class="post-title">P</div>"#);
        let (status, body) = get(app(stub), "/api/translation/p.html").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["downloadLink"], DOWNLOAD_NOT_FOUND);
    }

    #[tokio::test]
    async fn translation_missing_page_is_404() {
        let (status, body) = get(app(StubFetcher::default()), "/api/translation/nope.html").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Translation not found");
    }

    #[tokio::test]
    async fn translation_bad_path_is_400() {
        let (status, _) = get(app(StubFetcher::default()), "/api/translation/a/..%2F..%2Fsecret").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = get(app(StubFetcher::default()), "/api/translation/").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn explicit_bind_address() {
        let cmd = ServeCmd { host: Some("127.0.0.1".into()), port: Some(8081) };
        assert_eq!(cmd.addr(), "127.0.0.1:8081");
    }

    #[tokio::test]
    async fn root_lists_endpoints() {
        let (status, body) = get(app(StubFetcher::default()), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["endpoints"]["search"], "/api/search?q=game_name");
        assert_eq!(body["source"], "https://site.example/");
    }
}
