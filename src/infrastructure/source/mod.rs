// ============================================================
// SHEET SOURCE
// ============================================================
// Fetch the published CSV export over HTTP

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::error::{AppError, Result};

/// Where the deck document comes from
#[async_trait]
pub trait SheetSource: Send + Sync {
    /// Fetch the whole document as text
    async fn fetch(&self) -> Result<String>;

    /// Short human-readable origin, for logs
    fn describe(&self) -> String;
}

pub struct HttpSheetSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSheetSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl SheetSource for HttpSheetSource {
    async fn fetch(&self) -> Result<String> {
        debug!(url = %self.url, "Fetching sheet");

        let response = self.client.get(&self.url).send().await.map_err(|e| {
            warn!(error = %e, url = %self.url, "Sheet request failed");
            AppError::SourceUnavailable(format!("Request failed: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::SourceUnavailable(format!(
                "Sheet responded with status {}",
                status
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::SourceUnavailable(format!("Failed to read body: {}", e)))?;

        Ok(decode_body(&bytes))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Decode a response body as UTF-8, dropping a leading BOM so the first
/// header name stays clean. Invalid sequences become U+FFFD.
pub fn decode_body(bytes: &[u8]) -> String {
    let (text, had_errors) = encoding_rs::UTF_8.decode_with_bom_removal(bytes);
    if had_errors {
        warn!("Sheet body contained invalid UTF-8, replaced with U+FFFD");
    }
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{web, App, HttpResponse, HttpServer};

    async fn serve(status: u16, body: &'static str) -> String {
        let server = HttpServer::new(move || {
            App::new().route(
                "/sheet.csv",
                web::get().to(move || async move {
                    HttpResponse::build(
                        actix_web::http::StatusCode::from_u16(status).unwrap(),
                    )
                    .content_type("text/csv")
                    .body(body)
                }),
            )
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();

        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());
        format!("http://{}/sheet.csv", addr)
    }

    #[test]
    fn test_decode_body_strips_bom() {
        let bytes = b"\xEF\xBB\xBFtitle,desc\nA,b\n";
        assert_eq!(decode_body(bytes), "title,desc\nA,b\n");
    }

    #[test]
    fn test_decode_body_replaces_invalid_bytes() {
        let bytes = b"title\n\xFFx\n";
        assert_eq!(decode_body(bytes), "title\n\u{FFFD}x\n");
    }

    #[actix_web::test]
    async fn test_fetch_returns_body() {
        let url = serve(200, "title,desc\nA,b\n").await;
        let source = HttpSheetSource::new(url, Duration::from_secs(5)).unwrap();

        assert_eq!(source.fetch().await.unwrap(), "title,desc\nA,b\n");
    }

    #[actix_web::test]
    async fn test_non_success_status_is_unavailable() {
        let url = serve(404, "missing").await;
        let source = HttpSheetSource::new(url, Duration::from_secs(5)).unwrap();

        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, AppError::SourceUnavailable(msg) if msg.contains("404")));
    }

    #[actix_web::test]
    async fn test_connection_failure_is_unavailable() {
        let source = HttpSheetSource::new("http://127.0.0.1:1/sheet.csv", Duration::from_secs(2)).unwrap();
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, AppError::SourceUnavailable(_)));
    }

    #[actix_web::test]
    async fn test_slow_sheet_hits_configured_timeout() {
        let server = HttpServer::new(|| {
            App::new().route(
                "/sheet.csv",
                web::get().to(|| async {
                    actix_web::rt::time::sleep(Duration::from_secs(5)).await;
                    HttpResponse::Ok().body("title\nlate\n")
                }),
            )
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());

        let source =
            HttpSheetSource::new(format!("http://{}/sheet.csv", addr), Duration::from_millis(200))
                .unwrap();
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, AppError::SourceUnavailable(_)));
    }
}
