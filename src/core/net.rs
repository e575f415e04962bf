// src/core/net.rs
// Page retrieval. One GET per call, fragment stripped, fixed timeout.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;

use crate::config::consts::USER_AGENT;
use crate::core::html::Document;
use crate::error::FetchError;

/// Anything that can turn a URL into a parsed [`Document`].
///
/// Shared by reference across worker threads, hence `Sync`.
pub trait Fetch: Sync {
    fn fetch(&self, url: &str) -> Result<Document, FetchError>;
}

/// Live HTTP(S) fetcher.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Request { url: s!(), reason: e.to_string() })?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Document, FetchError> {
        let url = strip_fragment(url)?;
        let shown = url.to_string();

        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::Request { url: shown.clone(), reason: e.to_string() })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: shown, status: status.as_u16() });
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_ascii_lowercase);
        if let Some(ct) = content_type.as_deref() {
            if !is_markup(ct) {
                return Err(FetchError::Parse {
                    url: shown,
                    reason: format!("unsupported content type {ct:?}"),
                });
            }
        }

        let body = resp
            .text()
            .map_err(|e| FetchError::Body { url: shown.clone(), reason: e.to_string() })?;
        logd!("fetched {} ({} bytes)", shown, body.len());
        Ok(Document::parse(&body))
    }
}

/// Parse `raw` and drop any `#fragment`; fragments never reach the server.
pub fn strip_fragment(raw: &str) -> Result<Url, FetchError> {
    let mut url = Url::parse(raw.trim()).map_err(|e| FetchError::InvalidUrl {
        url: s!(raw),
        reason: e.to_string(),
    })?;
    url.set_fragment(None);
    Ok(url)
}

fn is_markup(content_type: &str) -> bool {
    let mime = content_type.split(';').next().unwrap_or("").trim();
    mime.starts_with("text/") || mime == "application/xhtml+xml" || mime == "application/xml"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_is_removed() {
        let url = strip_fragment("https://a.test/sports?x=1#/live").unwrap();
        assert_eq!(url.as_str(), "https://a.test/sports?x=1");
    }

    #[test]
    fn bad_url_is_invalid_url_error() {
        let err = strip_fragment("not a url").unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }

    #[test]
    fn markup_content_types() {
        assert!(is_markup("text/html; charset=utf-8"));
        assert!(is_markup("application/xhtml+xml"));
        assert!(!is_markup("application/json"));
        assert!(!is_markup("image/png"));
    }
}
