// tests/common/mod.rs
//
// In-memory fetcher so no test touches the network.
//
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use diago::core::Document;
use diago::core::net::Fetch;
use diago::error::FetchError;

pub enum Page {
    Html(&'static str),
    Status(u16),
    /// Serve `html` after sleeping, to shuffle completion order.
    Slow(&'static str, u64),
}

#[derive(Default)]
pub struct FakeFetcher {
    pages: HashMap<String, Page>,
    pub calls: AtomicUsize,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, page: Page) -> Self {
        self.pages.insert(url.to_string(), page);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Fetch for FakeFetcher {
    fn fetch(&self, url: &str) -> Result<Document, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.pages.get(url) {
            Some(Page::Html(body)) => Ok(Document::parse(body)),
            Some(Page::Slow(body, ms)) => {
                thread::sleep(Duration::from_millis(*ms));
                Ok(Document::parse(body))
            }
            Some(Page::Status(code)) => Err(FetchError::Status { url: url.to_string(), status: *code }),
            None => Err(FetchError::Request { url: url.to_string(), reason: "connection refused".into() }),
        }
    }
}

pub const LOGIN_PAGE: &str = r#"<html><head><title>Alpha</title></head>
<body><form><input id="u"><input id="p"></form></body></html>"#;
