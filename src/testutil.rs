//! Shared test helpers for record and cache-policy tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use crate::fetch::{FetchError, Fetcher};

/// In-memory fetcher that serves a fixed body and records every request.
pub struct CountingFetcher {
    body: Bytes,
    status: Option<u16>,
    calls: AtomicUsize,
    urls: Mutex<Vec<String>>,
}

impl CountingFetcher {
    pub fn new(body: impl Into<Bytes>) -> Self {
        Self {
            body: body.into(),
            status: None,
            calls: AtomicUsize::new(0),
            urls: Mutex::new(Vec::new()),
        }
    }

    /// A fetcher whose every request fails with the given HTTP status.
    pub fn failing(status: u16) -> Self {
        Self {
            status: Some(status),
            ..Self::new(Bytes::new())
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for CountingFetcher {
    async fn get(&self, url: &str) -> Result<Bytes, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().unwrap().push(url.to_string());

        match self.status {
            Some(status) => Err(FetchError::Status {
                url: url.to_string(),
                status,
            }),
            None => Ok(self.body.clone()),
        }
    }
}

/// A catalog-like page: five filler tables followed by a properties table.
pub fn catalog_page(properties: &[(&str, &str)]) -> String {
    let mut page = String::from("<html><body>");
    for i in 0..5 {
        page.push_str(&format!("<table><tr><td>section {i}</td></tr></table>"));
    }
    page.push_str("<table><tr><td>Parameter</td><td>Value</td></tr>");
    for (parameter, value) in properties {
        page.push_str(&format!("<tr><td>{parameter}</td><td>{value}</td></tr>"));
    }
    page.push_str("</table></body></html>");
    page
}
