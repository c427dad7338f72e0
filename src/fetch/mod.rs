mod http;

pub use http::HttpFetcher;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },
    #[error("Request to {url} returned {status}")]
    Status { url: String, status: u16 },
}

/// Abstraction over the HTTP GET used to download catalog pages.
/// The body is returned verbatim; callers decide whether to persist it.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn get(&self, url: &str) -> Result<Bytes, FetchError>;
}
