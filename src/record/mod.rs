mod source;

pub use source::{load_document, resolve_source, ResolvedPath};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

use crate::cache::CacheError;
use crate::fetch::{FetchError, Fetcher, HttpFetcher};
use crate::table::{extract_properties, read_html, ParseError, PropertiesTable, Table};

/// Catalog query endpoint the galaxy name is appended to.
pub const DEFAULT_SOURCE_URL_TEMPLATE: &str = "http://leda.univ-lyon1.fr/ledacat.cgi?o=";

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Galaxy name cannot be empty")]
    InvalidName,
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
    #[error("Network error: {0}")]
    Network(#[from] FetchError),
    #[error("Filesystem error: {0}")]
    Filesystem(#[from] CacheError),
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

/// How a record locates its page.
#[derive(Debug, Clone, Default)]
pub struct RecordOptions {
    /// URL prefix the galaxy name is appended to. Defaults to
    /// [`DEFAULT_SOURCE_URL_TEMPLATE`].
    pub source_url_template: Option<String>,
    /// Download the page into `cache_dir` when it is not cached yet.
    pub cache: bool,
    pub cache_dir: Option<PathBuf>,
    /// Download the page into `cache_dir` even when it is already cached.
    pub force_cache: bool,
}

/// A read-only snapshot of one galaxy's catalog page.
#[derive(Debug, Clone, Serialize)]
pub struct GalaxyRecord {
    name: String,
    source_url_template: String,
    resolved_path: ResolvedPath,
    tables: Vec<Table>,
    properties: Option<PropertiesTable>,
    fetched_at: DateTime<Utc>,
}

impl GalaxyRecord {
    /// Fetch a record over plain HTTP.
    pub async fn fetch(name: &str, options: &RecordOptions) -> Result<Self, RecordError> {
        let fetcher = HttpFetcher::new()?;
        Self::fetch_with(name, options, &fetcher).await
    }

    /// Resolve the page source, load its tables and extract the properties table.
    pub async fn fetch_with<F: Fetcher + ?Sized>(
        name: &str,
        options: &RecordOptions,
        fetcher: &F,
    ) -> Result<Self, RecordError> {
        if name.trim().is_empty() {
            return Err(RecordError::InvalidName);
        }

        let source_url_template = options
            .source_url_template
            .clone()
            .unwrap_or_else(|| DEFAULT_SOURCE_URL_TEMPLATE.to_string());

        let resolved_path = resolve_source(name, &source_url_template, options, fetcher).await?;
        let document = load_document(&resolved_path, fetcher).await?;
        let tables = read_html(&String::from_utf8_lossy(&document))?;
        let properties = extract_properties(&tables)?;

        info!(
            galaxy = name,
            source = %resolved_path,
            tables = tables.len(),
            has_properties = properties.is_some(),
            "Loaded galaxy record"
        );

        Ok(Self {
            name: name.to_string(),
            source_url_template,
            resolved_path,
            tables,
            properties,
            fetched_at: Utc::now(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source_url_template(&self) -> &str {
        &self.source_url_template
    }

    pub fn remote_url(&self) -> String {
        format!("{}{}", self.source_url_template, self.name)
    }

    pub fn resolved_path(&self) -> &ResolvedPath {
        &self.resolved_path
    }

    /// All tables of the page, in document order.
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn properties(&self) -> Option<&PropertiesTable> {
        self.properties.as_ref()
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }
}
