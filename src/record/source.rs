use bytes::Bytes;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use super::{RecordError, RecordOptions};
use crate::cache::{self, PageCache};
use crate::fetch::Fetcher;

/// Where a catalog page is actually read from once the cache policy is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "location", rename_all = "lowercase")]
pub enum ResolvedPath {
    Remote(String),
    Cached(PathBuf),
}

impl ResolvedPath {
    pub fn is_cached(&self) -> bool {
        matches!(self, ResolvedPath::Cached(_))
    }
}

impl fmt::Display for ResolvedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedPath::Remote(url) => f.write_str(url),
            ResolvedPath::Cached(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Apply the cache policy for one galaxy, downloading into the cache when required.
///
/// | cache file | `force_cache` | `cache` | action                         |
/// |------------|---------------|---------|--------------------------------|
/// | missing    | any           | any     | download if either flag is set |
/// | present    | true          | any     | re-download, overwrite         |
/// | present    | false         | any     | use as-is, no network          |
///
/// Without a cache directory the remote URL is always used.
pub async fn resolve_source<F: Fetcher + ?Sized>(
    name: &str,
    source_url_template: &str,
    options: &RecordOptions,
    fetcher: &F,
) -> Result<ResolvedPath, RecordError> {
    let remote_url = format!("{source_url_template}{name}");

    let Some(ref cache_dir) = options.cache_dir else {
        if options.cache || options.force_cache {
            warn!(
                galaxy = name,
                "Caching requested without a cache directory, reading remote page"
            );
        }
        return Ok(ResolvedPath::Remote(remote_url));
    };

    let cache = PageCache::new(cache_dir);
    let cache_file = cache.path_for(name);

    let download = if cache.exists(name) {
        options.force_cache
    } else {
        options.cache || options.force_cache
    };

    if download {
        info!(
            galaxy = name,
            url = %remote_url,
            path = %cache_file.display(),
            "Refreshing cached page"
        );
        let data = fetcher.get(&remote_url).await?;
        let path = cache.put(name, &data).await?;
        return Ok(ResolvedPath::Cached(path));
    }

    if cache.exists(name) {
        debug!(galaxy = name, path = %cache_file.display(), "Using cached page");
        Ok(ResolvedPath::Cached(cache_file))
    } else {
        debug!(galaxy = name, url = %remote_url, "No cached page, reading remote page");
        Ok(ResolvedPath::Remote(remote_url))
    }
}

/// Read the document a resolved path points at.
pub async fn load_document<F: Fetcher + ?Sized>(
    resolved: &ResolvedPath,
    fetcher: &F,
) -> Result<Bytes, RecordError> {
    let data = match resolved {
        ResolvedPath::Remote(url) => fetcher.get(url).await?,
        ResolvedPath::Cached(path) => cache::read_page(path).await?,
    };
    Ok(data)
}
