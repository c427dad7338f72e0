use bytes::Bytes;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Suffix appended to the galaxy name to form the cache file name.
pub const CACHE_FILE_SUFFIX: &str = "_hyperleda_http.html";

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cache directory does not exist: {}", .0.display())]
    MissingDir(PathBuf),
    #[error("Cached page not found: {}", .0.display())]
    NotFound(PathBuf),
}

/// Directory of cached catalog pages, one file per galaxy.
#[derive(Debug, Clone)]
pub struct PageCache {
    dir: PathBuf,
}

impl PageCache {
    /// The directory is not created or checked until something is written.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}{CACHE_FILE_SUFFIX}"))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).is_file()
    }

    pub async fn get(&self, name: &str) -> Result<Bytes, CacheError> {
        read_page(&self.path_for(name)).await
    }

    /// Write the page verbatim, replacing any previous copy.
    pub async fn put(&self, name: &str, data: &[u8]) -> Result<PathBuf, CacheError> {
        if !self.dir.is_dir() {
            return Err(CacheError::MissingDir(self.dir.clone()));
        }
        let path = self.path_for(name);
        tokio::fs::write(&path, data).await?;
        Ok(path)
    }
}

/// Read a cached page from an explicit path.
pub async fn read_page(path: &Path) -> Result<Bytes, CacheError> {
    if !path.exists() {
        return Err(CacheError::NotFound(path.to_path_buf()));
    }
    let data = tokio::fs::read(path).await?;
    Ok(Bytes::from(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_for_appends_suffix() {
        let cache = PageCache::new("/tmp/leda");
        assert_eq!(
            cache.path_for("NGC1300"),
            PathBuf::from("/tmp/leda/NGC1300_hyperleda_http.html")
        );
    }

    #[tokio::test]
    async fn test_put_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let cache = PageCache::new(dir.path().join("absent"));

        let result = cache.put("M31", b"<html></html>").await;
        assert!(matches!(result, Err(CacheError::MissingDir(_))));
        assert!(!cache.exists("M31"));
    }

    #[tokio::test]
    async fn test_put_get_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let cache = PageCache::new(dir.path());

        assert!(!cache.exists("M31"));
        cache.put("M31", b"first").await.unwrap();
        cache.put("M31", b"second").await.unwrap();

        assert!(cache.exists("M31"));
        assert_eq!(cache.get("M31").await.unwrap(), Bytes::from("second"));
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let cache = PageCache::new(dir.path());

        assert!(matches!(
            cache.get("missing").await,
            Err(CacheError::NotFound(_))
        ));
    }
}
