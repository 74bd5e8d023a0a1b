//! Filesystem fetcher for documents rendered from disk.

use std::path::{Path, PathBuf};

use futures::future::{BoxFuture, FutureExt};
use url::Url;

use super::{FetchError, FetchedBinary, Fetcher, into_text};
use crate::config::InlineConfig;
use crate::utils::has_scheme;

/// Reads resources from local files
///
/// Scheme-less references are resolved against `root` (root-relative ones
/// too: `/img/a.png` is `root/img/a.png`). `file://` URLs are used as is.
#[derive(Debug, Clone)]
pub struct FsFetcher {
    root: PathBuf,
    max_css_size: usize,
    max_image_size: usize,
}

impl FsFetcher {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, config: &InlineConfig) -> Self {
        Self {
            root: root.into(),
            max_css_size: config.max_css_size(),
            max_image_size: config.max_image_size(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, url: &str) -> Result<PathBuf, FetchError> {
        let unsupported = || FetchError::UnsupportedScheme {
            url: url.to_string(),
        };

        if has_scheme(url) {
            let parsed = Url::parse(url).map_err(|_| unsupported())?;
            if parsed.scheme() != "file" {
                return Err(unsupported());
            }
            return parsed.to_file_path().map_err(|()| unsupported());
        }

        let end = url.find(['?', '#']).unwrap_or(url.len());
        Ok(self.root.join(url[..end].trim_start_matches('/')))
    }

    async fn read(&self, url: &str, limit: usize) -> Result<Vec<u8>, FetchError> {
        let path = self.path_for(url)?;
        let io_error = |source| FetchError::Io {
            path: path.clone(),
            source,
        };

        let size = tokio::fs::metadata(&path).await.map_err(io_error)?.len();
        if size > limit as u64 {
            return Err(FetchError::TooLarge {
                url: url.to_string(),
                size,
                limit,
            });
        }

        let bytes = tokio::fs::read(&path).await.map_err(io_error)?;
        log::debug!("Read {} bytes from {}", bytes.len(), path.display());
        Ok(bytes)
    }
}

impl Fetcher for FsFetcher {
    fn fetch_text<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<String, FetchError>> {
        async move {
            let bytes = self.read(url, self.max_css_size).await?;
            into_text(url, bytes)
        }
        .boxed()
    }

    fn fetch_binary<'a>(
        &'a self,
        url: &'a str,
    ) -> BoxFuture<'a, Result<FetchedBinary, FetchError>> {
        async move {
            let bytes = self.read(url, self.max_image_size).await?;
            Ok(FetchedBinary {
                bytes,
                content_type: None,
            })
        }
        .boxed()
    }
}
