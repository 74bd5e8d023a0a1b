//! Scheme-based dispatch between the HTTP and filesystem fetchers.

use std::path::PathBuf;

use futures::future::BoxFuture;
use url::Url;

use super::{FetchError, FetchedBinary, Fetcher, FsFetcher, HttpFetcher};
use crate::config::InlineConfig;

/// Sends `http`/`https` URLs to [`HttpFetcher`] and everything else to
/// [`FsFetcher`], which rejects schemes it cannot read
#[derive(Debug, Clone)]
pub struct AutoFetcher {
    http: HttpFetcher,
    fs: FsFetcher,
}

impl AutoFetcher {
    /// Build both fetchers from one configuration
    ///
    /// The filesystem root is `fs_root` from the configuration, or the
    /// current directory.
    #[must_use]
    pub fn new(config: &InlineConfig) -> Self {
        let root = config
            .fs_root()
            .map_or_else(|| PathBuf::from("."), PathBuf::from);

        Self {
            http: HttpFetcher::new(config),
            fs: FsFetcher::new(root, config),
        }
    }

    fn is_http(url: &str) -> bool {
        Url::parse(url).is_ok_and(|parsed| matches!(parsed.scheme(), "http" | "https"))
    }
}

impl Fetcher for AutoFetcher {
    fn fetch_text<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<String, FetchError>> {
        if Self::is_http(url) {
            self.http.fetch_text(url)
        } else {
            self.fs.fetch_text(url)
        }
    }

    fn fetch_binary<'a>(
        &'a self,
        url: &'a str,
    ) -> BoxFuture<'a, Result<FetchedBinary, FetchError>> {
        if Self::is_http(url) {
            self.http.fetch_binary(url)
        } else {
            self.fs.fetch_binary(url)
        }
    }
}
