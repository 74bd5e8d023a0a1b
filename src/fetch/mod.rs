//! Fetching external resources
//!
//! The inliner only talks to the [`Fetcher`] trait. Each call produces
//! exactly one outcome: the content, or a [`FetchError`] describing why the
//! resource is unavailable. Binary content is returned as raw bytes.
//!
//! Adapters:
//! - [`HttpFetcher`] - `http`/`https` over reqwest with timeouts and size caps
//! - [`FsFetcher`] - local paths and `file://` URLs via `tokio::fs`
//! - [`AutoFetcher`] - picks one of the two by URL scheme

pub mod auto;
pub mod fs;
pub mod http;

use std::path::PathBuf;

use futures::future::BoxFuture;

pub use auto::AutoFetcher;
pub use fs::FsFetcher;
pub use http::HttpFetcher;

/// Error type for fetch failures
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Request failed for {url}: {message}")]
    Request { url: String, message: String },

    #[error("HTTP error {status}: {url}")]
    Status { url: String, status: u16 },

    #[error("Resource too large: {url} is {size} bytes, limit is {limit} bytes")]
    TooLarge { url: String, size: u64, limit: usize },

    #[error("Resource is not valid UTF-8: {url}")]
    InvalidUtf8 { url: String },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported URL scheme: {url}")]
    UnsupportedScheme { url: String },
}

/// Raw bytes of a binary resource and the media type reported for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedBinary {
    pub bytes: Vec<u8>,
    /// `Content-Type` as reported by the source, if any
    pub content_type: Option<String>,
}

/// The fetch collaborator
pub trait Fetcher: Send + Sync {
    /// Fetch a text resource (stylesheets)
    fn fetch_text<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<String, FetchError>>;

    /// Fetch a binary resource (images, fonts) without decoding it
    fn fetch_binary<'a>(&'a self, url: &'a str)
    -> BoxFuture<'a, Result<FetchedBinary, FetchError>>;
}

impl<F: Fetcher + ?Sized> Fetcher for std::sync::Arc<F> {
    fn fetch_text<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<String, FetchError>> {
        (**self).fetch_text(url)
    }

    fn fetch_binary<'a>(
        &'a self,
        url: &'a str,
    ) -> BoxFuture<'a, Result<FetchedBinary, FetchError>> {
        (**self).fetch_binary(url)
    }
}

/// Decode fetched bytes as UTF-8 text
pub(crate) fn into_text(url: &str, bytes: Vec<u8>) -> Result<String, FetchError> {
    String::from_utf8(bytes).map_err(|_| FetchError::InvalidUtf8 {
        url: url.to_string(),
    })
}
