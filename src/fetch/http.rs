//! HTTP fetcher
//!
//! Downloads with per-kind timeouts and browser-like headers. Size limits are
//! enforced twice: against `Content-Length` before reading, then while
//! streaming the body, since servers may omit or misreport the header.

use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use futures::StreamExt;
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};

use super::{FetchError, FetchedBinary, Fetcher, into_text};
use crate::config::InlineConfig;

const CSS_ACCEPT: &str = "text/css,*/*;q=0.1";
const BINARY_ACCEPT: &str = "image/avif,image/webp,image/apng,image/*,*/*;q=0.8";
const DOCUMENT_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Fetches `http`/`https` resources with reqwest
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    user_agent: String,
    css_timeout: Duration,
    image_timeout: Duration,
    max_css_size: usize,
    max_image_size: usize,
}

impl HttpFetcher {
    #[must_use]
    pub fn new(config: &InlineConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Use an existing client (connection pool, proxies, TLS settings)
    #[must_use]
    pub fn with_client(client: Client, config: &InlineConfig) -> Self {
        Self {
            client,
            user_agent: config.user_agent().to_string(),
            css_timeout: config.css_timeout(),
            image_timeout: config.image_timeout(),
            max_css_size: config.max_css_size(),
            max_image_size: config.max_image_size(),
        }
    }

    /// Fetch the HTML page to be inlined
    ///
    /// Sent with an HTML `Accept` header. A page is bounded by the image
    /// timeout and size cap, the larger of the two configured budgets.
    pub async fn fetch_document(&self, url: &str) -> Result<String, FetchError> {
        let fetched = self
            .download(url, self.image_timeout, DOCUMENT_ACCEPT, self.max_image_size)
            .await?;
        into_text(url, fetched.bytes)
    }

    async fn download(
        &self,
        url: &str,
        timeout: Duration,
        accept: &str,
        limit: usize,
    ) -> Result<FetchedBinary, FetchError> {
        let request_failed = |e: reqwest::Error| FetchError::Request {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT, accept)
            .send()
            .await
            .map_err(request_failed)?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let expected_size = response.content_length().unwrap_or(0);
        if expected_size > limit as u64 {
            return Err(FetchError::TooLarge {
                url: url.to_string(),
                size: expected_size,
                limit,
            });
        }

        let mut buffer = Vec::with_capacity(expected_size as usize);
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(request_failed)?;

            let new_total = buffer.len() + chunk.len();
            if new_total > limit {
                return Err(FetchError::TooLarge {
                    url: url.to_string(),
                    size: new_total as u64,
                    limit,
                });
            }

            buffer.extend_from_slice(&chunk);
        }

        log::debug!("Downloaded {} bytes from {url}", buffer.len());

        Ok(FetchedBinary {
            bytes: buffer,
            content_type,
        })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch_text<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<String, FetchError>> {
        async move {
            let fetched = self
                .download(url, self.css_timeout, CSS_ACCEPT, self.max_css_size)
                .await?;
            into_text(url, fetched.bytes)
        }
        .boxed()
    }

    fn fetch_binary<'a>(
        &'a self,
        url: &'a str,
    ) -> BoxFuture<'a, Result<FetchedBinary, FetchError>> {
        self.download(url, self.image_timeout, BINARY_ACCEPT, self.max_image_size)
            .boxed()
    }
}
