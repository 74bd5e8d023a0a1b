//! Test utilities and helper functions for the rasterize_inline test suite

use std::collections::HashMap;
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use mockito::{Mock, Server};
use parking_lot::Mutex;
use rasterize_inline::{FetchError, FetchedBinary, Fetcher};

/// In-memory fetcher that records every URL it is asked for
#[allow(dead_code)]
#[derive(Default)]
pub struct MockFetcher {
    text: HashMap<String, String>,
    binary: HashMap<String, FetchedBinary>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, url: &str, body: &str) -> Self {
        self.text.insert(url.to_string(), body.to_string());
        self
    }

    pub fn with_binary(mut self, url: &str, bytes: &[u8], content_type: Option<&str>) -> Self {
        self.binary.insert(
            url.to_string(),
            FetchedBinary {
                bytes: bytes.to_vec(),
                content_type: content_type.map(str::to_string),
            },
        );
        self
    }

    /// Hold the response for `url` back by `delay`
    pub fn with_delay(mut self, url: &str, delay: Duration) -> Self {
        self.delays.insert(url.to_string(), delay);
        self
    }

    /// URLs requested so far, in request order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn respond<'a, T: Send + 'a>(
        &'a self,
        url: &'a str,
        outcome: Option<T>,
    ) -> BoxFuture<'a, Result<T, FetchError>> {
        self.calls.lock().push(url.to_string());
        let delay = self.delays.get(url).copied();

        async move {
            match delay {
                Some(delay) => tokio::time::sleep(delay).await,
                None => tokio::task::yield_now().await,
            }
            outcome.ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
        }
        .boxed()
    }
}

impl Fetcher for MockFetcher {
    fn fetch_text<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<String, FetchError>> {
        self.respond(url, self.text.get(url).cloned())
    }

    fn fetch_binary<'a>(
        &'a self,
        url: &'a str,
    ) -> BoxFuture<'a, Result<FetchedBinary, FetchError>> {
        self.respond(url, self.binary.get(url).cloned())
    }
}

/// Creates a test HTML document with specified head and body content
#[allow(dead_code)]
pub fn create_test_html(head: &str, body: &str) -> String {
    format!("<!DOCTYPE html><html><head>{head}</head><body>{body}</body></html>")
}

/// Creates a mock endpoint that returns content with the given type
#[allow(dead_code)]
pub async fn create_content_mock(
    server: &mut Server,
    path: &str,
    content_type: &str,
    body: &[u8],
) -> Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", content_type)
        .with_body(body)
        .create_async()
        .await
}

/// Creates a mock endpoint that returns an error
#[allow(dead_code)]
pub async fn create_error_mock(server: &mut Server, path: &str, status: usize) -> Mock {
    server
        .mock("GET", path)
        .with_status(status)
        .with_body("Error")
        .create_async()
        .await
}

/// Helper to create test URLs
#[allow(dead_code)]
pub fn test_url(server: &Server, path: &str) -> String {
    format!("{}{}", server.url(), path)
}
