//! Resource inlining orchestration
//!
//! Every pass follows the same shape: parse the HTML once and extract
//! references synchronously, drop the parsed document, fetch each distinct
//! resolved URL through a single ordered map, then apply all replacements
//! in one kuchiki parse/serialize cycle.

use std::collections::{HashMap, HashSet};
use std::future::Future;

use scraper::Html;

use super::encode::to_data_uri;
use super::processors;
use super::replace;
use super::types::{InlineError, InliningError, InliningResult, ResourceRef};
use crate::config::{FailurePolicy, InlineConfig};
use crate::fetch::{FetchError, Fetcher};
use crate::runtime::{map_ordered, map_ordered_bounded};
use crate::utils::{is_data_uri, join_url, rewrite_css_urls};

/// Replaces external stylesheets, images and CSS references with inline
/// content obtained from a [`Fetcher`]
pub struct ResourceInliner<F> {
    fetcher: F,
    config: InlineConfig,
}

impl<F: Fetcher> ResourceInliner<F> {
    pub fn new(fetcher: F, config: InlineConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn config(&self) -> &InlineConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Inline stylesheets, then images and CSS references
    ///
    /// Each stage is skipped when disabled in the config. Counts and
    /// failures of both stages are merged into one result.
    pub async fn inline_all(&self, html: String) -> Result<InliningResult, InlineError> {
        let mut result = if self.config.inline_stylesheets() {
            self.inline_stylesheets(html).await?
        } else {
            InliningResult::unchanged(html)
        };

        let html = std::mem::take(&mut result.html);
        let references = self.inline_references(html).await?;
        result.absorb(references);

        Ok(result)
    }

    /// Replace `<link rel="stylesheet">` elements with `<style>` elements
    ///
    /// `url(...)` tokens in a fetched stylesheet are rebased onto the
    /// stylesheet's resolved URL, so they still point at the same resources
    /// once the CSS lives in the document.
    pub async fn inline_stylesheets(&self, html: String) -> Result<InliningResult, InlineError> {
        let base_url = self.config.base_url();

        let links = {
            let document = Html::parse_document(&html);
            processors::extract_stylesheet_links(&document, base_url)
            // document is dropped here, safe to proceed with async operations
        };
        let links = unique(links);
        if links.is_empty() {
            return Ok(InliningResult::unchanged(html));
        }

        log::debug!("Fetching {} stylesheet(s)", links.len());
        let outcomes = self
            .fetch_all(&links, |link| self.fetcher.fetch_text(&link.resolved))
            .await;

        let (fetched, failures) = partition(links.into_iter().zip(outcomes));
        let successes = fetched.len();
        let stylesheets: HashMap<String, String> = fetched
            .into_iter()
            .map(|(link, css)| {
                let css = rebase_stylesheet(&link.resolved, &css);
                (link.resolved, css)
            })
            .collect();

        let (html, replaced) = replace::apply_stylesheets(html, base_url, &stylesheets)?;
        log::debug!("Replaced {replaced} stylesheet link(s)");

        self.finish(
            "Stylesheet",
            InliningResult {
                html,
                successes,
                failures,
            },
        )
    }

    /// Replace image sources and CSS `url(...)` references with data URIs
    pub async fn inline_references(&self, html: String) -> Result<InliningResult, InlineError> {
        let base_url = self.config.base_url();

        let references = {
            let document = Html::parse_document(&html);
            let mut references = Vec::new();
            if self.config.inline_images() {
                references.extend(processors::extract_images(&document, base_url));
            }
            if self.config.inline_css_references() {
                references.extend(processors::extract_css_references(&document, base_url));
            }
            references
        };
        let references = unique(references);
        if references.is_empty() {
            return Ok(InliningResult::unchanged(html));
        }

        log::debug!("Fetching {} referenced resource(s)", references.len());
        let outcomes = self
            .fetch_all(&references, |reference| {
                self.fetcher.fetch_binary(&reference.resolved)
            })
            .await;

        let (fetched, failures) = partition(references.into_iter().zip(outcomes));
        let successes = fetched.len();
        let max_inline = self.config.max_inline_image_size_bytes();

        let mut data_uris = HashMap::with_capacity(fetched.len());
        for (reference, binary) in fetched {
            if let Some(max_size) = max_inline
                && binary.bytes.len() > max_size
            {
                log::debug!(
                    "Resource size ({} bytes) exceeds max_inline_image_size_bytes ({} bytes), keeping as external URL: {}",
                    binary.bytes.len(),
                    max_size,
                    reference.resolved
                );
                continue;
            }
            let data_uri = to_data_uri(&reference.resolved, &binary);
            data_uris.insert(reference.resolved, data_uri);
        }

        let html = replace::apply_references(html, base_url, &data_uris)?;

        self.finish(
            "Reference",
            InliningResult {
                html,
                successes,
                failures,
            },
        )
    }

    /// Start one fetch per resource through the ordered map, bounded if
    /// configured
    ///
    /// `start` is called synchronously for each resource, so fetches are
    /// issued in document order.
    async fn fetch_all<'r, R, W, Fut>(&self, resources: &'r [ResourceRef], start: W) -> Vec<R>
    where
        W: FnMut(&'r ResourceRef) -> Fut,
        Fut: Future<Output = R>,
    {
        match self.config.max_concurrent_fetches() {
            Some(limit) => map_ordered_bounded(resources, limit, start).await,
            None => map_ordered(resources, start).await,
        }
    }

    fn finish(&self, pass: &str, result: InliningResult) -> Result<InliningResult, InlineError> {
        log::info!(
            "{pass} pass: {} fetched, {} failed",
            result.successes,
            result.failures.len()
        );

        if self.config.failure_policy() == FailurePolicy::Abort
            && let Some(first) = result.failures.first()
        {
            return Err(InlineError::ResourceFailed(first.clone()));
        }

        Ok(result)
    }
}

/// Keep the first reference for each resolved URL
fn unique(references: Vec<ResourceRef>) -> Vec<ResourceRef> {
    let mut seen = HashSet::new();
    references
        .into_iter()
        .filter(|reference| seen.insert(reference.resolved.clone()))
        .collect()
}

/// Split fetch outcomes into content and failure records, in input order
fn partition<T>(
    outcomes: impl IntoIterator<Item = (ResourceRef, Result<T, FetchError>)>,
) -> (Vec<(ResourceRef, T)>, Vec<InliningError>) {
    let mut fetched = Vec::new();
    let mut failures = Vec::new();

    for (reference, outcome) in outcomes {
        match outcome {
            Ok(content) => fetched.push((reference, content)),
            Err(e) => {
                log::warn!(
                    "Failed to fetch {} from {}: {e}",
                    reference.resource_type,
                    reference.resolved
                );
                failures.push(InliningError {
                    url: reference.resolved,
                    resource_type: reference.resource_type,
                    error: e.to_string(),
                });
            }
        }
    }

    (fetched, failures)
}

/// Rewrite relative `url(...)` tokens of a stylesheet onto its location
fn rebase_stylesheet(location: &str, css: &str) -> String {
    rewrite_css_urls(css, |url| {
        let url = url.trim();
        if url.is_empty() || url.starts_with('#') || is_data_uri(url) {
            None
        } else {
            Some(join_url(location, url))
        }
    })
}
