//! Core configuration types for resource inlining
//!
//! `InlineConfig` carries the document base URL, fetch limits and the
//! per-pass policy switches. It is serde-(de)serializable so the CLI can load
//! it from a JSON file; missing keys fall back to the defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::utils::{
    CHROME_USER_AGENT, DEFAULT_CSS_TIMEOUT_SECS, DEFAULT_IMAGE_TIMEOUT_SECS, DEFAULT_MAX_CSS_SIZE,
    DEFAULT_MAX_IMAGE_SIZE,
};

/// What a failed resource means for the whole pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Record the failure and leave the original reference in place
    #[default]
    Skip,
    /// Fail the pass once every fetch has reported
    Abort,
}

/// Configuration for one `ResourceInliner`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InlineConfig {
    /// Base URL every reference is resolved against. Empty means none:
    /// references are used as written.
    pub(crate) base_url: String,

    /// Directory the filesystem fetcher resolves scheme-less references in
    pub(crate) fs_root: Option<PathBuf>,

    pub(crate) css_timeout_secs: u64,
    pub(crate) image_timeout_secs: u64,

    /// Maximum size for stylesheet downloads (bytes)
    pub(crate) max_css_size: usize,

    /// Maximum size for binary downloads (bytes)
    pub(crate) max_image_size: usize,

    /// Images above this size keep their external reference instead of
    /// becoming a data URI. `None` inlines everything that was fetched.
    pub(crate) max_inline_image_size_bytes: Option<usize>,

    /// Cap on fetches in flight per pass. `None` dispatches all at once.
    pub(crate) max_concurrent_fetches: Option<usize>,

    pub(crate) user_agent: String,
    pub(crate) failure_policy: FailurePolicy,

    pub(crate) inline_stylesheets: bool,
    pub(crate) inline_images: bool,
    pub(crate) inline_css_references: bool,
}

impl Default for InlineConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            fs_root: None,
            css_timeout_secs: DEFAULT_CSS_TIMEOUT_SECS,
            image_timeout_secs: DEFAULT_IMAGE_TIMEOUT_SECS,
            max_css_size: DEFAULT_MAX_CSS_SIZE,
            max_image_size: DEFAULT_MAX_IMAGE_SIZE,
            max_inline_image_size_bytes: None,
            max_concurrent_fetches: None,
            user_agent: CHROME_USER_AGENT.to_string(),
            failure_policy: FailurePolicy::Skip,
            inline_stylesheets: true,
            inline_images: true,
            inline_css_references: true,
        }
    }
}

impl InlineConfig {
    /// Load a configuration from a JSON file
    ///
    /// Keys that are absent keep their default value.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }
}
