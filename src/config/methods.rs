//! Builder-style setters for `InlineConfig`
//!
//! Each method consumes and returns the config so calls chain from
//! `InlineConfig::default()`.

use std::path::PathBuf;

use super::types::{FailurePolicy, InlineConfig};

impl InlineConfig {
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_fs_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.fs_root = Some(root.into());
        self
    }

    #[must_use]
    pub fn with_css_timeout_secs(mut self, secs: u64) -> Self {
        self.css_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn with_image_timeout_secs(mut self, secs: u64) -> Self {
        self.image_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn with_max_css_size(mut self, bytes: usize) -> Self {
        self.max_css_size = bytes;
        self
    }

    #[must_use]
    pub fn with_max_image_size(mut self, bytes: usize) -> Self {
        self.max_image_size = bytes;
        self
    }

    /// Keep images larger than `bytes` as external references
    #[must_use]
    pub fn with_max_inline_image_size_bytes(mut self, bytes: usize) -> Self {
        self.max_inline_image_size_bytes = Some(bytes);
        self
    }

    /// Limit how many fetches of one pass run at the same time
    #[must_use]
    pub fn with_max_concurrent_fetches(mut self, limit: usize) -> Self {
        self.max_concurrent_fetches = Some(limit);
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    #[must_use]
    pub fn with_inline_stylesheets(mut self, enabled: bool) -> Self {
        self.inline_stylesheets = enabled;
        self
    }

    #[must_use]
    pub fn with_inline_images(mut self, enabled: bool) -> Self {
        self.inline_images = enabled;
        self
    }

    #[must_use]
    pub fn with_inline_css_references(mut self, enabled: bool) -> Self {
        self.inline_css_references = enabled;
        self
    }
}
