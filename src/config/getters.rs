//! Getter methods for `InlineConfig`

use std::path::Path;
use std::time::Duration;

use super::types::{FailurePolicy, InlineConfig};

impl InlineConfig {
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn fs_root(&self) -> Option<&Path> {
        self.fs_root.as_deref()
    }

    #[must_use]
    pub fn css_timeout(&self) -> Duration {
        Duration::from_secs(self.css_timeout_secs)
    }

    #[must_use]
    pub fn image_timeout(&self) -> Duration {
        Duration::from_secs(self.image_timeout_secs)
    }

    #[must_use]
    pub fn max_css_size(&self) -> usize {
        self.max_css_size
    }

    #[must_use]
    pub fn max_image_size(&self) -> usize {
        self.max_image_size
    }

    #[must_use]
    pub fn max_inline_image_size_bytes(&self) -> Option<usize> {
        self.max_inline_image_size_bytes
    }

    #[must_use]
    pub fn max_concurrent_fetches(&self) -> Option<usize> {
        self.max_concurrent_fetches
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    #[must_use]
    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    #[must_use]
    pub fn inline_stylesheets(&self) -> bool {
        self.inline_stylesheets
    }

    #[must_use]
    pub fn inline_images(&self) -> bool {
        self.inline_images
    }

    #[must_use]
    pub fn inline_css_references(&self) -> bool {
        self.inline_css_references
    }
}
