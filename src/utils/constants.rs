//! Shared configuration constants for resource inlining
//!
//! Default values used by `InlineConfig` and the fetch adapters, kept in one
//! place so the builder, the CLI and the adapters agree.

/// Timeout for stylesheet downloads: 30 seconds
pub const DEFAULT_CSS_TIMEOUT_SECS: u64 = 30;

/// Timeout for binary downloads (images, fonts): 60 seconds
///
/// Binary resources are larger on average and served from slower CDNs
/// more often than stylesheets.
pub const DEFAULT_IMAGE_TIMEOUT_SECS: u64 = 60;

/// Maximum size for stylesheet downloads: 2MB
///
/// Typical: 50-200KB, large frameworks: 500KB-1MB.
pub const DEFAULT_MAX_CSS_SIZE: usize = 2 * 1024 * 1024;

/// Maximum size for binary downloads: 5MB
///
/// Anything larger produces a data URI too big to be worth embedding.
pub const DEFAULT_MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024;

/// MIME type used when neither the fetcher nor the file extension tells us
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Chrome user agent string sent by the HTTP fetcher
///
/// Some CDNs refuse or degrade responses for unknown agents.
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";
