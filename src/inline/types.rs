//! Type definitions for resource inlining

/// Resource type for error tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    /// `<link rel="stylesheet" href>`
    Stylesheet,
    /// `<img src>`
    Image,
    /// `url(...)` inside a `<style>` body or a `style` attribute
    CssReference,
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceType::Stylesheet => write!(f, "Stylesheet"),
            ResourceType::Image => write!(f, "Image"),
            ResourceType::CssReference => write!(f, "CSS reference"),
        }
    }
}

/// One external reference found in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRef {
    pub resource_type: ResourceType,
    /// The reference as written in the document
    pub raw: String,
    /// The reference resolved against the document base
    pub resolved: String,
}

/// Error information for a failed resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InliningError {
    pub url: String,
    pub resource_type: ResourceType,
    pub error: String,
}

impl std::fmt::Display for InliningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}: {}", self.resource_type, self.url, self.error)
    }
}

/// Errors that end an inlining pass
#[derive(Debug, thiserror::Error)]
pub enum InlineError {
    #[error("Failed to query document: invalid selector {0}")]
    Parse(&'static str),

    #[error("Failed to serialize document: {0}")]
    Serialize(String),

    #[error("Resource failed: {0}")]
    ResourceFailed(InliningError),
}

/// Result of resource inlining with success and failure tracking
#[derive(Debug, Clone, Default)]
pub struct InliningResult {
    pub html: String,
    /// Resources fetched successfully, including images kept external for size
    pub successes: usize,
    pub failures: Vec<InliningError>,
}

impl InliningResult {
    /// A result for a document that needed no work
    #[must_use]
    pub fn unchanged(html: String) -> Self {
        Self {
            html,
            ..Self::default()
        }
    }

    /// Total number of resources processed
    #[must_use]
    pub fn total(&self) -> usize {
        self.successes + self.failures.len()
    }

    /// Check if any failures occurred
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Get failure rate as a ratio between 0.0 and 1.0
    #[must_use]
    pub fn failure_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.failures.len() as f64 / total as f64
        }
    }

    /// Fold the counts and failures of a later pass into this one
    ///
    /// The html of `later` replaces ours, since it was produced from it.
    pub(crate) fn absorb(&mut self, later: InliningResult) {
        self.html = later.html;
        self.successes += later.successes;
        self.failures.extend(later.failures);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_rate() {
        let result = InliningResult {
            html: String::new(),
            successes: 3,
            failures: vec![InliningError {
                url: "a.png".to_string(),
                resource_type: ResourceType::Image,
                error: "HTTP error 404: a.png".to_string(),
            }],
        };

        assert_eq!(result.total(), 4);
        assert!(result.has_failures());
        assert!((result.failure_rate() - 0.25).abs() < f64::EPSILON);
        assert_eq!(InliningResult::unchanged(String::new()).failure_rate(), 0.0);
    }
}
