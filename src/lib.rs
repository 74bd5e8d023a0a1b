pub mod config;
pub mod fetch;
pub mod inline;
pub mod runtime;
pub mod utils;

pub use config::{FailurePolicy, InlineConfig};
pub use fetch::{AutoFetcher, FetchError, FetchedBinary, Fetcher, FsFetcher, HttpFetcher};
pub use inline::{
    InlineError, InliningError, InliningResult, ResourceInliner, ResourceRef, ResourceType,
};
pub use runtime::{
    Completion, MapAbandoned, PendingResults, map_deferred, map_ordered, map_ordered_bounded,
    map_with_completion,
};
pub use utils::{InvalidUrlError, extract_css_url, is_data_uri, join_url};

/// Inline every external resource of `html`, fetching over HTTP or from disk
pub async fn inline_document(
    html: String,
    config: InlineConfig,
) -> Result<InliningResult, InlineError> {
    let fetcher = AutoFetcher::new(&config);
    ResourceInliner::new(fetcher, config).inline_all(html).await
}
