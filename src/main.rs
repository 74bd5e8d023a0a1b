//! Inline the external resources of an HTML document into a single file.
//!
//! INPUT is a local path or an `http(s)` URL. Without `--base-url`, a URL
//! input is its own base, and references of a local input are read relative
//! to the input's directory.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use rasterize_inline::{AutoFetcher, FailurePolicy, HttpFetcher, InlineConfig, ResourceInliner};

#[derive(Parser, Debug)]
#[command(
    name = "rasterize-inline",
    version,
    about = "Embed stylesheets, images and CSS references into an HTML document"
)]
struct Cli {
    /// HTML file path or http(s) URL
    input: String,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Base URL relative references are resolved against
    #[arg(long)]
    base_url: Option<String>,

    /// JSON configuration file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximum number of fetches in flight per pass
    #[arg(long)]
    max_concurrent: Option<usize>,

    /// Fail instead of leaving unfetchable references in place
    #[arg(long, action = ArgAction::SetTrue)]
    abort_on_failure: bool,
}

fn is_remote(input: &str) -> bool {
    url::Url::parse(input).is_ok_and(|parsed| matches!(parsed.scheme(), "http" | "https"))
}

fn build_config(cli: &Cli) -> Result<InlineConfig> {
    let mut config = match &cli.config {
        Some(path) => InlineConfig::from_json_file(path)?,
        None => InlineConfig::default(),
    };

    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.clone());
    } else if config.base_url().is_empty() && is_remote(&cli.input) {
        config = config.with_base_url(cli.input.clone());
    }

    if config.fs_root().is_none() && !is_remote(&cli.input) {
        let parent = PathBuf::from(&cli.input)
            .parent()
            .map(PathBuf::from)
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from("."));
        config = config.with_fs_root(parent);
    }

    if let Some(limit) = cli.max_concurrent {
        config = config.with_max_concurrent_fetches(limit);
    }
    if cli.abort_on_failure {
        config = config.with_failure_policy(FailurePolicy::Abort);
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = build_config(&cli)?;
    let html = if is_remote(&cli.input) {
        HttpFetcher::new(&config)
            .fetch_document(&cli.input)
            .await
            .with_context(|| format!("Failed to fetch {}", cli.input))?
    } else {
        tokio::fs::read_to_string(&cli.input)
            .await
            .with_context(|| format!("Failed to read {}", cli.input))?
    };

    let inliner = ResourceInliner::new(AutoFetcher::new(&config), config);
    let result = inliner
        .inline_all(html)
        .await
        .context("Inlining aborted")?;

    log::info!(
        "Inlined {} of {} resource(s), {} failure(s)",
        result.successes,
        result.total(),
        result.failures.len()
    );
    for failure in &result.failures {
        log::warn!("{failure}");
    }

    match &cli.output {
        Some(path) => tokio::fs::write(path, result.html.as_bytes())
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => std::io::stdout()
            .write_all(result.html.as_bytes())
            .context("Failed to write to stdout")?,
    }

    Ok(())
}
