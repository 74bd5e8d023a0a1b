//! Reference extraction from parsed HTML
//!
//! Synchronous: runs on a `scraper::Html` that is dropped before any fetch
//! starts.

use lazy_static::lazy_static;
use scraper::{Html, Selector};

use super::types::{ResourceRef, ResourceType};
use crate::utils::{find_css_urls, is_data_uri, join_url};

lazy_static! {
    // These selectors are hardcoded and syntactically valid CSS selectors.
    // If they fail to parse, it indicates a compile-time bug in the selector strings.
    static ref CSS_LINK_SELECTOR: Selector =
        Selector::parse("link[rel~=\"stylesheet\"][href]")
            .expect("BUG: hardcoded CSS selector 'link[rel~=\"stylesheet\"][href]' is invalid - this is a compile-time bug");

    static ref IMG_SELECTOR: Selector =
        Selector::parse("img[src]")
            .expect("BUG: hardcoded CSS selector 'img[src]' is invalid - this is a compile-time bug");

    static ref STYLE_SELECTOR: Selector =
        Selector::parse("style")
            .expect("BUG: hardcoded CSS selector 'style' is invalid - this is a compile-time bug");

    static ref STYLE_ATTR_SELECTOR: Selector =
        Selector::parse("[style]")
            .expect("BUG: hardcoded CSS selector '[style]' is invalid - this is a compile-time bug");
}

/// Build a reference unless it is empty, already inline or a fragment of
/// the document itself (`url(#gradient)`)
fn reference(resource_type: ResourceType, raw: &str, base_url: &str) -> Option<ResourceRef> {
    let raw = raw.trim();
    if raw.is_empty() || raw.starts_with('#') || is_data_uri(raw) {
        return None;
    }

    Some(ResourceRef {
        resource_type,
        raw: raw.to_string(),
        resolved: join_url(base_url, raw),
    })
}

/// Stylesheet links, in document order
#[must_use]
pub fn extract_stylesheet_links(document: &Html, base_url: &str) -> Vec<ResourceRef> {
    document
        .select(&CSS_LINK_SELECTOR)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| reference(ResourceType::Stylesheet, href, base_url))
        .collect()
}

/// Image sources, in document order
#[must_use]
pub fn extract_images(document: &Html, base_url: &str) -> Vec<ResourceRef> {
    document
        .select(&IMG_SELECTOR)
        .filter_map(|element| element.value().attr("src"))
        .filter_map(|src| reference(ResourceType::Image, src, base_url))
        .collect()
}

/// `url(...)` references in `<style>` bodies, then in `style` attributes
#[must_use]
pub fn extract_css_references(document: &Html, base_url: &str) -> Vec<ResourceRef> {
    let style_bodies = document
        .select(&STYLE_SELECTOR)
        .map(|element| element.text().collect::<String>());

    let style_attributes = document
        .select(&STYLE_ATTR_SELECTOR)
        .filter_map(|element| element.value().attr("style"))
        .map(str::to_string);

    style_bodies
        .chain(style_attributes)
        .flat_map(|css| find_css_urls(&css))
        .filter_map(|found| reference(ResourceType::CssReference, &found.url, base_url))
        .collect()
}
