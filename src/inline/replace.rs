//! Applying fetched content to a document
//!
//! Each pass parses the HTML once with kuchiki, applies every replacement to
//! the same tree, then serializes once. Lookups go through the same
//! `join_url` resolution used during extraction, so a reference matches its
//! replacement regardless of how it was spelled.

use std::collections::HashMap;

use kuchiki::NodeRef;
use kuchiki::traits::TendrilSink;

use super::types::InlineError;
use crate::utils::{join_url, rewrite_css_urls};

/// Replace stylesheet links with `<style type="text/css">` elements
///
/// `stylesheets` maps a resolved href to the CSS that replaces the link.
/// Returns the serialized document and the number of links replaced.
pub fn apply_stylesheets(
    html: String,
    base_url: &str,
    stylesheets: &HashMap<String, String>,
) -> Result<(String, usize), InlineError> {
    if stylesheets.is_empty() {
        return Ok((html, 0));
    }

    let document = kuchiki::parse_html().one(html);

    // Collected up front because replaced links are detached during the walk.
    let links: Vec<_> = document
        .select("link[rel~=\"stylesheet\"][href]")
        .map_err(|()| InlineError::Parse("link[rel~=\"stylesheet\"][href]"))?
        .collect();

    let mut replaced = 0;
    for link in links {
        let href = {
            let attrs = link.attributes.borrow();
            attrs.get("href").map(|href| href.trim().to_string())
        };
        let Some(href) = href else { continue };

        let resolved = join_url(base_url, &href);
        let Some(css) = stylesheets.get(&resolved) else {
            continue;
        };

        let style = style_element(css)?;
        let node = link.as_node();
        node.insert_before(style);
        node.detach();
        replaced += 1;

        log::debug!("Replaced CSS link with inline style: {href} (resolved to {resolved})");
    }

    Ok((serialize(&document)?, replaced))
}

/// Replace image sources and CSS `url(...)` references with data URIs
///
/// `data_uris` maps a resolved URL to its data URI. References without an
/// entry are left as written.
pub fn apply_references(
    html: String,
    base_url: &str,
    data_uris: &HashMap<String, String>,
) -> Result<String, InlineError> {
    if data_uris.is_empty() {
        return Ok(html);
    }

    let document = kuchiki::parse_html().one(html);
    let lookup = |url: &str| data_uris.get(&join_url(base_url, url.trim())).cloned();

    for image in document
        .select("img[src]")
        .map_err(|()| InlineError::Parse("img[src]"))?
    {
        let mut attrs = image.attributes.borrow_mut();
        let Some(src) = attrs.get("src").map(|src| src.trim().to_string()) else {
            continue;
        };
        if let Some(data_uri) = lookup(&src) {
            attrs.insert("src", data_uri);
            log::debug!("Replaced image src with data URL: {src}");
        }
    }

    // Collected up front because rewritten bodies replace the text nodes the
    // traversal would visit next.
    let styles: Vec<_> = document
        .select("style")
        .map_err(|()| InlineError::Parse("style"))?
        .collect();

    for style in styles {
        let node = style.as_node();
        let css = node.text_contents();
        let rewritten = rewrite_css_urls(&css, lookup);
        if rewritten != css {
            set_text(node, rewritten);
        }
    }

    for element in document
        .select("[style]")
        .map_err(|()| InlineError::Parse("[style]"))?
    {
        let mut attrs = element.attributes.borrow_mut();
        let Some(css) = attrs.get("style").map(str::to_string) else {
            continue;
        };
        let rewritten = rewrite_css_urls(&css, lookup);
        if rewritten != css {
            attrs.insert("style", rewritten);
        }
    }

    serialize(&document)
}

/// A detached `<style type="text/css">` element holding `css`
fn style_element(css: &str) -> Result<NodeRef, InlineError> {
    let fragment = kuchiki::parse_html().one("<style type=\"text/css\"></style>");
    let style = fragment
        .select_first("style")
        .map_err(|()| InlineError::Parse("style"))?
        .as_node()
        .clone();
    style.detach();
    style.append(NodeRef::new_text(css));
    Ok(style)
}

fn set_text(node: &NodeRef, text: String) {
    for child in node.children().collect::<Vec<_>>() {
        child.detach();
    }
    node.append(NodeRef::new_text(text));
}

fn serialize(document: &NodeRef) -> Result<String, InlineError> {
    let mut output = Vec::new();
    document
        .serialize(&mut output)
        .map_err(|e| InlineError::Serialize(e.to_string()))?;
    String::from_utf8(output).map_err(|e| InlineError::Serialize(e.to_string()))
}
