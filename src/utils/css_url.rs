//! CSS `url(...)` token handling.

use std::ops::Range;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    // A whole value that is exactly one url() token.
    static ref CSS_URL_TOKEN: Regex =
        Regex::new(r#"^url\((?:"([^"]*)"|'([^']*)'|([^"')]+))\)$"#)
            .expect("BUG: hardcoded url() token regex is invalid - this is a compile-time bug");

    // Every url() token inside a stylesheet or a declaration list.
    static ref CSS_URL_IN_TEXT: Regex =
        Regex::new(r#"url\((?:"([^"]*)"|'([^']*)'|([^"')]+))\)"#)
            .expect("BUG: hardcoded url() search regex is invalid - this is a compile-time bug");
}

/// A value did not match any `url(...)` form
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid url")]
pub struct InvalidUrlError {
    pub value: String,
}

/// One `url(...)` occurrence inside CSS text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssUrlMatch {
    /// Byte range of the whole token, `url(` through `)`
    pub range: Range<usize>,
    /// The reference with its quotes stripped
    pub url: String,
}

fn unquoted<'t>(captures: &Captures<'t>) -> Option<&'t str> {
    captures
        .get(1)
        .or_else(|| captures.get(2))
        .or_else(|| captures.get(3))
        .map(|m| m.as_str())
}

/// Extract the reference from a `url(...)` value
///
/// Accepts `url(bare)`, `url("double")` and `url('single')`; exactly one
/// layer of quotes is removed and the content is otherwise returned as is.
pub fn extract_css_url(css_value: &str) -> Result<String, InvalidUrlError> {
    CSS_URL_TOKEN
        .captures(css_value.trim())
        .as_ref()
        .and_then(unquoted)
        .map(str::to_string)
        .ok_or_else(|| InvalidUrlError {
            value: css_value.to_string(),
        })
}

/// Find every `url(...)` token in `css_text`, in source order
#[must_use]
pub fn find_css_urls(css_text: &str) -> Vec<CssUrlMatch> {
    CSS_URL_IN_TEXT
        .captures_iter(css_text)
        .filter_map(|captures| {
            let token = captures.get(0)?;
            Some(CssUrlMatch {
                range: token.range(),
                url: unquoted(&captures)?.to_string(),
            })
        })
        .collect()
}

/// Rewrite `url(...)` tokens in `css_text`
///
/// `replace` receives each unquoted reference; tokens for which it returns
/// `Some` are written back as `url("...")` with `"` and `\` escaped, all
/// other bytes are copied unchanged.
pub fn rewrite_css_urls<F>(css_text: &str, mut replace: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    let mut output = String::with_capacity(css_text.len());
    let mut copied_to = 0;

    for found in find_css_urls(css_text) {
        if let Some(replacement) = replace(&found.url) {
            output.push_str(&css_text[copied_to..found.range.start]);
            output.push_str("url(\"");
            push_escaped(&mut output, &replacement);
            output.push_str("\")");
            copied_to = found.range.end;
        }
    }

    output.push_str(&css_text[copied_to..]);
    output
}

/// Append `value` as the body of a double-quoted CSS string
fn push_escaped(output: &mut String, value: &str) {
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            output.push('\\');
        }
        output.push(c);
    }
}
