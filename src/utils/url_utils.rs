//! URL classification and resolution.
//!
//! Resolution here is string algebra against a base string, the same rules a
//! document applies to references under its base href. Nothing in this
//! module parses into a structured URL or touches the network.

/// Check if a value is a data URI (content already embedded, never fetched)
#[must_use]
pub fn is_data_uri(value: &str) -> bool {
    value
        .get(..5)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("data:"))
}

/// Byte offset of the `:` ending the scheme, if `url` starts with one
fn scheme_end(url: &str) -> Option<usize> {
    let colon = url.find(':')?;
    let mut chars = url[..colon].chars();
    let first = chars.next()?;

    let valid = first.is_ascii_alphabetic()
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

    valid.then_some(colon)
}

/// Check if a URL carries its own scheme (`http://...`, `data:...`, `mailto:...`)
#[must_use]
pub fn has_scheme(url: &str) -> bool {
    scheme_end(url).is_some()
}

/// Split `url` into `scheme://host` and the remainder
///
/// Returns `None` for bare paths and for schemes without an authority
/// (`data:`, `mailto:`).
fn split_origin(url: &str) -> Option<(&str, &str)> {
    let colon = scheme_end(url)?;
    let authority = url[colon + 1..].strip_prefix("//")?;
    let host_len = authority.find(['/', '?', '#']).unwrap_or(authority.len());

    Some(url.split_at(colon + 3 + host_len))
}

/// Split off the `?query` / `#fragment` tail of a path
fn split_suffix(path: &str) -> (&str, &str) {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    path.split_at(end)
}

/// Collapse `.` and `../` segments
///
/// A `..` with nothing left to remove is dropped when the path is rooted,
/// and kept when it is relative (`rel/../../x` is `../x`).
fn normalize_path(path: &str) -> String {
    let root = usize::from(path.starts_with('/'));
    let segments: Vec<&str> = path.split('/').collect();
    let last = segments.len() - 1;
    let mut kept: Vec<&str> = Vec::with_capacity(segments.len());

    for (i, segment) in segments.iter().enumerate() {
        match *segment {
            "." => {}
            ".." => {
                if kept.len() > root && kept.last() != Some(&"..") {
                    kept.pop();
                } else if root == 0 {
                    kept.push("..");
                }
            }
            other => kept.push(other),
        }

        // "a/b/.." names the directory "a/", keep the trailing slash
        if i == last && matches!(*segment, "." | "..") {
            kept.push("");
        }
    }

    kept.join("/")
}

/// Resolve `relative` against `base`
///
/// In order:
/// 1. `relative` with a scheme is returned as is.
/// 2. `//host/...` borrows the scheme of `base`.
/// 3. `/path` is appended to the `scheme://host` of `base`, or returned as is
///    when `base` has no host.
/// 4. Otherwise `relative` is appended to the directory of `base` (the last
///    segment of a file base is dropped) and `../` segments are collapsed.
///    A bare `base` without any directory is ignored.
#[must_use]
pub fn join_url(base: &str, relative: &str) -> String {
    if has_scheme(relative) {
        return relative.to_string();
    }

    if relative.starts_with("//") {
        return match scheme_end(base) {
            Some(colon) => format!("{}{relative}", &base[..=colon]),
            None => relative.to_string(),
        };
    }

    let origin = split_origin(base);

    if relative.starts_with('/') {
        return match origin {
            Some((origin, _)) => format!("{origin}{relative}"),
            None => relative.to_string(),
        };
    }

    let (origin, path) = origin.unwrap_or(("", base));
    let (path, _) = split_suffix(path);

    let directory = match path.rfind('/') {
        Some(i) => &path[..=i],
        None if !origin.is_empty() => "/",
        None => return relative.to_string(),
    };

    let joined = format!("{directory}{relative}");
    let (joined_path, suffix) = split_suffix(&joined);

    format!("{origin}{}{suffix}", normalize_path(joined_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri_detection() {
        assert!(is_data_uri("data:image/png;base64,soMEfAkebASE64="));
        assert!(is_data_uri("DATA:text/plain,hi"));
        assert!(!is_data_uri("path/file.png"));
        assert!(!is_data_uri(""));
        assert!(!is_data_uri("data"));
        assert!(!is_data_uri("images/data:file.png"));
        assert!(!is_data_uri(" data:image/png;base64,AAA="));
    }

    #[test]
    fn test_scheme_detection() {
        assert!(has_scheme("http://example.com"));
        assert!(has_scheme("data:image/png;base64,AAA="));
        assert!(has_scheme("svn+ssh://host/repo"));
        assert!(!has_scheme("rel/path:with/colon"));
        assert!(!has_scheme("/absolute/path"));
        assert!(!has_scheme("file.png"));
        assert!(!has_scheme("1http://nope"));
    }

    #[test]
    fn test_append_to_directory_base() {
        assert_eq!(
            join_url("rel/path/", "the_relative_url"),
            "rel/path/the_relative_url"
        );
    }

    #[test]
    fn test_append_to_file_base() {
        assert_eq!(
            join_url("rel/path/something", "the_relative_url"),
            "rel/path/the_relative_url"
        );
    }

    #[test]
    fn test_parent_directory_merging() {
        assert_eq!(
            join_url("rel/path/", "../the_relative_url"),
            "rel/the_relative_url"
        );
        assert_eq!(
            join_url("http://example.com/a/b/page.html", "../../style.css"),
            "http://example.com/style.css"
        );
    }

    #[test]
    fn test_parent_directory_stops_at_root() {
        assert_eq!(join_url("http://example.com/a/", "../../../x.png"), "http://example.com/x.png");
    }

    #[test]
    fn test_unmatched_parent_segments_kept_on_relative_paths() {
        assert_eq!(join_url("rel/", "../../x.png"), "../x.png");
        assert_eq!(join_url("../css/site.css", "bg.png"), "../css/bg.png");
        assert_eq!(join_url("../css/site.css", "../img/a.png"), "../img/a.png");
        assert_eq!(join_url("../../a/", "../b.png"), "../../b.png");
    }

    #[test]
    fn test_root_relative_without_host() {
        assert_eq!(
            join_url("rel/path/", "/the_relative_url"),
            "/the_relative_url"
        );
    }

    #[test]
    fn test_root_relative_uses_host_of_base() {
        assert_eq!(
            join_url("http://example.com/rel/path/", "/the_relative_url"),
            "http://example.com/the_relative_url"
        );
        assert_eq!(
            join_url("https://example.com:8443?x=1", "/a.png"),
            "https://example.com:8443/a.png"
        );
    }

    #[test]
    fn test_absolute_url_ignores_base() {
        assert_eq!(
            join_url(
                "http://example.com/rel/path/",
                "http://github.com//the_relative_url"
            ),
            "http://github.com//the_relative_url"
        );
    }

    #[test]
    fn test_bare_base_is_ignored() {
        assert_eq!(join_url("aFile", "anotherFile"), "anotherFile");
        assert_eq!(join_url("", "img/a.png"), "img/a.png");
    }

    #[test]
    fn test_host_only_base() {
        assert_eq!(join_url("http://example.com", "a.png"), "http://example.com/a.png");
    }

    #[test]
    fn test_protocol_relative_takes_base_scheme() {
        assert_eq!(
            join_url("https://example.com/page.html", "//cdn.example.com/a.png"),
            "https://cdn.example.com/a.png"
        );
        assert_eq!(join_url("rel/page.html", "//cdn.example.com/a.png"), "//cdn.example.com/a.png");
    }

    #[test]
    fn test_query_of_base_is_not_a_directory() {
        assert_eq!(
            join_url("http://example.com/a/page?next=/b/c", "x.png"),
            "http://example.com/a/x.png"
        );
    }

    #[test]
    fn test_query_and_fragment_of_relative_survive() {
        assert_eq!(
            join_url("http://example.com/a/", "../b/font.woff?v=1.2/3#iefix"),
            "http://example.com/b/font.woff?v=1.2/3#iefix"
        );
    }

    #[test]
    fn test_current_directory_segments() {
        assert_eq!(join_url("rel/path/", "./x.png"), "rel/path/x.png");
        assert_eq!(join_url("rel/path/", ".."), "rel/");
    }
}
