pub mod constants;
pub mod css_url;
pub mod url_utils;

pub use constants::*;
pub use css_url::{CssUrlMatch, InvalidUrlError, extract_css_url, find_css_urls, rewrite_css_urls};
pub use url_utils::{has_scheme, is_data_uri, join_url};
