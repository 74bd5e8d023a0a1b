//! Data URI encoding for fetched binary resources

use base64::Engine;

use crate::fetch::FetchedBinary;
use crate::utils::constants::FALLBACK_MIME_TYPE;

/// Media type for a URL judged by its file extension
#[must_use]
pub fn guess_mime_type(url: &str) -> Option<&'static str> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let file_name = path.rsplit('/').next().unwrap_or(path);
    let (_, extension) = file_name.rsplit_once('.')?;

    let mime = match extension.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "bmp" => "image/bmp",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "otf" => "font/otf",
        "eot" => "application/vnd.ms-fontobject",
        "css" => "text/css",
        _ => return None,
    };
    Some(mime)
}

/// Media type to embed: the reported one, else the extension, else the fallback
///
/// Parameters of the reported type are dropped: a quoted value would end the
/// `url("...")` token the URI is written into.
#[must_use]
pub fn media_type(url: &str, content_type: Option<&str>) -> String {
    content_type
        .and_then(|ct| ct.split(';').next())
        .map(str::trim)
        .filter(|ct| {
            !ct.is_empty() && *ct != FALLBACK_MIME_TYPE && !ct.contains(['"', '\\'])
        })
        .map(str::to_string)
        .or_else(|| guess_mime_type(url).map(str::to_string))
        .unwrap_or_else(|| FALLBACK_MIME_TYPE.to_string())
}

/// Encode fetched bytes as a `data:<type>;base64,<payload>` URI
#[must_use]
pub fn to_data_uri(url: &str, fetched: &FetchedBinary) -> String {
    let content_type = media_type(url, fetched.content_type.as_deref());

    let encoded_capacity = base64::encoded_len(fetched.bytes.len(), true).unwrap_or(0);
    let mut encoded = String::with_capacity(encoded_capacity + 13 + content_type.len());

    encoded.push_str("data:");
    encoded.push_str(&content_type);
    encoded.push_str(";base64,");
    base64::engine::general_purpose::STANDARD.encode_string(&fetched.bytes, &mut encoded);

    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_mime_type() {
        assert_eq!(guess_mime_type("img/logo.PNG"), Some("image/png"));
        assert_eq!(
            guess_mime_type("http://cdn.test/f.woff2?v=3#iefix"),
            Some("font/woff2")
        );
        assert_eq!(guess_mime_type("http://cdn.test/v1.2/image"), None);
        assert_eq!(guess_mime_type("noextension"), None);
    }

    #[test]
    fn test_media_type_precedence() {
        assert_eq!(media_type("a.png", Some("image/webp")), "image/webp");
        assert_eq!(
            media_type("a.svg", Some("image/svg+xml; charset=utf-8")),
            "image/svg+xml"
        );
        assert_eq!(
            media_type("a.svg", Some(r#"image/svg+xml;charset="utf-8""#)),
            "image/svg+xml"
        );
        assert_eq!(media_type("a.png", Some(" ; charset=x")), "image/png");
        assert_eq!(media_type("a.png", Some(FALLBACK_MIME_TYPE)), "image/png");
        assert_eq!(media_type("a.png", None), "image/png");
        assert_eq!(media_type("blob", None), FALLBACK_MIME_TYPE);
    }

    #[test]
    fn test_to_data_uri() {
        let fetched = FetchedBinary {
            bytes: b"GIF89a".to_vec(),
            content_type: None,
        };
        assert_eq!(
            to_data_uri("pixel.gif", &fetched),
            "data:image/gif;base64,R0lGODlh"
        );
    }
}
