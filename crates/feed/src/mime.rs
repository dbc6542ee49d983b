// ABOUTME: MIME type helpers for enclosures: URL extension guessing and media checks.
// ABOUTME: Also resolves relative links against the document's download URL.

use podcore_model::MediaType;
use url::Url;

/// Extension to MIME type table used when a feed omits or blanks the type.
const EXTENSION_TYPES: &[(&str, &str)] = &[
    ("mp3", "audio/mpeg"),
    ("m4a", "audio/mp4"),
    ("m4b", "audio/mp4"),
    ("aac", "audio/aac"),
    ("ogg", "audio/ogg"),
    ("oga", "audio/ogg"),
    ("opus", "audio/opus"),
    ("flac", "audio/flac"),
    ("wav", "audio/wav"),
    ("mp4", "video/mp4"),
    ("m4v", "video/mp4"),
    ("mov", "video/quicktime"),
    ("webm", "video/webm"),
    ("ogv", "video/ogg"),
    ("mkv", "video/x-matroska"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
];

/// Guesses a MIME type from the extension of a URL's path.
pub fn guess_mime_type(url: &str) -> Option<&'static str> {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    };
    let file = path.rsplit('/').next()?;
    let (_, ext) = file.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    EXTENSION_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
}

/// The declared type when it is meaningful, otherwise a guess from the URL.
pub fn effective_mime_type(declared: Option<&str>, url: &str) -> Option<String> {
    let declared = declared
        .map(|t| t.trim().to_ascii_lowercase())
        .filter(|t| !t.is_empty());
    match declared {
        Some(t) if t != "application/octet-stream" => Some(t),
        other => guess_mime_type(url).map(str::to_string).or(other),
    }
}

pub fn is_media_file(mime_type: Option<&str>) -> bool {
    MediaType::from_mime_type(mime_type).is_playable()
}

pub fn is_image_file(mime_type: Option<&str>) -> bool {
    mime_type.is_some_and(|t| t.starts_with("image/"))
}

/// Resolves a potentially relative link against a base URL.
/// Absolute links, and links that cannot be joined, are returned trimmed.
pub fn resolve_url(href: &str, base: Option<&Url>) -> String {
    let href = href.trim();
    if href.is_empty() || Url::parse(href).is_ok() {
        return href.to_string();
    }
    match base.map(|b| b.join(href)) {
        Some(Ok(resolved)) => resolved.to_string(),
        _ => href.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guesses_from_extension() {
        assert_eq!(guess_mime_type("https://cdn.example.com/ep/1.MP3?x=1"), Some("audio/mpeg"));
        assert_eq!(guess_mime_type("/local/video.m4v"), Some("video/mp4"));
        assert_eq!(guess_mime_type("https://cdn.example.com/ep/1"), None);
        assert_eq!(guess_mime_type("https://cdn.example.com/ep.d/file"), None);
    }

    #[test]
    fn declared_type_wins_unless_generic() {
        assert_eq!(
            effective_mime_type(Some("audio/x-m4a"), "https://a/b.mp3").as_deref(),
            Some("audio/x-m4a")
        );
        assert_eq!(
            effective_mime_type(Some("application/octet-stream"), "https://a/b.mp3").as_deref(),
            Some("audio/mpeg")
        );
        assert_eq!(effective_mime_type(Some(" "), "https://a/b.ogg").as_deref(), Some("audio/ogg"));
        assert_eq!(effective_mime_type(None, "https://a/b"), None);
    }

    #[test]
    fn media_and_image_checks() {
        assert!(is_media_file(Some("audio/mpeg")));
        assert!(is_media_file(Some("video/mp4")));
        assert!(!is_media_file(Some("image/png")));
        assert!(!is_media_file(None));
        assert!(is_image_file(Some("image/png")));
    }

    #[test]
    fn resolves_relative_links() {
        let base = Url::parse("https://example.com/podcast/feed.xml").unwrap();
        assert_eq!(resolve_url("cover.jpg", Some(&base)), "https://example.com/podcast/cover.jpg");
        assert_eq!(resolve_url("/cover.jpg", Some(&base)), "https://example.com/cover.jpg");
        assert_eq!(resolve_url("https://cdn/x.jpg", Some(&base)), "https://cdn/x.jpg");
        assert_eq!(resolve_url(" cover.jpg ", None), "cover.jpg");
    }
}
