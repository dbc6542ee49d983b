// ABOUTME: Converts feed documents in legacy or UTF-16 encodings to UTF-8 before tokenizing.
// ABOUTME: The encoding comes from the byte order mark, then the XML declaration.

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};
use once_cell::sync::Lazy;
use regex::bytes::Regex;

static DECLARED_ENCODING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^<\?xml[^>]*?\sencoding\s*=\s*["']([A-Za-z0-9._:-]+)["']"#)
        .expect("valid encoding declaration regex")
});

/// Returns the document as UTF-8. UTF-8 input is borrowed unchanged.
/// Undecodable bytes become U+FFFD rather than failing the parse.
pub fn to_utf8(data: &[u8]) -> Cow<'_, [u8]> {
    let (encoding, body) = match detect(data) {
        Some(found) => found,
        None => return Cow::Borrowed(data),
    };
    if encoding == UTF_8 {
        return Cow::Borrowed(body);
    }
    let (decoded, had_errors) = encoding.decode_without_bom_handling(body);
    if had_errors {
        tracing::debug!(encoding = encoding.name(), "replaced undecodable bytes in feed");
    }
    tracing::debug!(encoding = encoding.name(), "transcoded feed to UTF-8");
    Cow::Owned(decoded.into_owned().into_bytes())
}

/// The document encoding and the bytes after any byte order mark.
fn detect(data: &[u8]) -> Option<(&'static Encoding, &[u8])> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(data) {
        return Some((encoding, &data[bom_len..]));
    }
    // UTF-16 without a BOM still starts with "<" as a 16-bit unit.
    match data {
        [b'<', 0, ..] => return Some((UTF_16LE, data)),
        [0, b'<', ..] => return Some((UTF_16BE, data)),
        _ => {}
    }
    let head = &data[..data.len().min(512)];
    let label = DECLARED_ENCODING_RE.captures(head)?.get(1)?.as_bytes();
    let encoding = Encoding::for_label(label)?;
    // An ASCII-readable declaration cannot truthfully claim UTF-16.
    if encoding == UTF_16LE || encoding == UTF_16BE {
        return None;
    }
    Some((encoding, data))
}
