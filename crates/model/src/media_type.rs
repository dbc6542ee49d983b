// ABOUTME: Coarse media classification derived from a MIME type.
// ABOUTME: Used to decide whether an enclosure is playable audio or video.

use serde::{Deserialize, Serialize};

/// Application MIME types that carry audio.
const AUDIO_APPLICATION_MIME_TYPES: &[&str] = &["application/ogg", "application/opus", "application/x-flac"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Audio,
    Video,
    Unknown,
}

impl MediaType {
    pub fn from_mime_type(mime_type: Option<&str>) -> Self {
        match mime_type {
            None | Some("") => MediaType::Unknown,
            Some(mime) if mime.starts_with("audio") => MediaType::Audio,
            Some(mime) if mime.starts_with("video") => MediaType::Video,
            Some(mime) if AUDIO_APPLICATION_MIME_TYPES.contains(&mime) => MediaType::Audio,
            Some(_) => MediaType::Unknown,
        }
    }

    /// True for audio and video.
    pub fn is_playable(self) -> bool {
        self != MediaType::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_mime_types() {
        assert_eq!(MediaType::from_mime_type(Some("audio/mpeg")), MediaType::Audio);
        assert_eq!(MediaType::from_mime_type(Some("video/mp4")), MediaType::Video);
        assert_eq!(MediaType::from_mime_type(Some("application/ogg")), MediaType::Audio);
        assert_eq!(MediaType::from_mime_type(Some("image/png")), MediaType::Unknown);
        assert_eq!(MediaType::from_mime_type(Some("")), MediaType::Unknown);
        assert_eq!(MediaType::from_mime_type(None), MediaType::Unknown);
    }
}
