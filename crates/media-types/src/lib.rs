//! Shared media domain types used by the filtergraph compiler and the probe.

use serde::{Deserialize, Serialize};

/// Video resolution information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    #[inline]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// The portion of a multiplexed stream a selector narrows to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    Video,
    Audio,
}

impl StreamKind {
    /// Stream specifier letter as understood by ffmpeg (`v` / `a`).
    #[inline]
    pub const fn specifier(self) -> &'static str {
        match self {
            Self::Video => "v",
            Self::Audio => "a",
        }
    }
}

impl std::fmt::Display for StreamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.specifier())
    }
}

/// Elementary stream classification reported by ffprobe's `codec_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodecType {
    Video,
    Audio,
    Subtitle,
    Data,
    Attachment,
    #[default]
    #[serde(other)]
    Unknown,
}

impl CodecType {
    /// The selector class this codec type maps to, if any.
    pub fn stream_kind(self) -> Option<StreamKind> {
        match self {
            Self::Video => Some(StreamKind::Video),
            Self::Audio => Some(StreamKind::Audio),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_display() {
        let r = Resolution::new(1920, 1080);
        assert_eq!(r.to_string(), "1920x1080");
    }

    #[test]
    fn test_stream_kind_specifier() {
        assert_eq!(StreamKind::Video.specifier(), "v");
        assert_eq!(StreamKind::Audio.to_string(), "a");
    }

    #[test]
    fn test_codec_type_deserialize() {
        let t: CodecType = serde_json::from_str("\"audio\"").unwrap();
        assert_eq!(t, CodecType::Audio);
        assert_eq!(t.stream_kind(), Some(StreamKind::Audio));

        let t: CodecType = serde_json::from_str("\"something_new\"").unwrap();
        assert_eq!(t, CodecType::Unknown);
        assert_eq!(t.stream_kind(), None);
    }
}
