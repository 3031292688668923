//! Records decoded from `ffprobe -print_format json -show_format -show_streams`.
//!
//! ffprobe omits fields it cannot determine, so every field defaults when
//! absent. Numeric values ffprobe prints as strings (durations, bit rates,
//! frame counts) are kept as strings, with parsing helpers where useful.

use std::collections::BTreeMap;

use media_types::{CodecType, Resolution};
use serde::{Deserialize, Serialize};

/// Complete probe report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProbeResults {
    #[serde(default)]
    pub streams: Vec<ProbedStream>,
    #[serde(default)]
    pub format: Format,
}

impl ProbeResults {
    pub fn video_streams(&self) -> impl Iterator<Item = &ProbedStream> {
        self.streams.iter().filter(|s| s.is_video())
    }

    pub fn audio_streams(&self) -> impl Iterator<Item = &ProbedStream> {
        self.streams.iter().filter(|s| s.is_audio())
    }

    pub fn has_video(&self) -> bool {
        self.video_streams().next().is_some()
    }

    pub fn has_audio(&self) -> bool {
        self.audio_streams().next().is_some()
    }
}

/// Container-level information.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Format {
    pub filename: Option<String>,
    pub format_name: Option<String>,
    pub format_long_name: Option<String>,
    pub start_time: Option<String>,
    pub duration: Option<String>,
    pub size: Option<String>,
    pub bit_rate: Option<String>,
    pub nb_streams: u32,
    pub nb_programs: u32,
    pub probe_score: u32,
    pub tags: BTreeMap<String, String>,
}

impl Format {
    pub fn duration_secs(&self) -> Option<f64> {
        parse_secs(self.duration.as_deref())
    }
}

/// Stream disposition flags, each `0` or `1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Disposition {
    pub default: u8,
    pub dub: u8,
    pub original: u8,
    pub comment: u8,
    pub lyrics: u8,
    pub karaoke: u8,
    pub forced: u8,
    pub hearing_impaired: u8,
    pub visual_impaired: u8,
    pub clean_effects: u8,
    pub attached_pic: u8,
    pub timed_thumbnails: u8,
}

impl Disposition {
    pub fn is_default(&self) -> bool {
        self.default != 0
    }

    /// Cover art embedded as a video stream.
    pub fn is_attached_pic(&self) -> bool {
        self.attached_pic != 0
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamTags {
    pub language: Option<String>,
    pub handler_name: Option<String>,
    pub vendor_id: Option<String>,
    #[serde(flatten)]
    pub other: BTreeMap<String, String>,
}

/// One elementary stream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbedStream {
    pub index: u32,
    pub codec_name: Option<String>,
    pub codec_long_name: Option<String>,
    pub profile: Option<String>,
    pub codec_type: CodecType,
    pub codec_tag_string: Option<String>,
    pub codec_tag: Option<String>,

    // Video
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub coded_width: Option<u32>,
    pub coded_height: Option<u32>,
    pub closed_captions: Option<u8>,
    pub has_b_frames: Option<u32>,
    pub pix_fmt: Option<String>,
    pub level: Option<i32>,
    pub chroma_location: Option<String>,
    pub refs: Option<u32>,
    pub is_avc: Option<String>,
    pub nal_length_size: Option<String>,

    // Audio
    pub sample_fmt: Option<String>,
    pub sample_rate: Option<String>,
    pub channels: Option<u32>,
    pub channel_layout: Option<String>,

    // Timing
    pub r_frame_rate: Option<String>,
    pub avg_frame_rate: Option<String>,
    pub time_base: Option<String>,
    pub start_pts: Option<i64>,
    pub start_time: Option<String>,
    pub duration_ts: Option<i64>,
    pub duration: Option<String>,
    pub bit_rate: Option<String>,
    pub bits_per_raw_sample: Option<String>,
    pub nb_frames: Option<String>,

    pub disposition: Disposition,
    pub tags: StreamTags,
}

impl ProbedStream {
    pub fn is_video(&self) -> bool {
        self.codec_type == CodecType::Video
    }

    pub fn is_audio(&self) -> bool {
        self.codec_type == CodecType::Audio
    }

    /// Display dimensions, when both are known and non-zero.
    pub fn resolution(&self) -> Option<Resolution> {
        match (self.width?, self.height?) {
            (0, _) | (_, 0) => None,
            (w, h) => Some(Resolution::new(w, h)),
        }
    }

    pub fn duration_secs(&self) -> Option<f64> {
        parse_secs(self.duration.as_deref())
    }

    /// Average frame rate as frames per second, from `num/den`.
    pub fn frame_rate(&self) -> Option<f64> {
        let (num, den) = self.avg_frame_rate.as_deref()?.split_once('/')?;
        let num: f64 = num.parse().ok()?;
        let den: f64 = den.parse().ok()?;
        (den != 0.0).then(|| num / den)
    }
}

fn parse_secs(value: Option<&str>) -> Option<f64> {
    value?.trim().parse().ok()
}
