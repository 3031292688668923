//! ffmpeg invocation settings.

use serde::{Deserialize, Serialize};

/// How a compiled graph is turned into a process command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FfmpegConfig {
    /// Path to the ffmpeg binary. Defaults to `$FFMPEG_PATH`, then `ffmpeg`.
    #[serde(default = "default_ffmpeg_path")]
    pub binary_path: String,
    /// Arguments placed before every input, e.g. `-y` or `-hide_banner`.
    #[serde(default)]
    pub global_args: Vec<String>,
}

fn default_ffmpeg_path() -> String {
    std::env::var("FFMPEG_PATH").unwrap_or_else(|_| "ffmpeg".to_string())
}

impl Default for FfmpegConfig {
    fn default() -> Self {
        Self {
            binary_path: default_ffmpeg_path(),
            global_args: Vec::new(),
        }
    }
}
