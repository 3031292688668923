//! Probe settings.

use serde::{Deserialize, Serialize};

/// ffprobe invocation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Path to the ffprobe binary. Defaults to `$FFPROBE_PATH`, then `ffprobe`.
    #[serde(default = "default_ffprobe_path")]
    pub binary_path: String,
    /// Additional arguments placed before the probed target.
    #[serde(default)]
    pub extra_args: Vec<String>,
}

fn default_ffprobe_path() -> String {
    std::env::var("FFPROBE_PATH").unwrap_or_else(|_| "ffprobe".to_string())
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            binary_path: default_ffprobe_path(),
            extra_args: Vec::new(),
        }
    }
}
