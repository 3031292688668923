//! Probe error types.

use std::process::ExitStatus;

use thiserror::Error;

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, ProbeError>;

/// Errors that can occur while probing media.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The probe binary could not be started.
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Feeding the input stream to the probe failed.
    #[error("Failed to write probe input: {0}")]
    Stdin(#[source] std::io::Error),

    /// The probe ran but reported failure.
    #[error("ffprobe exited with {status}: {stderr}")]
    Exit { status: ExitStatus, stderr: String },

    /// The probe output is not a valid report.
    #[error("Failed to decode ffprobe output: {0}")]
    Decode(#[from] serde_json::Error),

    /// IO errors while waiting on the probe.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProbeError {
    /// Whether the probe binary itself is unavailable.
    pub fn is_spawn(&self) -> bool {
        matches!(self, Self::Spawn { .. })
    }
}
