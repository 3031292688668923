//! # ffprobe
//!
//! Runs the `ffprobe` binary against a file or a byte stream and decodes its
//! JSON report into [`ProbeResults`].
//!
//! ```no_run
//! # async fn run() -> ffprobe::Result<()> {
//! let results = ffprobe::Prober::new().probe("recording.mp4").await?;
//! if let Some(resolution) = results.video_streams().next().and_then(|s| s.resolution()) {
//!     println!("{} ({:?}s)", resolution, results.format.duration_secs());
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod model;
mod prober;

pub use config::ProbeConfig;
pub use error::{ProbeError, Result};
pub use media_types::{CodecType, Resolution};
pub use model::{Disposition, Format, ProbeResults, ProbedStream, StreamTags};
pub use prober::{Prober, parse_output};
