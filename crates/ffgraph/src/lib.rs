//! # ffgraph
//!
//! Describe an ffmpeg pipeline as a graph of streams and compile it into a
//! single flat argument list.
//!
//! Streams are cheap, immutable handles. Nothing is registered until a
//! stream is mapped to an output: [`FilterGraph::add_output`] walks the
//! stream bottom-up, declaring each distinct input and filter exactly once,
//! and [`FilterGraph::compile`] renders the result.
//!
//! ## Example
//!
//! ```rust
//! use ffgraph::{FilterGraph, Stream, filters};
//!
//! let under = Stream::input("A");
//! let over = Stream::input("B");
//!
//! let mut graph = FilterGraph::new();
//! graph.add_output("out.mp4", vec![], &[filters::overlay(&under, &over, 10, 20)]);
//!
//! let compiled = graph.compile();
//! assert_eq!(compiled.inputs, ["-i", "A", "-i", "B"]);
//! assert_eq!(compiled.filter_complex.as_deref(), Some("[0][1]overlay=10:20[s0]"));
//! assert_eq!(compiled.outputs, ["-map", "[s0]", "out.mp4"]);
//! ```

mod compile;
pub mod config;
pub mod filters;
mod graph;
mod stream;

pub use compile::CompiledCommand;
pub use config::FfmpegConfig;
pub use graph::{FilterEntry, FilterGraph, FilterKey, MapRef, Output};
pub use media_types::StreamKind;
pub use stream::{FileHandle, Input, Stream};

/// Prefix of the synthesized path used to address an open file handle.
pub const FD_PATH_PREFIX: &str = "/dev/fd";

/// First descriptor number handed to file handles; 0-2 are stdio.
pub const FD_BASE: usize = 3;

/// Prefix of generated filter output labels.
pub const LABEL_PREFIX: &str = "s";
