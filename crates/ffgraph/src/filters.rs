//! Constructors for common ffmpeg filters.
//!
//! These only build graph nodes; nothing is registered until the result is
//! resolved into a [`FilterGraph`](crate::FilterGraph). Scalar parameters are
//! rendered with six decimals so equal values always produce equal filter
//! strings.

use crate::stream::{Input, Stream};

/// Apply an arbitrary filter expression with `arity` outputs.
///
/// The returned streams are the filter's outputs in pad order.
pub fn apply(inputs: &[Stream], expr: impl Into<String>, arity: usize) -> Vec<Stream> {
    Stream::filter_outputs(inputs.to_vec(), expr.into(), arity)
}

/// Apply a single-output filter expression to `stream`, passed verbatim.
pub fn filter(stream: &Stream, expr: impl Into<String>) -> Stream {
    Stream::filter(vec![stream.clone()], expr.into())
}

/// A filter with no inputs, such as `color=...` or `sine=...`.
pub fn source_filter(expr: impl Into<String>) -> Stream {
    Stream::filter(Vec::new(), expr.into())
}

/// Split a video stream in two.
pub fn split(stream: &Stream) -> (Stream, Stream) {
    pair(split_n(stream, 2))
}

/// Split a video stream into `n` copies.
pub fn split_n(stream: &Stream, n: usize) -> Vec<Stream> {
    split_with("split", stream, n)
}

/// Split an audio stream in two.
pub fn asplit(stream: &Stream) -> (Stream, Stream) {
    pair(asplit_n(stream, 2))
}

/// Split an audio stream into `n` copies.
pub fn asplit_n(stream: &Stream, n: usize) -> Vec<Stream> {
    split_with("asplit", stream, n)
}

fn split_with(name: &str, stream: &Stream, n: usize) -> Vec<Stream> {
    Stream::filter_outputs(vec![stream.clone()], format!("{}={}", name, n), n)
}

fn pair(streams: Vec<Stream>) -> (Stream, Stream) {
    let mut iter = streams.into_iter();
    match (iter.next(), iter.next()) {
        (Some(a), Some(b)) => (a, b),
        _ => unreachable!("two-way split yields two outputs"),
    }
}

/// Concatenate segments with `v` video and `a` audio streams each.
///
/// `streams` lists every segment's streams in order; the result holds the
/// `v + a` concatenated outputs, videos first.
pub fn concat(v: usize, a: usize, streams: &[Stream]) -> Vec<Stream> {
    Stream::filter_outputs(streams.to_vec(), format!("concat=v={}:a={}", v, a), v + a)
}

pub fn hflip(stream: &Stream) -> Stream {
    filter(stream, "hflip")
}

pub fn reverse(stream: &Stream) -> Stream {
    filter(stream, "reverse")
}

pub fn areverse(stream: &Stream) -> Stream {
    filter(stream, "areverse")
}

/// Pad audio with silence indefinitely.
pub fn apad(stream: &Stream) -> Stream {
    filter(stream, "apad")
}

pub fn volume(stream: &Stream, volume: f64) -> Stream {
    filter(stream, format!("volume={:.6}", volume))
}

/// Scale presentation timestamps; `2.0` plays at half speed.
pub fn multiply_pts(stream: &Stream, factor: f64) -> Stream {
    filter(stream, format!("setpts={:.6}*PTS", factor))
}

pub fn atempo(stream: &Stream, tempo: f64) -> Stream {
    filter(stream, format!("atempo={:.6}", tempo))
}

/// Mix audio streams, ending with the shortest.
pub fn amix(streams: &[Stream]) -> Stream {
    Stream::filter(
        streams.to_vec(),
        format!("amix=inputs={}:duration=shortest", streams.len()),
    )
}

/// Draw `over` on top of `under` at (`x`, `y`).
pub fn overlay(under: &Stream, over: &Stream, x: i32, y: i32) -> Stream {
    Stream::filter(
        vec![under.clone(), over.clone()],
        format!("overlay={}:{}", x, y),
    )
}

pub fn palettegen(stream: &Stream) -> Stream {
    filter(stream, "palettegen")
}

/// Quantize `video` with a palette produced by [`palettegen`].
pub fn palette_use(video: &Stream, palette: &Stream) -> Stream {
    Stream::filter(vec![video.clone(), palette.clone()], "paletteuse".to_string())
}

/// Silent audio from the lavfi `anullsrc` device.
pub fn anullsrc() -> Stream {
    Input::with_options("anullsrc", ["-f", "lavfi"]).into()
}
