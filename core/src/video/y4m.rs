//! video/y4m.rs
//! YUV4MPEG2 container, written and read without an external tool.
//!
//! Writes a luma-only (`Cmono`) stream: one byte per pixel, no chroma planes, so
//! frames round-trip bit-exactly. Reading also accepts 4:2:0, 4:2:2 and 4:4:4
//! 8-bit streams (as produced by common tools) by keeping the luma plane and
//! skipping chroma.
//!
//! Layout:
//!
//! ```text
//! YUV4MPEG2 W<w> H<h> F<fps>:1 Ip A1:1 Cmono\n
//! FRAME\n <w*h luma bytes>
//! FRAME\n <w*h luma bytes>
//! ...
//! ```

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::constants::Y4M_EXTENSION;
use crate::frame::{Frame, FrameGeometry};
use crate::video::types::{VideoError, VideoSink, VideoSource};

const STREAM_MAGIC: &[u8] = b"YUV4MPEG2";
const FRAME_MAGIC: &[u8] = b"FRAME";

/// Built-in YUV4MPEG2 backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct Y4mVideo;

impl Y4mVideo {
    pub fn new() -> Self {
        Self
    }
}

/// Stream header line for `geometry` at `fps`, newline included.
pub fn stream_header(geometry: FrameGeometry, fps: u32) -> String {
    format!(
        "YUV4MPEG2 W{} H{} F{}:1 Ip A1:1 Cmono\n",
        geometry.width, geometry.height, fps
    )
}

impl VideoSink for Y4mVideo {
    fn extension(&self) -> &str {
        Y4M_EXTENSION
    }

    fn write_video(
        &self,
        path: &Path,
        geometry: FrameGeometry,
        frames: &[Frame],
        fps: u32,
    ) -> Result<(), VideoError> {
        let mut w = BufWriter::new(File::create(path)?);
        w.write_all(stream_header(geometry, fps.max(1)).as_bytes())?;
        for frame in frames {
            if frame.geometry() != geometry {
                return Err(VideoError::GeometryMismatch {
                    expected: geometry,
                    actual: frame.geometry(),
                });
            }
            w.write_all(FRAME_MAGIC)?;
            w.write_all(b"\n")?;
            w.write_all(frame.pixels())?;
        }
        w.flush()?;

        debug!(path = %path.display(), frames = frames.len(), %geometry, "y4m written");
        Ok(())
    }
}

impl VideoSource for Y4mVideo {
    fn read_frames(&self, path: &Path, geometry: FrameGeometry) -> Result<Vec<Frame>, VideoError> {
        let data = fs::read(path)?;
        let frames = parse_stream(&data, geometry)?;
        debug!(path = %path.display(), frames = frames.len(), "y4m read");
        Ok(frames)
    }
}

/// Parameters from the stream header that matter for reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StreamInfo<'a> {
    geometry: FrameGeometry,
    colorspace: &'a str,
}

/// Parse a whole Y4M stream held in memory.
///
/// A header-only stream yields no frames. A stream whose dimensions differ
/// from `expected` is rejected rather than reinterpreted.
pub fn parse_stream(data: &[u8], expected: FrameGeometry) -> Result<Vec<Frame>, VideoError> {
    let (line, mut rest) = split_line(data)
        .ok_or_else(|| VideoError::Malformed("missing stream header".into()))?;
    let info = parse_stream_header(line)?;

    // checked before any size arithmetic on the header's dimensions
    if info.geometry != expected {
        return Err(VideoError::GeometryMismatch { expected, actual: info.geometry });
    }

    let luma_len = info.geometry.bits_per_frame();
    let need = chroma_len(info.colorspace, info.geometry)?
        .checked_add(luma_len)
        .ok_or_else(|| too_large(info.geometry))?;
    let mut frames = Vec::new();
    while !rest.is_empty() {
        let (line, body) = split_line(rest)
            .ok_or_else(|| VideoError::Malformed("truncated frame header".into()))?;
        // FRAME may carry its own parameters after a space
        if !(line == FRAME_MAGIC || line.starts_with(b"FRAME ")) {
            return Err(VideoError::Malformed(format!(
                "expected FRAME marker at frame {}",
                frames.len()
            )));
        }

        if body.len() < need {
            return Err(VideoError::Malformed(format!(
                "frame {} truncated: {} of {} bytes",
                frames.len(),
                body.len(),
                need
            )));
        }
        frames.push(Frame::from_gray(info.geometry, body[..luma_len].to_vec())?);
        rest = &body[need..];
    }

    Ok(frames)
}

fn parse_stream_header(line: &[u8]) -> Result<StreamInfo<'_>, VideoError> {
    let text = std::str::from_utf8(line)
        .map_err(|_| VideoError::Malformed("stream header is not ASCII".into()))?;
    let mut tokens = text.split(' ').filter(|t| !t.is_empty());

    if tokens.next().map(str::as_bytes) != Some(STREAM_MAGIC) {
        return Err(VideoError::Malformed("not a YUV4MPEG2 stream".into()));
    }

    let mut width = None;
    let mut height = None;
    // the format's default colorspace
    let mut colorspace = "420jpeg";
    for token in tokens {
        let mut chars = token.chars();
        let tag = chars.next();
        let value = chars.as_str();
        match tag {
            Some('W') => width = Some(parse_dim(value, "width")?),
            Some('H') => height = Some(parse_dim(value, "height")?),
            Some('C') => colorspace = value,
            // frame rate, interlacing, aspect and extensions do not affect layout
            _ => {}
        }
    }

    let (width, height) = match (width, height) {
        (Some(w), Some(h)) => (w, h),
        _ => return Err(VideoError::Malformed("stream header lacks W or H".into())),
    };
    let geometry = FrameGeometry::new(width, height);
    geometry.validate()?;

    Ok(StreamInfo { geometry, colorspace })
}

fn parse_dim(value: &str, what: &str) -> Result<u32, VideoError> {
    value
        .parse()
        .map_err(|_| VideoError::Malformed(format!("bad {} '{}'", what, value)))
}

/// Bytes of chroma following the luma plane in each frame.
fn chroma_len(colorspace: &str, g: FrameGeometry) -> Result<usize, VideoError> {
    let w = g.width as usize;
    let h = g.height as usize;
    let (plane_w, plane_h) = match colorspace {
        "mono" => return Ok(0),
        "420" | "420jpeg" | "420paldv" | "420mpeg2" => (w.div_ceil(2), h.div_ceil(2)),
        "422" => (w.div_ceil(2), h),
        "444" => (w, h),
        other => return Err(VideoError::Unsupported(format!("colorspace C{}", other))),
    };
    plane_w
        .checked_mul(plane_h)
        .and_then(|n| n.checked_mul(2))
        .ok_or_else(|| too_large(g))
}

fn too_large(g: FrameGeometry) -> VideoError {
    VideoError::Malformed(format!("frame size of {} overflows", g))
}

/// Split off one `\n`-terminated line. `None` when no newline remains.
fn split_line(data: &[u8]) -> Option<(&[u8], &[u8])> {
    let end = data.iter().position(|&b| b == b'\n')?;
    Some((&data[..end], &data[end + 1..]))
}
