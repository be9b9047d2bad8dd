//! Video containers.
//!
//! Responsibilities:
//! - Persist a frame sequence at a fixed frame rate, in order
//! - Read frames back in the same order, at a known geometry
//!
//! Backends:
//! - `Y4mVideo`: built-in YUV4MPEG2 writer/reader, lossless, no external tools
//! - `FfmpegVideo`: external `ffmpeg` process, any codec/container it supports
//! - `MemoryVideo`: in-process map, for tests and embedding

pub mod types;
pub mod y4m;
pub mod ffmpeg;
pub mod memory;

pub use types::{VideoBackend, VideoError, VideoSink, VideoSource};
pub use y4m::Y4mVideo;
pub use ffmpeg::FfmpegVideo;
pub use memory::{MemoryClip, MemoryVideo};
