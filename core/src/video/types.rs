use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

use crate::frame::{Frame, FrameError, FrameGeometry};

/// Persists a frame sequence to a container file.
pub trait VideoSink {
    /// Container extension written by this sink, without the dot.
    fn extension(&self) -> &str;

    /// Write every frame, in order, at a fixed frame rate.
    ///
    /// Every frame must have `geometry`; an empty slice still produces a valid,
    /// frameless container where the format allows one.
    fn write_video(
        &self,
        path: &Path,
        geometry: FrameGeometry,
        frames: &[Frame],
        fps: u32,
    ) -> Result<(), VideoError>;

    /// Move a completed output from its in-progress path to its final path.
    fn commit(&self, partial: &Path, path: &Path) -> Result<(), VideoError> {
        fs::rename(partial, path)?;
        Ok(())
    }

    /// Drop an in-progress output after a failure. Missing files are fine.
    fn discard(&self, partial: &Path) -> Result<(), VideoError> {
        match fs::remove_file(partial) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// Reads a frame sequence back, in the order it was written.
pub trait VideoSource {
    fn read_frames(&self, path: &Path, geometry: FrameGeometry) -> Result<Vec<Frame>, VideoError>;
}

impl<T: VideoSink + ?Sized> VideoSink for Arc<T> {
    fn extension(&self) -> &str {
        (**self).extension()
    }

    fn write_video(
        &self,
        path: &Path,
        geometry: FrameGeometry,
        frames: &[Frame],
        fps: u32,
    ) -> Result<(), VideoError> {
        (**self).write_video(path, geometry, frames, fps)
    }

    fn commit(&self, partial: &Path, path: &Path) -> Result<(), VideoError> {
        (**self).commit(partial, path)
    }

    fn discard(&self, partial: &Path) -> Result<(), VideoError> {
        (**self).discard(partial)
    }
}

impl<T: VideoSource + ?Sized> VideoSource for Arc<T> {
    fn read_frames(&self, path: &Path, geometry: FrameGeometry) -> Result<Vec<Frame>, VideoError> {
        (**self).read_frames(path, geometry)
    }
}

/// Both directions, shareable across threads.
pub trait VideoBackend: VideoSink + VideoSource + Send + Sync {}

impl<T: VideoSink + VideoSource + Send + Sync> VideoBackend for T {}

#[derive(Debug)]
pub enum VideoError {
    Io(io::Error),
    /// External encoder/decoder could not be started.
    Spawn { program: String, source: io::Error },
    /// External encoder/decoder exited unsuccessfully.
    ToolFailed { program: String, status: String, stderr: String },
    Malformed(String),
    Unsupported(String),
    GeometryMismatch { expected: FrameGeometry, actual: FrameGeometry },
    Frame(FrameError),
    NotFound(String),
}

impl fmt::Display for VideoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use VideoError::*;
        match self {
            Io(e) => write!(f, "video I/O error: {}", e),
            Spawn { program, source } =>
                write!(f, "failed to start '{}': {}", program, source),
            ToolFailed { program, status, stderr } =>
                write!(f, "'{}' exited with {}: {}", program, status, stderr.trim()),
            Malformed(msg) => write!(f, "malformed video: {}", msg),
            Unsupported(msg) => write!(f, "unsupported video: {}", msg),
            GeometryMismatch { expected, actual } =>
                write!(f, "video is {} but frames are configured as {}", actual, expected),
            Frame(e) => write!(f, "{}", e),
            NotFound(path) => write!(f, "no video at {}", path),
        }
    }
}

impl std::error::Error for VideoError {}

impl From<io::Error> for VideoError {
    fn from(e: io::Error) -> Self {
        VideoError::Io(e)
    }
}

impl From<FrameError> for VideoError {
    fn from(e: FrameError) -> Self {
        VideoError::Frame(e)
    }
}
