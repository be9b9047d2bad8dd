//! video/ffmpeg.rs
//! External `ffmpeg` process as encoder and decoder.
//!
//! Encoding streams raw `rgb24` frames (intensity replicated into three
//! channels) into the encoder's stdin. Decoding asks `ffmpeg` for a luma-only
//! YUV4MPEG2 stream on stdout, so the stream's own dimensions come back with
//! the pixels and are checked against the configured geometry. The container
//! is inferred by `ffmpeg` from the output file extension.
//!
//! Lossy codecs may shift intensities; parsing tolerates that up to the
//! threshold. Prefer a lossless codec (`ffv1`, the default) for exact data.

use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tracing::{debug, warn};

use crate::constants::{DEFAULT_FFMPEG_CODEC, DEFAULT_FFMPEG_CONTAINER, FFMPEG_BINARY};
use crate::frame::{Frame, FrameGeometry};
use crate::video::types::{VideoError, VideoSink, VideoSource};
use crate::video::y4m::parse_stream;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfmpegVideo {
    program: String,
    codec: String,
    container: String,
}

impl Default for FfmpegVideo {
    fn default() -> Self {
        Self::new(DEFAULT_FFMPEG_CODEC, DEFAULT_FFMPEG_CONTAINER)
    }
}

impl FfmpegVideo {
    pub fn new(codec: &str, container: &str) -> Self {
        Self {
            program: FFMPEG_BINARY.to_string(),
            codec: codec.to_string(),
            container: container.trim_start_matches('.').to_string(),
        }
    }

    /// Use a specific `ffmpeg` executable instead of the one on `PATH`.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn codec(&self) -> &str {
        &self.codec
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(["-hide_banner", "-loglevel", "error"]);
        cmd
    }

    fn spawn_error(&self, source: io::Error) -> VideoError {
        VideoError::Spawn { program: self.program.clone(), source }
    }

    fn check(&self, output: &Output) -> Result<(), VideoError> {
        if output.status.success() {
            return Ok(());
        }
        Err(VideoError::ToolFailed {
            program: self.program.clone(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

impl VideoSink for FfmpegVideo {
    fn extension(&self) -> &str {
        &self.container
    }

    fn write_video(
        &self,
        path: &Path,
        geometry: FrameGeometry,
        frames: &[Frame],
        fps: u32,
    ) -> Result<(), VideoError> {
        for frame in frames {
            if frame.geometry() != geometry {
                return Err(VideoError::GeometryMismatch {
                    expected: geometry,
                    actual: frame.geometry(),
                });
            }
        }

        let mut cmd = self.command();
        cmd.args(["-y", "-f", "rawvideo", "-pix_fmt", "rgb24"])
            .arg("-s")
            .arg(geometry.to_string())
            .arg("-r")
            .arg(fps.max(1).to_string())
            .args(["-i", "-", "-c:v"])
            .arg(&self.codec)
            .arg(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        debug!(program = %self.program, codec = %self.codec, path = %path.display(), frames = frames.len(), "spawning encoder");
        let mut child = cmd.spawn().map_err(|e| self.spawn_error(e))?;

        let mut feed_err = None;
        if let Some(mut stdin) = child.stdin.take() {
            for frame in frames {
                if let Err(e) = stdin.write_all(&frame.to_rgb24()) {
                    feed_err = Some(e);
                    break;
                }
            }
            // closing stdin ends the input stream
        }

        let output = child.wait_with_output()?;
        // a failed exit explains a broken pipe better than the pipe error does
        self.check(&output)?;
        if let Some(e) = feed_err {
            warn!(error = %e, "encoder exited cleanly but did not take every frame");
            return Err(e.into());
        }
        Ok(())
    }
}

impl VideoSource for FfmpegVideo {
    fn read_frames(&self, path: &Path, geometry: FrameGeometry) -> Result<Vec<Frame>, VideoError> {
        geometry.validate()?;
        if !path.exists() {
            return Err(VideoError::NotFound(path.display().to_string()));
        }

        let output = self
            .command()
            .arg("-nostdin")
            .arg("-i")
            .arg(path)
            // older builds want -strict for a mono y4m stream
            .args(["-f", "yuv4mpegpipe", "-pix_fmt", "gray", "-strict", "-1", "-"])
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.spawn_error(e))?;
        self.check(&output)?;

        let frames = parse_stream(&output.stdout, geometry)?;
        debug!(path = %path.display(), frames = frames.len(), "decoded via ffmpeg");
        Ok(frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_extension_has_no_dot() {
        let v = FfmpegVideo::new("ffv1", ".mkv");
        assert_eq!(v.extension(), "mkv");
        assert_eq!(v.codec(), "ffv1");
    }

    #[test]
    fn missing_binary_is_a_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let v = FfmpegVideo::default().with_program("bitreel-no-such-ffmpeg");
        let frames = vec![Frame::from_gray(FrameGeometry::new(2, 2), vec![0; 4]).unwrap()];
        let err = v
            .write_video(&dir.path().join("x.mkv"), FrameGeometry::new(2, 2), &frames, 1)
            .unwrap_err();
        assert!(matches!(err, VideoError::Spawn { .. }));
    }

    #[test]
    fn reading_a_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let v = FfmpegVideo::default();
        let err = v
            .read_frames(&dir.path().join("absent.mkv"), FrameGeometry::new(2, 2))
            .unwrap_err();
        assert!(matches!(err, VideoError::NotFound(_)));
    }
}
