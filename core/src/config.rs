//! config.rs
//! Codec configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config and a
//! config file only needs the fields it changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_FFMPEG_CODEC, DEFAULT_FFMPEG_CONTAINER, DEFAULT_FPS, DEFAULT_FRAME_HEIGHT,
    DEFAULT_FRAME_WIDTH, DEFAULT_SIDECAR_EXTENSION, DEFAULT_THRESHOLD, DEFAULT_VIDEO_SUFFIX,
    DEFAULT_WORKERS, Y4M_EXTENSION,
};
use crate::frame::FrameGeometry;
use crate::sidecar::OverwritePolicy;
use crate::text::Alphabet;
use crate::types::BitreelError;
use crate::video::{FfmpegVideo, VideoBackend, Y4mVideo};

/// Payload layout packed into frames.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Framing {
    /// Length/CRC header before the text. Lossless for any input.
    #[default]
    Header,
    /// Bare text. Zero bytes in the recovered stream are dropped.
    Legacy,
}

/// Which container backend writes and reads videos.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackendConfig {
    #[default]
    Y4m,
    Ffmpeg {
        #[serde(default = "default_ffmpeg_codec")]
        codec: String,
        #[serde(default = "default_ffmpeg_container")]
        container: String,
    },
}

fn default_ffmpeg_codec() -> String {
    DEFAULT_FFMPEG_CODEC.to_string()
}

fn default_ffmpeg_container() -> String {
    DEFAULT_FFMPEG_CONTAINER.to_string()
}

impl BackendConfig {
    /// `ffmpeg` with the default lossless codec and container.
    pub fn ffmpeg() -> Self {
        BackendConfig::Ffmpeg { codec: default_ffmpeg_codec(), container: default_ffmpeg_container() }
    }

    /// File extension of produced videos, without the dot.
    pub fn container_extension(&self) -> &str {
        match self {
            BackendConfig::Y4m => Y4M_EXTENSION,
            BackendConfig::Ffmpeg { container, .. } => container.trim_start_matches('.'),
        }
    }

    pub fn build(&self) -> Box<dyn VideoBackend> {
        match self {
            BackendConfig::Y4m => Box::new(Y4mVideo::new()),
            BackendConfig::Ffmpeg { codec, container } => Box::new(FfmpegVideo::new(codec, container)),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct CodecConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    /// Pixels at or above this read as `1`.
    pub threshold: u8,
    pub framing: Framing,
    pub alphabet: Alphabet,
    pub backend: BackendConfig,
    /// Appended to the source file name to form the video name.
    pub video_suffix: String,
    pub sidecar_extension: String,
    pub overwrite: OverwritePolicy,
    /// Frame render/parse threads; 0 = one per CPU.
    pub workers: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_FRAME_WIDTH,
            height: DEFAULT_FRAME_HEIGHT,
            fps: DEFAULT_FPS,
            threshold: DEFAULT_THRESHOLD,
            framing: Framing::default(),
            alphabet: Alphabet::default(),
            backend: BackendConfig::default(),
            video_suffix: DEFAULT_VIDEO_SUFFIX.to_string(),
            sidecar_extension: DEFAULT_SIDECAR_EXTENSION.to_string(),
            overwrite: OverwritePolicy::default(),
            workers: DEFAULT_WORKERS,
        }
    }
}

impl CodecConfig {
    pub fn geometry(&self) -> FrameGeometry {
        FrameGeometry::new(self.width, self.height)
    }

    /// Load from a JSON file and validate. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, BitreelError> {
        let raw = fs::read_to_string(path)?;
        let config: CodecConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), BitreelError> {
        self.geometry()
            .validate()
            .map_err(|e| BitreelError::Config(e.to_string()))?;
        if self.fps == 0 {
            return Err(BitreelError::Config("fps must be at least 1".into()));
        }
        if self.threshold == 0 {
            // every pixel, padding included, would read as 1
            return Err(BitreelError::Config("threshold must be at least 1".into()));
        }
        let ext = self.backend.container_extension();
        if ext.is_empty() || ext.contains(['/', '\\']) {
            return Err(BitreelError::Config(format!("unusable container extension '{}'", ext)));
        }
        if self.sidecar_extension.trim_start_matches('.').is_empty() {
            return Err(BitreelError::Config("sidecar extension is empty".into()));
        }
        if self.video_suffix.contains(['/', '\\']) {
            return Err(BitreelError::Config(format!("unusable video suffix '{}'", self.video_suffix)));
        }
        if let BackendConfig::Ffmpeg { codec, .. } = &self.backend {
            if codec.trim().is_empty() {
                return Err(BitreelError::Config("ffmpeg codec is empty".into()));
            }
        }
        Ok(())
    }
}
