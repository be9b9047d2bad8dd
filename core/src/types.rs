use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::{
    bits::BitsError,
    frame::FrameError,
    headers::HeaderError,
    sidecar::SidecarError,
    video::VideoError,
};

/// Unified codec error covering I/O, payload framing, frames, video, and sidecars.
/// - `From<T>` impls enable `?` across the pipeline.
/// - The batch orchestration decides per variant whether a file is skipped or failed.
#[derive(Debug, Error)]
pub enum BitreelError {
    /// File unreadable or unwritable.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Decode requested for a video with no identity record.
    #[error("no sidecar record for video '{video_id}'")]
    MissingSidecar { video_id: String },

    /// Reconstructed text is not valid under the byte->text alphabet.
    #[error("text representation is not valid base64: {0}")]
    DecodeAlphabet(#[from] base64::DecodeError),

    /// Mode string is neither `encode` nor `decode`.
    #[error("invalid mode '{0}', expected 'encode' or 'decode'")]
    InvalidMode(String),

    #[error("bit packing error: {0}")]
    Bits(#[from] BitsError),

    #[error("payload header error: {0}")]
    Header(#[from] HeaderError),

    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    #[error("video error: {0}")]
    Video(#[from] VideoError),

    #[error("sidecar error: {0}")]
    Sidecar(SidecarError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("input path has no usable file name: {}", .0.display())]
    BadPath(PathBuf),

    #[error("batch cancelled")]
    Cancelled,
}

impl From<SidecarError> for BitreelError {
    fn from(e: SidecarError) -> Self {
        match e {
            SidecarError::NotFound { video_id } => BitreelError::MissingSidecar { video_id },
            SidecarError::Io(e) => BitreelError::Io(e),
            other => BitreelError::Sidecar(other),
        }
    }
}

impl From<serde_json::Error> for BitreelError {
    fn from(e: serde_json::Error) -> Self {
        BitreelError::Config(e.to_string())
    }
}

impl BitreelError {
    /// Skips are expected outcomes in a batch (nothing to do for this file);
    /// everything else is reported as a failure.
    pub fn is_skip(&self) -> bool {
        matches!(self, BitreelError::MissingSidecar { .. })
    }
}

pub type Result<T, E = BitreelError> = std::result::Result<T, E>;
