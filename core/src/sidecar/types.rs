use std::fmt;
use std::io;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Out-of-band mapping from a generated video to the file it was made from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidecarRecord {
    pub video_id: String,
    pub original_name: String,
}

/// What `record_identity` does when a record for the same video already exists.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OverwritePolicy {
    /// Silently replace the old record (re-encoding the same file is routine).
    #[default]
    Replace,
    /// Keep the old record and fail.
    Reject,
}

/// Persistent store of identity records, keyed by video identifier.
///
/// Implementations must tolerate calls from more than one thread; writes for
/// the same key are serialized by the store.
pub trait SidecarStore: Send + Sync {
    /// Persist `video_id -> original_name`.
    fn record_identity(&self, video_id: &str, original_name: &str) -> Result<(), SidecarError>;

    /// Look up the original name recorded for `video_id`.
    ///
    /// # Errors
    /// `SidecarError::NotFound` when no record exists.
    fn resolve_identity(&self, video_id: &str) -> Result<String, SidecarError>;

    /// Drop the record for `video_id`. A missing record is not an error.
    fn forget_identity(&self, video_id: &str) -> Result<(), SidecarError>;
}

impl<T: SidecarStore + ?Sized> SidecarStore for Arc<T> {
    fn record_identity(&self, video_id: &str, original_name: &str) -> Result<(), SidecarError> {
        (**self).record_identity(video_id, original_name)
    }

    fn resolve_identity(&self, video_id: &str) -> Result<String, SidecarError> {
        (**self).resolve_identity(video_id)
    }

    fn forget_identity(&self, video_id: &str) -> Result<(), SidecarError> {
        (**self).forget_identity(video_id)
    }
}

/// Reject names that would escape the output directory or cannot be a file name.
pub fn validate_original_name(name: &str) -> Result<(), SidecarError> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);
    if bad {
        return Err(SidecarError::InvalidName(name.to_string()));
    }
    Ok(())
}

#[derive(Debug)]
pub enum SidecarError {
    NotFound { video_id: String },
    Exists { video_id: String },
    InvalidName(String),
    Io(io::Error),
}

impl fmt::Display for SidecarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SidecarError::NotFound { video_id } =>
                write!(f, "no sidecar record for '{}'", video_id),
            SidecarError::Exists { video_id } =>
                write!(f, "sidecar record for '{}' already exists", video_id),
            SidecarError::InvalidName(name) =>
                write!(f, "unusable original file name {:?}", name),
            SidecarError::Io(e) =>
                write!(f, "sidecar I/O error: {}", e),
        }
    }
}

impl std::error::Error for SidecarError {}

impl From<io::Error> for SidecarError {
    fn from(e: io::Error) -> Self {
        SidecarError::Io(e)
    }
}
