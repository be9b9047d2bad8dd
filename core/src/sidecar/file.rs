//! Directory-backed sidecar store.
//!
//! One plain-text file per video, named `<video file name>.<ext>`, holding
//! exactly the original file name. Records are written to a `.partial` file
//! and renamed into place so a crash never leaves a half-written record.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::constants::{DEFAULT_SIDECAR_EXTENSION, PARTIAL_SUFFIX};
use crate::sidecar::types::{validate_original_name, OverwritePolicy, SidecarError, SidecarStore};

#[derive(Debug)]
pub struct FileSidecarStore {
    dir: PathBuf,
    extension: String,
    policy: OverwritePolicy,
    // one writer at a time
    write_lock: Mutex<()>,
}

impl FileSidecarStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_options(dir, DEFAULT_SIDECAR_EXTENSION, OverwritePolicy::default())
    }

    pub fn with_options(dir: impl Into<PathBuf>, extension: &str, policy: OverwritePolicy) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.trim_start_matches('.').to_string(),
            policy,
            write_lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Location of the record for `video_id`.
    pub fn path_for(&self, video_id: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", video_id, self.extension))
    }
}

impl SidecarStore for FileSidecarStore {
    fn record_identity(&self, video_id: &str, original_name: &str) -> Result<(), SidecarError> {
        validate_original_name(original_name)?;

        let _guard = self.write_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let path = self.path_for(video_id);
        if self.policy == OverwritePolicy::Reject && path.exists() {
            return Err(SidecarError::Exists { video_id: video_id.to_string() });
        }

        fs::create_dir_all(&self.dir)?;
        let partial = path.with_extension(format!("{}.{}", self.extension, PARTIAL_SUFFIX));
        {
            let mut writer = BufWriter::new(File::create(&partial)?);
            writer.write_all(original_name.as_bytes())?;
            writer.flush()?;
        }
        fs::rename(&partial, &path)?;

        debug!(video_id, original_name, path = %path.display(), "sidecar recorded");
        Ok(())
    }

    fn resolve_identity(&self, video_id: &str) -> Result<String, SidecarError> {
        let path = self.path_for(video_id);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(SidecarError::NotFound { video_id: video_id.to_string() });
            }
            Err(e) => return Err(e.into()),
        };

        // hand-edited records may carry a line ending
        let name = raw.trim_end_matches(['\r', '\n']).to_string();
        validate_original_name(&name)?;
        Ok(name)
    }

    fn forget_identity(&self, video_id: &str) -> Result<(), SidecarError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let path = self.path_for(video_id);
        match fs::remove_file(&path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => {
                debug!(video_id, path = %path.display(), "sidecar removed");
                Ok(())
            }
        }
    }
}
