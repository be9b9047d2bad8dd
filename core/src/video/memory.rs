use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::frame::{Frame, FrameGeometry};
use crate::video::types::{VideoError, VideoSink, VideoSource};

/// Stored clip: frames plus the rate they were written at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryClip {
    pub geometry: FrameGeometry,
    pub frames: Vec<Frame>,
    pub fps: u32,
}

/// Keeps "videos" in a map keyed by path. Nothing touches the filesystem.
#[derive(Debug)]
pub struct MemoryVideo {
    extension: String,
    clips: Mutex<HashMap<PathBuf, MemoryClip>>,
}

impl Default for MemoryVideo {
    fn default() -> Self {
        Self::new("mem")
    }
}

impl MemoryVideo {
    pub fn new(extension: &str) -> Self {
        Self {
            extension: extension.trim_start_matches('.').to_string(),
            clips: Mutex::new(HashMap::new()),
        }
    }

    pub fn insert(&self, path: impl Into<PathBuf>, clip: MemoryClip) {
        self.lock().insert(path.into(), clip);
    }

    pub fn get(&self, path: &Path) -> Option<MemoryClip> {
        self.lock().get(path).cloned()
    }

    /// Apply `f` to the stored frames, e.g. to simulate container drift.
    pub fn modify<F: FnOnce(&mut Vec<Frame>)>(&self, path: &Path, f: F) -> bool {
        match self.lock().get_mut(path) {
            Some(clip) => {
                f(&mut clip.frames);
                true
            }
            None => false,
        }
    }

    /// Stored paths, sorted.
    pub fn paths(&self) -> Vec<PathBuf> {
        let mut out: Vec<PathBuf> = self.lock().keys().cloned().collect();
        out.sort();
        out
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<PathBuf, MemoryClip>> {
        self.clips.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl VideoSink for MemoryVideo {
    fn extension(&self) -> &str {
        &self.extension
    }

    fn write_video(
        &self,
        path: &Path,
        geometry: FrameGeometry,
        frames: &[Frame],
        fps: u32,
    ) -> Result<(), VideoError> {
        if let Some(bad) = frames.iter().find(|f| f.geometry() != geometry) {
            return Err(VideoError::GeometryMismatch { expected: geometry, actual: bad.geometry() });
        }
        self.insert(path, MemoryClip { geometry, frames: frames.to_vec(), fps });
        Ok(())
    }

    fn commit(&self, partial: &Path, path: &Path) -> Result<(), VideoError> {
        let mut clips = self.lock();
        let clip = clips
            .remove(partial)
            .ok_or_else(|| VideoError::NotFound(partial.display().to_string()))?;
        clips.insert(path.to_path_buf(), clip);
        Ok(())
    }

    fn discard(&self, partial: &Path) -> Result<(), VideoError> {
        self.lock().remove(partial);
        Ok(())
    }
}

impl VideoSource for MemoryVideo {
    fn read_frames(&self, path: &Path, geometry: FrameGeometry) -> Result<Vec<Frame>, VideoError> {
        let clip = self
            .get(path)
            .ok_or_else(|| VideoError::NotFound(path.display().to_string()))?;
        if clip.geometry != geometry {
            return Err(VideoError::GeometryMismatch { expected: geometry, actual: clip.geometry });
        }
        Ok(clip.frames)
    }
}
