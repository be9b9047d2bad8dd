use std::collections::HashMap;
use std::sync::Mutex;

use crate::sidecar::types::{
    validate_original_name, OverwritePolicy, SidecarError, SidecarRecord, SidecarStore,
};

/// In-memory store, for tests and callers that persist records themselves.
#[derive(Debug, Default)]
pub struct MemorySidecarStore {
    records: Mutex<HashMap<String, String>>,
    policy: OverwritePolicy,
}

impl MemorySidecarStore {
    pub fn new(policy: OverwritePolicy) -> Self {
        Self { records: Mutex::new(HashMap::new()), policy }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Snapshot of every record, sorted by video id.
    pub fn records(&self) -> Vec<SidecarRecord> {
        let mut out: Vec<SidecarRecord> = self
            .lock()
            .iter()
            .map(|(video_id, original_name)| SidecarRecord {
                video_id: video_id.clone(),
                original_name: original_name.clone(),
            })
            .collect();
        out.sort_by(|a, b| a.video_id.cmp(&b.video_id));
        out
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SidecarStore for MemorySidecarStore {
    fn record_identity(&self, video_id: &str, original_name: &str) -> Result<(), SidecarError> {
        validate_original_name(original_name)?;
        let mut records = self.lock();
        if self.policy == OverwritePolicy::Reject && records.contains_key(video_id) {
            return Err(SidecarError::Exists { video_id: video_id.to_string() });
        }
        records.insert(video_id.to_string(), original_name.to_string());
        Ok(())
    }

    fn resolve_identity(&self, video_id: &str) -> Result<String, SidecarError> {
        self.lock()
            .get(video_id)
            .cloned()
            .ok_or_else(|| SidecarError::NotFound { video_id: video_id.to_string() })
    }

    fn forget_identity(&self, video_id: &str) -> Result<(), SidecarError> {
        self.lock().remove(video_id);
        Ok(())
    }
}
