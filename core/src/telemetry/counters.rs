//! telemetry/counters.rs
//! Mutable counters collected while a batch runs.

use serde::{Deserialize, Serialize};

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryCounters {
    pub files_encoded: u64,
    pub files_decoded: u64,
    pub files_skipped: u64,
    pub files_failed: u64,
    pub files_not_processed: u64,
    pub frames: u64,
    pub bits: u64,
    /// Source bytes read (encode) or recovered bytes written (decode).
    pub payload_bytes: u64,
}

impl TelemetryCounters {
    /// Record one encoded file.
    pub fn add_encoded(&mut self, payload_bytes: usize, bits: usize, frames: usize) {
        self.files_encoded += 1;
        self.payload_bytes += payload_bytes as u64;
        self.bits += bits as u64;
        self.frames += frames as u64;
    }

    /// Record one decoded file.
    pub fn add_decoded(&mut self, payload_bytes: usize, bits: usize, frames: usize) {
        self.files_decoded += 1;
        self.payload_bytes += payload_bytes as u64;
        self.bits += bits as u64;
        self.frames += frames as u64;
    }

    pub fn add_skipped(&mut self) {
        self.files_skipped += 1;
    }

    pub fn add_failed(&mut self) {
        self.files_failed += 1;
    }

    pub fn add_not_processed(&mut self, n: usize) {
        self.files_not_processed += n as u64;
    }

    /// Files that reached a terminal outcome of any kind.
    pub fn files_seen(&self) -> u64 {
        self.files_encoded
            + self.files_decoded
            + self.files_skipped
            + self.files_failed
            + self.files_not_processed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcomes_accumulate() {
        let mut a = TelemetryCounters::default();
        a.add_encoded(3, 24, 1);
        a.add_skipped();
        a.add_decoded(2, 16, 1);

        assert_eq!(a.files_encoded, 1);
        assert_eq!(a.files_decoded, 1);
        assert_eq!(a.files_skipped, 1);
        assert_eq!(a.frames, 2);
        assert_eq!(a.bits, 40);
        assert_eq!(a.payload_bytes, 5);
        assert_eq!(a.files_seen(), 3);
    }
}
