use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::constants::dirs;
use crate::telemetry::TelemetrySnapshot;
use crate::types::BitreelError;

/// Top-level operating mode.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Encode,
    Decode,
}

impl Mode {
    /// Default `(input, output)` directories for this mode.
    pub fn default_dirs(self) -> (&'static str, &'static str) {
        match self {
            Mode::Encode => (dirs::INPUT_TEXT, dirs::OUTPUT_VIDEO),
            Mode::Decode => (dirs::INPUT_VIDEO, dirs::OUTPUT_TEXT),
        }
    }
}

impl FromStr for Mode {
    type Err = BitreelError;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("encode") {
            Ok(Mode::Encode)
        } else if trimmed.eq_ignore_ascii_case("decode") {
            Ok(Mode::Decode)
        } else {
            Err(BitreelError::InvalidMode(trimmed.to_string()))
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Encode => "encode",
            Mode::Decode => "decode",
        })
    }
}

/// Cooperative cancellation flag, checked before each file of a batch.
///
/// Clones share the flag, so one can be handed to a signal handler while the
/// batch holds another.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// `Err(Cancelled)` once [`cancel`](Self::cancel) has been called.
    pub fn check(&self) -> Result<(), BitreelError> {
        if self.is_cancelled() {
            return Err(BitreelError::Cancelled);
        }
        Ok(())
    }
}

/// Result of encoding one file.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct EncodeOutcome {
    pub src: PathBuf,
    pub video: PathBuf,
    /// Key of the sidecar record (the video file name).
    pub video_id: String,
    pub payload_bytes: usize,
    pub bits: usize,
    pub frames: usize,
}

/// Result of decoding one video.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DecodeOutcome {
    pub src: PathBuf,
    pub dst: PathBuf,
    pub original_name: String,
    pub payload_bytes: usize,
    pub bits: usize,
    pub frames: usize,
}

/// Terminal state of one batch entry.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Encoded(EncodeOutcome),
    Decoded(DecodeOutcome),
    Skipped { path: PathBuf, reason: String },
    Failed { path: PathBuf, error: String },
    /// The batch was cancelled before this file started.
    NotProcessed { path: PathBuf },
}

impl FileOutcome {
    pub fn path(&self) -> &PathBuf {
        match self {
            FileOutcome::Encoded(o) => &o.src,
            FileOutcome::Decoded(o) => &o.src,
            FileOutcome::Skipped { path, .. }
            | FileOutcome::Failed { path, .. }
            | FileOutcome::NotProcessed { path } => path,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FileOutcome::Encoded(_) | FileOutcome::Decoded(_))
    }
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileOutcome::Encoded(o) =>
                write!(f, "Processed {} -> {}", o.src.display(), o.video.display()),
            FileOutcome::Decoded(o) =>
                write!(f, "Processed {} -> {}", o.src.display(), o.dst.display()),
            FileOutcome::Skipped { path, reason } =>
                write!(f, "Skipped {}: {}", path.display(), reason),
            FileOutcome::Failed { path, error } =>
                write!(f, "Failed {}: {}", path.display(), error),
            FileOutcome::NotProcessed { path } =>
                write!(f, "Not processed {}: batch cancelled", path.display()),
        }
    }
}

/// Everything a batch did, one outcome per input in input order.
#[derive(Serialize, Debug, Clone)]
pub struct BatchReport {
    pub mode: Mode,
    pub outcomes: Vec<FileOutcome>,
    pub cancelled: bool,
    pub telemetry: TelemetrySnapshot,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.iter().filter(|o| matches!(o, FileOutcome::Skipped { .. })).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| matches!(o, FileOutcome::Failed { .. })).count()
    }

    pub fn not_processed(&self) -> usize {
        self.outcomes.iter().filter(|o| matches!(o, FileOutcome::NotProcessed { .. })).count()
    }
}
