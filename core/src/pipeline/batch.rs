//! pipeline/batch.rs
//! Sequential batch orchestration.
//!
//! One file is finished before the next starts. Per-file errors become
//! outcomes and never stop the batch; the cancel token is checked before each
//! file and the remaining inputs are reported as not processed.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::pipeline::codec::{is_partial, Codec};
use crate::pipeline::types::{BatchReport, CancelToken, FileOutcome, Mode};
use crate::telemetry::{TelemetryCounters, TelemetrySnapshot, TelemetryTimer};
use crate::types::BitreelError;

impl Codec {
    pub fn encode_batch(&self, inputs: &[PathBuf], out_dir: &Path, cancel: &CancelToken) -> BatchReport {
        self.run_batch(Mode::Encode, inputs, out_dir, cancel)
    }

    pub fn decode_batch(&self, inputs: &[PathBuf], out_dir: &Path, cancel: &CancelToken) -> BatchReport {
        self.run_batch(Mode::Decode, inputs, out_dir, cancel)
    }

    /// Dispatch on `mode`.
    pub fn run_batch(
        &self,
        mode: Mode,
        inputs: &[PathBuf],
        out_dir: &Path,
        cancel: &CancelToken,
    ) -> BatchReport {
        let mut counters = TelemetryCounters::default();
        let mut timer = TelemetryTimer::new();
        let mut outcomes = Vec::with_capacity(inputs.len());
        let mut cancelled = false;
        info!(%mode, files = inputs.len(), out_dir = %out_dir.display(), "batch started");

        for (index, path) in inputs.iter().enumerate() {
            if let Err(reason) = cancel.check() {
                let rest = &inputs[index..];
                warn!(remaining = rest.len(), %reason, "stopping batch");
                counters.add_not_processed(rest.len());
                outcomes.extend(rest.iter().map(|p| FileOutcome::NotProcessed { path: p.clone() }));
                cancelled = true;
                break;
            }

            let result = match mode {
                Mode::Encode => self
                    .encode_file_timed(path, out_dir, &mut timer)
                    .map(|o| {
                        counters.add_encoded(o.payload_bytes, o.bits, o.frames);
                        info!(src = %o.src.display(), dst = %o.video.display(), frames = o.frames, "encoded");
                        FileOutcome::Encoded(o)
                    }),
                Mode::Decode => self
                    .decode_video_timed(path, out_dir, &mut timer)
                    .map(|o| {
                        counters.add_decoded(o.payload_bytes, o.bits, o.frames);
                        info!(src = %o.src.display(), dst = %o.dst.display(), "decoded");
                        FileOutcome::Decoded(o)
                    }),
            };

            outcomes.push(match result {
                Ok(outcome) => outcome,
                Err(e) => failure_outcome(path, e, &mut counters),
            });
        }

        let telemetry = TelemetrySnapshot::from(&counters, &timer);
        info!(
            %mode,
            succeeded = counters.files_encoded + counters.files_decoded,
            skipped = counters.files_skipped,
            failed = counters.files_failed,
            not_processed = counters.files_not_processed,
            elapsed_ms = telemetry.elapsed_ms(),
            "batch finished"
        );

        BatchReport { mode, outcomes, cancelled, telemetry }
    }
}

fn failure_outcome(path: &Path, e: BitreelError, counters: &mut TelemetryCounters) -> FileOutcome {
    if e.is_skip() {
        warn!(path = %path.display(), reason = %e, "skipped");
        counters.add_skipped();
        FileOutcome::Skipped { path: path.to_path_buf(), reason: e.to_string() }
    } else {
        error!(path = %path.display(), error = %e, "failed");
        counters.add_failed();
        FileOutcome::Failed { path: path.to_path_buf(), error: e.to_string() }
    }
}

/// Regular files directly under `dir`, sorted by name.
///
/// With `extension`, only files ending in `.<extension>` (case-insensitive)
/// are kept, and in-progress videos are skipped. Without it every regular
/// file is listed, whatever its name.
pub fn collect_inputs(dir: &Path, extension: Option<&str>) -> io::Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        if let Some(want) = extension {
            let matches = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(want.trim_start_matches('.')));
            if !matches || is_partial(&path) {
                continue;
            }
        }
        out.push(path);
    }
    out.sort();
    Ok(out)
}
