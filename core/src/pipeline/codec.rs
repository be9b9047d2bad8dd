//! pipeline/codec.rs
//! Per-file encode and decode.
//!
//! Encode: read -> text -> framing -> pack -> render -> write video -> record identity.
//! Decode: resolve identity -> read frames -> parse -> unpack -> text -> write file.
//!
//! Outputs go to an in-progress path first and are moved into place only after
//! every step succeeded; on failure the in-progress output is removed.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::CodecConfig;
use crate::constants::PARTIAL_SUFFIX;
use crate::frame::{parse_frame_sequence_par, render_frames_par, Frame};
use crate::pipeline::payload::{decode_payload_bits, encode_payload_bits};
use crate::pipeline::types::{DecodeOutcome, EncodeOutcome};
use crate::sidecar::{FileSidecarStore, SidecarStore};
use crate::telemetry::{Stage, TelemetryTimer};
use crate::types::BitreelError;
use crate::video::VideoBackend;

/// Configuration plus the two collaborators every file goes through.
pub struct Codec {
    config: CodecConfig,
    video: Box<dyn VideoBackend>,
    sidecars: Box<dyn SidecarStore>,
}

impl Codec {
    /// Validates `config` up front so no file is touched with a bad one.
    pub fn new(
        config: CodecConfig,
        video: Box<dyn VideoBackend>,
        sidecars: Box<dyn SidecarStore>,
    ) -> Result<Self, BitreelError> {
        config.validate()?;
        Ok(Self { config, video, sidecars })
    }

    /// Backend from `config.backend`, sidecar records as files in `sidecar_dir`.
    pub fn with_sidecar_dir(config: CodecConfig, sidecar_dir: impl Into<PathBuf>) -> Result<Self, BitreelError> {
        let video = config.backend.build();
        let sidecars = FileSidecarStore::with_options(
            sidecar_dir,
            &config.sidecar_extension,
            config.overwrite,
        );
        Self::new(config, video, Box::new(sidecars))
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn video(&self) -> &dyn VideoBackend {
        self.video.as_ref()
    }

    pub fn sidecars(&self) -> &dyn SidecarStore {
        self.sidecars.as_ref()
    }

    /// Video file name for a source file name: `<name><suffix>.<ext>`.
    pub fn video_name(&self, original_name: &str) -> String {
        format!("{}{}.{}", original_name, self.config.video_suffix, self.video.extension())
    }

    pub fn encode_file(&self, path: &Path, out_dir: &Path) -> Result<EncodeOutcome, BitreelError> {
        self.encode_file_timed(path, out_dir, &mut TelemetryTimer::new())
    }

    pub fn decode_video(&self, path: &Path, out_dir: &Path) -> Result<DecodeOutcome, BitreelError> {
        self.decode_video_timed(path, out_dir, &mut TelemetryTimer::new())
    }

    pub(crate) fn encode_file_timed(
        &self,
        path: &Path,
        out_dir: &Path,
        timer: &mut TelemetryTimer,
    ) -> Result<EncodeOutcome, BitreelError> {
        let original_name = file_name(path)?;
        let cfg = &self.config;
        let geometry = cfg.geometry();

        let bytes = timer.time(Stage::Read, || fs::read(path))?;
        let bits = timer.time(Stage::Pack, || encode_payload_bits(&bytes, cfg.framing, cfg.alphabet))?;
        let frames = timer.time(Stage::Render, || render_frames_par(&bits, geometry, cfg.workers))?;
        debug!(src = %path.display(), bits = bits.len(), frames = frames.len(), %geometry, "frames rendered");

        fs::create_dir_all(out_dir)?;
        let video_id = self.video_name(original_name);
        let video_path = out_dir.join(&video_id);
        let partial = partial_video_path(&video_path, self.video.extension());

        let staged = self.stage_video(&partial, &video_path, &video_id, original_name, &frames, timer);
        if let Err(e) = staged {
            if let Err(cleanup) = self.video.discard(&partial) {
                warn!(path = %partial.display(), error = %cleanup, "could not remove partial video");
            }
            return Err(e);
        }

        Ok(EncodeOutcome {
            src: path.to_path_buf(),
            video: video_path,
            video_id,
            payload_bytes: bytes.len(),
            bits: bits.len(),
            frames: frames.len(),
        })
    }

    /// Write to `partial`, record the identity, then move the video into place.
    ///
    /// A record created here is dropped again when the move fails, so no
    /// record outlives a video that never landed.
    fn stage_video(
        &self,
        partial: &Path,
        video_path: &Path,
        video_id: &str,
        original_name: &str,
        frames: &[Frame],
        timer: &mut TelemetryTimer,
    ) -> Result<(), BitreelError> {
        let cfg = &self.config;
        timer.time(Stage::Write, || self.video.write_video(partial, cfg.geometry(), frames, cfg.fps))?;
        let had_record = self.sidecars.resolve_identity(video_id).is_ok();
        timer.time(Stage::Sidecar, || self.sidecars.record_identity(video_id, original_name))?;
        if let Err(e) = self.video.commit(partial, video_path) {
            if !had_record {
                if let Err(cleanup) = self.sidecars.forget_identity(video_id) {
                    warn!(video_id, error = %cleanup, "could not remove sidecar record");
                }
            }
            return Err(e.into());
        }
        Ok(())
    }

    pub(crate) fn decode_video_timed(
        &self,
        path: &Path,
        out_dir: &Path,
        timer: &mut TelemetryTimer,
    ) -> Result<DecodeOutcome, BitreelError> {
        let video_id = file_name(path)?;
        let cfg = &self.config;

        // a missing record means skip, before any video work
        let original_name = timer.time(Stage::Sidecar, || self.sidecars.resolve_identity(video_id))?;

        let frames = timer.time(Stage::Read, || self.video.read_frames(path, cfg.geometry()))?;
        let bits = timer.time(Stage::Parse, || parse_frame_sequence_par(&frames, cfg.threshold, cfg.workers))?;
        let bytes = timer.time(Stage::Unpack, || decode_payload_bits(&bits, cfg.alphabet))?;
        debug!(src = %path.display(), bits = bits.len(), frames = frames.len(), bytes = bytes.len(), "payload recovered");

        fs::create_dir_all(out_dir)?;
        let dst = out_dir.join(&original_name);
        timer.time(Stage::Write, || write_atomically(&dst, &bytes))?;

        Ok(DecodeOutcome {
            src: path.to_path_buf(),
            dst,
            original_name,
            payload_bytes: bytes.len(),
            bits: bits.len(),
            frames: frames.len(),
        })
    }
}

impl std::fmt::Debug for Codec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Codec")
            .field("config", &self.config)
            .field("extension", &self.video.extension())
            .finish_non_exhaustive()
    }
}

fn file_name(path: &Path) -> Result<&str, BitreelError> {
    path.file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| BitreelError::BadPath(path.to_path_buf()))
}

/// `<stem>.partial.<ext>`: keeps the container extension last so tools that
/// pick the format from the extension still work.
pub fn partial_video_path(video_path: &Path, extension: &str) -> PathBuf {
    video_path.with_extension(format!("{}.{}", PARTIAL_SUFFIX, extension))
}

/// Whether `path` looks like an in-progress output: `<name>.partial` or
/// `<stem>.partial.<ext>`.
pub fn is_partial(path: &Path) -> bool {
    let marker = format!(".{}", PARTIAL_SUFFIX);
    let ends_with_marker = |s: Option<&std::ffi::OsStr>| {
        s.and_then(|s| s.to_str()).is_some_and(|s| s.ends_with(&marker))
    };
    ends_with_marker(path.file_name()) || ends_with_marker(path.file_stem())
}

fn write_atomically(dst: &Path, bytes: &[u8]) -> Result<(), BitreelError> {
    let mut partial = dst.as_os_str().to_owned();
    partial.push(format!(".{}", PARTIAL_SUFFIX));
    let partial = PathBuf::from(partial);

    let written = (|| -> std::io::Result<()> {
        let mut w = BufWriter::new(File::create(&partial)?);
        w.write_all(bytes)?;
        w.flush()?;
        drop(w);
        fs::rename(&partial, dst)
    })();
    if let Err(e) = written {
        let _ = fs::remove_file(&partial);
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_path_keeps_extension_last() {
        let p = partial_video_path(Path::new("out/notes.txt_video.y4m"), "y4m");
        assert_eq!(p, Path::new("out/notes.txt_video.partial.y4m"));
        assert!(is_partial(&p));
        assert!(!is_partial(Path::new("out/notes.txt_video.y4m")));
        assert!(is_partial(Path::new("out/notes.txt.partial")));
        assert!(!is_partial(Path::new("out/notes.partial.md_video.y4m")));
    }
}
