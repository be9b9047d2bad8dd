use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use bitreel_core::prelude::*;
use clap::{Parser, ValueEnum};

pub const PROMPT: &str =
    "Do you want to encode text to binary video or decode binary video to text? (encode/decode): ";
pub const INVALID_MODE: &str = "Invalid option. Please type 'encode' or 'decode'.";

#[derive(Parser, Debug)]
#[command(name = "bitreel", version, about, long_about = None)]
pub struct Args {
    /// `encode` or `decode`; asked for interactively when omitted.
    pub mode: Option<String>,

    /// Defaults to `input_text` (encode) or `input_video` (decode).
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Defaults to `output_video` (encode) or `output_text` (decode).
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Where identity records live. Defaults to the video directory.
    #[arg(long)]
    pub sidecar_dir: Option<PathBuf>,

    /// JSON codec configuration; unspecified fields keep their defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub backend: Option<BackendArg>,

    /// Frame worker threads (0 = one per CPU).
    #[arg(long)]
    pub workers: Option<usize>,

    /// Also write the batch report as JSON to this path.
    #[arg(long)]
    pub report_json: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendArg {
    Y4m,
    Ffmpeg,
}

/// Resolved directories for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dirs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub sidecar: PathBuf,
}

impl Dirs {
    pub fn resolve(mode: Mode, args: &Args) -> Self {
        let (default_in, default_out) = mode.default_dirs();
        let input = args.input_dir.clone().unwrap_or_else(|| default_in.into());
        let output = args.output_dir.clone().unwrap_or_else(|| default_out.into());
        let video_dir = match mode {
            Mode::Encode => output.clone(),
            Mode::Decode => input.clone(),
        };
        let sidecar = args.sidecar_dir.clone().unwrap_or(video_dir);
        Self { input, output, sidecar }
    }
}

/// `--config` file (or defaults) with command line overrides applied.
pub fn load_config(args: &Args) -> anyhow::Result<CodecConfig> {
    let mut config = match &args.config {
        Some(path) => CodecConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => CodecConfig::default(),
    };

    match args.backend {
        Some(BackendArg::Y4m) => config.backend = BackendConfig::Y4m,
        // keep codec/container from the file when it already picked ffmpeg
        Some(BackendArg::Ffmpeg) if !matches!(config.backend, BackendConfig::Ffmpeg { .. }) => {
            config.backend = BackendConfig::ffmpeg();
        }
        _ => {}
    }
    if let Some(workers) = args.workers {
        config.workers = workers;
    }

    config.validate()?;
    Ok(config)
}

/// Mode from the argument, or from one line of `input` after printing the prompt.
fn read_mode(
    arg: Option<&str>,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> anyhow::Result<Result<Mode, BitreelError>> {
    let raw = match arg {
        Some(s) => s.to_string(),
        None => {
            write!(out, "{}", PROMPT)?;
            out.flush()?;
            let mut line = String::new();
            input.read_line(&mut line)?;
            line
        }
    };
    Ok(raw.parse::<Mode>())
}

pub fn run(args: Args, input: &mut impl BufRead, out: &mut impl Write) -> anyhow::Result<()> {
    let mode = match read_mode(args.mode.as_deref(), input, out)? {
        Ok(mode) => mode,
        Err(e) => {
            tracing::error!(error = %e, "mode rejected");
            writeln!(out, "{}", INVALID_MODE)?;
            return Ok(());
        }
    };

    let config = load_config(&args)?;
    let dirs = Dirs::resolve(mode, &args);
    for dir in [&dirs.input, &dirs.output, &dirs.sidecar] {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let codec = Codec::with_sidecar_dir(config, &dirs.sidecar)?;
    let filter = match mode {
        Mode::Encode => None,
        Mode::Decode => Some(codec.video().extension().to_string()),
    };
    let inputs = collect_inputs(&dirs.input, filter.as_deref())
        .with_context(|| format!("listing {}", dirs.input.display()))?;

    let report = codec.run_batch(mode, &inputs, &dirs.output, &CancelToken::new());
    print_report(&report, out)?;

    if let Some(path) = &args.report_json {
        write_report_json(&report, path)?;
    }
    Ok(())
}

pub fn print_report(report: &BatchReport, out: &mut impl Write) -> anyhow::Result<()> {
    for outcome in &report.outcomes {
        writeln!(out, "{}", outcome)?;
    }
    writeln!(
        out,
        "{}: {} processed, {} skipped, {} failed in {:.1} ms",
        report.mode,
        report.succeeded(),
        report.skipped(),
        report.failed(),
        report.telemetry.elapsed_ms(),
    )?;
    Ok(())
}

fn write_report_json(report: &BatchReport, path: &Path) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json).with_context(|| format!("writing report {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_in(dir: &Path, mode: Option<&str>) -> Args {
        let mut args = Args::parse_from(["bitreel"]);
        args.mode = mode.map(str::to_string);
        args.input_dir = Some(dir.join("in"));
        args.output_dir = Some(dir.join("out"));
        args.sidecar_dir = Some(dir.join("meta"));
        args
    }

    #[test]
    fn prompts_when_mode_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let mut input: &[u8] = b"  Encode \n";
        let mut out = Vec::new();
        run(args_in(dir.path(), None), &mut input, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with(PROMPT));
        assert!(text.contains("encode: 0 processed"));
        assert!(dir.path().join("in").is_dir());
    }

    #[test]
    fn invalid_mode_processes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut input: &[u8] = b"";
        let mut out = Vec::new();
        run(args_in(dir.path(), Some("transcode")), &mut input, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap().trim_end(), INVALID_MODE);
        assert!(!dir.path().join("in").exists());
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn encode_then_decode_through_directories() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("text")).unwrap();
        fs::write(root.join("text/a.bin"), b"AB\x00").unwrap();
        fs::write(root.join("text/b.txt"), "hello").unwrap();

        let mut encode = Args::parse_from(["bitreel", "encode"]);
        encode.input_dir = Some(root.join("text"));
        encode.output_dir = Some(root.join("videos"));
        let mut out = Vec::new();
        run(encode, &mut &b""[..], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("encode: 2 processed, 0 skipped, 0 failed"), "{}", text);
        assert!(root.join("videos/a.bin_video.y4m").is_file());
        assert!(root.join("videos/a.bin_video.y4m.meta").is_file());

        let mut decode = Args::parse_from(["bitreel", "decode"]);
        decode.input_dir = Some(root.join("videos"));
        decode.output_dir = Some(root.join("restored"));
        decode.report_json = Some(root.join("report.json"));
        let mut out = Vec::new();
        run(decode, &mut &b""[..], &mut out).unwrap();

        assert_eq!(fs::read(root.join("restored/a.bin")).unwrap(), b"AB\x00");
        assert_eq!(fs::read(root.join("restored/b.txt")).unwrap(), b"hello");
        let report: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(root.join("report.json")).unwrap()).unwrap();
        assert_eq!(report["telemetry"]["counters"]["files_decoded"], 2);
    }

    #[test]
    fn backend_flag_overrides_config() {
        let mut args = Args::parse_from(["bitreel", "--backend", "ffmpeg", "--workers", "3"]);
        args.config = None;
        let config = load_config(&args).unwrap();
        assert_eq!(config.backend.container_extension(), "mkv");
        assert_eq!(config.workers, 3);
    }

    #[test]
    fn default_sidecar_dir_is_the_video_dir() {
        let args = Args::parse_from(["bitreel"]);
        assert_eq!(Dirs::resolve(Mode::Encode, &args).sidecar, PathBuf::from("output_video"));
        assert_eq!(Dirs::resolve(Mode::Decode, &args).sidecar, PathBuf::from("input_video"));
    }
}
