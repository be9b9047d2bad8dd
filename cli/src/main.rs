//! bitreel
//!
//! Batch front-end: encode every file in a directory into bitmap-frame videos,
//! or decode such videos back into the original files.

mod cli;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing::level_filters::LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .try_init();

    let args = cli::Args::parse();
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    cli::run(args, &mut stdin.lock(), &mut stdout.lock())
}
