//! Main entry point for the tarpack CLI app

use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use tarpack::diag::TracingDiag;
use tarpack::{archive, cli};
use tracing_subscriber::EnvFilter;

fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run_app() {
        eprintln!("Error: {}", e);
        return std::process::ExitCode::FAILURE;
    }
    std::process::ExitCode::SUCCESS
}

fn run_app() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::run();

    let dest = File::create(&args.archive)?;
    let encoder = GzEncoder::new(dest, Compression::new(args.level));

    // The core hands the compression layer back once the end-of-archive
    // blocks are written; finishing it flushes the gzip trailer.
    let encoder = archive::write_archive(&args.root, &args.paths, encoder, &TracingDiag)?;
    encoder.finish()?;
    Ok(())
}
