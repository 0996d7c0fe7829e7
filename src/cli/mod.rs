use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// The path for the output archive file (e.g., backup.tar.gz).
    pub archive: PathBuf,

    /// One or more paths, relative to the root directory, to add to the archive.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// The directory the archived paths are resolved against; archive entry
    /// names are recorded relative to it.
    #[arg(short = 'C', long = "directory", default_value = ".")]
    pub root: PathBuf,

    /// Gzip compression level (0-9). Higher levels offer better compression at the cost of speed.
    #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(u32).range(0..=9))]
    pub level: u32,
}

/// Parses command-line arguments using `clap`.
///
/// This is the main entry point for the CLI logic. Zero path arguments is a
/// usage error reported by `clap` before any archive work starts.
pub fn run() -> Args {
    Args::parse()
}
