use std::path::PathBuf;

/// The primary error type for all operations in the `tarpack` crate.
#[derive(Debug)]
pub enum ArchiveError {
    /// An I/O error occurred, typically while reading a source file or writing
    /// to the output sink. Includes the path where the error happened.
    Io { source: std::io::Error, path: PathBuf },

    /// An error surfaced by the directory walk itself, such as a requested
    /// path that does not exist or a directory that cannot be traversed.
    Walk(walkdir::Error),

    /// An error occurred when trying to strip the root-directory prefix from a
    /// walked path while deriving an archive entry name.
    StripPrefix { prefix: PathBuf, path: PathBuf },
}

impl std::fmt::Display for ArchiveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArchiveError::Io { source, path } => {
                if path.as_os_str().is_empty() {
                    write!(f, "I/O error: {}", source)
                } else {
                    write!(f, "I/O error on path '{}': {}", path.display(), source)
                }
            }
            ArchiveError::Walk(e) => write!(f, "Walk error: {}", e),
            ArchiveError::StripPrefix { prefix, path } => write!(
                f,
                "Could not strip prefix '{}' from path '{}'",
                prefix.display(),
                path.display()
            ),
        }
    }
}

impl std::error::Error for ArchiveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ArchiveError::Io { source, .. } => Some(source),
            ArchiveError::Walk(e) => Some(e),
            _ => None,
        }
    }
}

impl From<walkdir::Error> for ArchiveError {
    fn from(err: walkdir::Error) -> Self {
        ArchiveError::Walk(err)
    }
}

// Generic IO error conversion that doesn't require a path
impl From<std::io::Error> for ArchiveError {
    fn from(err: std::io::Error) -> Self {
        ArchiveError::Io { source: err, path: PathBuf::new() }
    }
}
