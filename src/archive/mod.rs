//! # Archive construction
//!
//! This module contains the core of `tarpack`: walking the requested paths in
//! a deterministic order and encoding each filesystem entry into the tar
//! stream.
//!
//! The walk is depth-first and pre-order (a directory is always emitted
//! strictly before its children) with siblings visited in lexicographic
//! filename order, so for a fixed tree and input list the output is
//! reproducible byte for byte. Symlinks are recorded, never followed.

use crate::diag::Diagnostics;
use crate::ArchiveError;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::Path;
use tar::Header;
use walkdir::WalkDir;

/// A writer responsible for encoding filesystem entries into a tar stream.
///
/// This struct wraps a [`tar::Builder`] over an arbitrary byte sink. The sink
/// is exclusively owned for the duration of the archive construction and is
/// handed back by [`finish`](ArchiveWriter::finish) once the end-of-archive
/// marker has been written.
pub struct ArchiveWriter<W: Write> {
    builder: tar::Builder<W>,
}

impl<W: Write> ArchiveWriter<W> {
    /// Creates a new `ArchiveWriter` over the given byte sink.
    pub fn new(sink: W) -> Self {
        Self { builder: tar::Builder::new(sink) }
    }

    /// Encodes one walked entry: derives its archive name relative to `root`,
    /// writes a header for it, and for regular files streams the content
    /// immediately after the header.
    ///
    /// Entries that are neither regular files, directories nor symlinks
    /// (fifos, sockets, devices) are skipped with a warning.
    fn append_entry(
        &mut self,
        root: &Path,
        entry: &walkdir::DirEntry,
        diag: &dyn Diagnostics,
    ) -> Result<(), ArchiveError> {
        let path = entry.path();
        // With follow_links disabled this is the symlink_metadata of the
        // entry, so symlinks classify as symlinks here.
        let meta = entry.metadata()?;
        let file_type = meta.file_type();

        let link_target = if file_type.is_symlink() {
            Some(fs::read_link(path).map_err(|source| ArchiveError::Io {
                source,
                path: path.to_path_buf(),
            })?)
        } else if !(file_type.is_file() || file_type.is_dir()) {
            diag.warn(&format!("ignoring non-regular path: {}", path.display()));
            return Ok(());
        } else {
            None
        };

        let name = entry_name(root, path, file_type.is_dir())?;
        diag.info(&format!("adding {}", name.to_string_lossy()));

        // Mode bits, mtime and size (zero for directories and symlinks) all
        // come from the metadata read above. If a file grows or shrinks
        // between this read and the content copy below, the header disagrees
        // with the body; that race is a known, accepted limitation.
        let mut header = Header::new_gnu();
        header.set_metadata(&meta);

        let io_err = |source| ArchiveError::Io { source, path: path.to_path_buf() };
        if let Some(target) = link_target {
            self.builder
                .append_link(&mut header, &name, &target)
                .map_err(io_err)?;
        } else if file_type.is_dir() {
            self.builder
                .append_data(&mut header, &name, io::empty())
                .map_err(io_err)?;
        } else {
            // The handle lives only for the duration of this copy and is
            // released on every exit path.
            let file = File::open(path).map_err(io_err)?;
            self.builder
                .append_data(&mut header, &name, BufReader::new(file))
                .map_err(io_err)?;
        }
        Ok(())
    }

    /// Finalizes the archive by writing the end-of-archive zero blocks.
    ///
    /// This method consumes the writer and must be called to produce a valid
    /// archive. Returns the underlying sink so the caller can finalize any
    /// compression layer wrapped around it.
    pub fn finish(self) -> Result<W, ArchiveError> {
        Ok(self.builder.into_inner()?)
    }
}

/// Walks every requested path under `root` and writes a tar serialization of
/// the visited entries to `sink`, returning the sink once the end-of-archive
/// marker has been written.
///
/// Each element of `paths` is joined to `root` and recursively descended,
/// parent before children, siblings in lexicographic order. Symlinks are
/// recorded with their literal targets and never expanded. A path listed
/// twice is walked, and its entries written, twice.
///
/// The first unrecoverable error (a path that does not exist, a directory
/// that cannot be traversed, a file that cannot be read, a sink write
/// failure) aborts the whole operation; bytes already written to the sink
/// must not be treated as a usable archive.
pub fn write_archive<W: Write>(
    root: &Path,
    paths: &[impl AsRef<Path>],
    sink: W,
    diag: &dyn Diagnostics,
) -> Result<W, ArchiveError> {
    let mut writer = ArchiveWriter::new(sink);
    for path in paths {
        let start = root.join(path.as_ref());
        for entry in WalkDir::new(&start).follow_links(false).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                diag.warn(&format!("error walking the path '{}': {}", start.display(), e));
                ArchiveError::Walk(e)
            })?;
            writer.append_entry(root, &entry, diag)?;
        }
    }
    writer.finish()
}

/// Derives the archive name for a walked path: the walk path with the
/// root-directory prefix stripped, and a trailing separator appended for
/// directories. No other normalization is performed; the filename bytes are
/// carried as-is, so names that are not valid UTF-8 survive unchanged.
fn entry_name(root: &Path, path: &Path, is_dir: bool) -> Result<OsString, ArchiveError> {
    let rel = path.strip_prefix(root).map_err(|_| ArchiveError::StripPrefix {
        prefix: root.to_path_buf(),
        path: path.to_path_buf(),
    })?;
    let mut name = rel.as_os_str().to_os_string();
    if is_dir {
        name.push("/");
    }
    Ok(name)
}
