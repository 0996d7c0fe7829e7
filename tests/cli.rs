#![cfg(unix)]

use assert_cmd::prelude::*;
use flate2::read::GzDecoder;
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::{symlink, PermissionsExt};
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn write_file(path: &Path, content: &str, mode: u32) -> std::io::Result<()> {
    fs::write(path, content)?;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

#[test]
fn create_then_extract_reproduces_the_tree() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Setup: a source tree with files, permission bits and a symlink
    let source = tempdir()?;
    fs::create_dir(source.path().join("dir1"))?;
    fs::create_dir(source.path().join("dir2"))?;
    write_file(&source.path().join("dir1/a"), "content of dir1/a", 0o700)?;
    write_file(&source.path().join("dir1/b"), "content of dir1/b", 0o750)?;
    write_file(&source.path().join("dir2/c"), "content of dir2/c", 0o770)?;
    write_file(&source.path().join("dir2/d"), "content of dir2/d", 0o707)?;
    symlink("some/path", source.path().join("dir2/e"))?;

    let archive_dir = tempdir()?;
    let archive_path = archive_dir.path().join("backup.tar.gz");

    // 2. Create the archive
    let mut cmd = Command::cargo_bin("tarpack")?;
    cmd.arg(&archive_path)
        .arg("dir1")
        .arg("dir2")
        .arg("-C")
        .arg(source.path());
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("adding dir1/").and(predicate::str::contains("adding dir2/e")));

    assert!(archive_path.exists());

    // 3. Extract with a conformant tar reader and compare against the source
    let extract_dir = tempdir()?;
    let mut archive = tar::Archive::new(GzDecoder::new(fs::File::open(&archive_path)?));
    archive.set_preserve_permissions(true);
    archive.unpack(extract_dir.path())?;

    for (rel, content, mode) in [
        ("dir1/a", "content of dir1/a", 0o700),
        ("dir1/b", "content of dir1/b", 0o750),
        ("dir2/c", "content of dir2/c", 0o770),
        ("dir2/d", "content of dir2/d", 0o707),
    ] {
        let extracted = extract_dir.path().join(rel);
        assert_eq!(fs::read_to_string(&extracted)?, content);
        let bits = fs::metadata(&extracted)?.permissions().mode() & 0o777;
        assert_eq!(bits, mode, "mode mismatch for {}", rel);
    }

    let link = extract_dir.path().join("dir2/e");
    assert!(fs::symlink_metadata(&link)?.file_type().is_symlink());
    assert_eq!(fs::read_link(&link)?, Path::new("some/path"));
    Ok(())
}

#[test]
fn zero_path_arguments_is_a_usage_error() -> Result<(), Box<dyn std::error::Error>> {
    let archive_dir = tempdir()?;
    let archive_path = archive_dir.path().join("backup.tar.gz");

    let mut cmd = Command::cargo_bin("tarpack")?;
    cmd.arg(&archive_path);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("required arguments"));

    assert!(!archive_path.exists(), "no archive may be created on a usage error");
    Ok(())
}

#[test]
fn missing_input_path_fails_the_run() -> Result<(), Box<dyn std::error::Error>> {
    let source = tempdir()?;
    let archive_dir = tempdir()?;
    let archive_path = archive_dir.path().join("backup.tar.gz");

    let mut cmd = Command::cargo_bin("tarpack")?;
    cmd.arg(&archive_path)
        .arg("no-such-path")
        .arg("-C")
        .arg(source.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error").and(predicate::str::contains("no-such-path")));
    Ok(())
}
