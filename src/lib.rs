//! # tarpack Core Library
//!
//! This crate provides the core functionality for the `tarpack` archiver.
//!
//! It is designed to be used by the `tarpack` command-line application, but its
//! public API can also be used to programmatically pack directory trees into a
//! tar stream.
//!
//! ## Key Modules
//!
//! - [`archive`]: Walks the requested paths and writes the tar serialization.
//! - [`cli`]: Command-line argument parsing.
//! - [`diag`]: The injectable diagnostics sink used to report progress lines.

pub mod archive;
pub mod cli;
pub mod diag;
pub mod error;
pub use error::ArchiveError;
