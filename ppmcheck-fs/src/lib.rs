//! Filesystem abstraction for ppm-check.
//!
//! This crate provides:
//! - Filesystem trait for listing, reading and moving harness files
//! - Real and in-memory implementations
//! - Discovery of input/output files by extension

pub mod discovery;
pub mod filesystem;

pub use discovery::{discover, extension_of, file_stem, has_extension, replace_extension};
pub use filesystem::{Filesystem, FsError, MockFilesystem, RealFilesystem};
