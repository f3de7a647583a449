//! Async convenience helpers around the filesystem.
//!
//! Two error policies coexist. Probes and reads ([`path_exists`],
//! [`read_text_file`], [`read_json_file`]) never fail: anything that goes wrong
//! reads as `false` or `None`. Everything that mutates the filesystem or walks
//! it returns a [`Result`] carrying an [`FsError`].

mod dir;
mod error;
mod file;
mod json;
mod scan;

pub use dir::{ensure_directory, path_exists};
pub use error::{FsError, Result};
pub use file::{copy_file, read_text_file, write_text_file};
pub use json::{read_json_file, write_json_file};
pub use scan::{ExtensionSet, scan_files_by_extension};
