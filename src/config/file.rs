//
//  labctl
//  config/file.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration File I/O Module
//!
//! Low-level file operations used by [`ConfigStore`](super::ConfigStore).
//! These functions only move bytes; validation and (de)serialization live in
//! the parent module.
//!
//! ## Notes
//!
//! - All functions accept `&Path` to support both `Path` and `PathBuf`
//! - Writes create parent directories and replace the target in one rename
//! - Each write stages its own temporary file via `tempfile`, so concurrent
//!   saves never share a half-written file
//! - On Unix the written file is readable by its owner only from the moment
//!   it is created, since it holds an API token

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Reads the contents of a configuration file.
///
/// A thin wrapper around [`std::fs::read_to_string`]. The error kind is left
/// untouched so callers can tell a missing file (`NotFound`) apart from an
/// unreadable one.
pub fn read_config_file(path: &Path) -> io::Result<String> {
    fs::read_to_string(path)
}

/// Writes content to a configuration file, replacing any previous file whole.
///
/// The content is first written to a uniquely named temporary file in the
/// same directory, which is then renamed over `path`. A reader therefore sees
/// either the old file or the new one, never a half-written mix, and
/// concurrent writers each stage their own file so the last rename wins.
/// Parent directories are created when missing.
///
/// # Parameters
///
/// * `path` - The path where the configuration file should be written
/// * `content` - The content to write to the file
///
/// # Errors
///
/// Returns an error if:
/// - Parent directories cannot be created (permissions, invalid path)
/// - The temporary file cannot be created or written
/// - The rename onto `path` fails
///
/// # Example
///
/// ```rust,ignore
/// use std::path::Path;
/// use labctl::config::write_config_file;
///
/// write_config_file(Path::new("/tmp/labctl/Configuration.toml"), "token = \"abc\"\n")?;
/// ```
pub fn write_config_file(path: &Path, content: &str) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    // Created with mode 0600 on unix, before any content is written.
    let mut staging = NamedTempFile::new_in(parent)?;
    staging.write_all(content.as_bytes())?;
    staging.as_file().sync_all()?;

    // On failure the staging file is dropped, which removes it.
    staging.persist(path).map_err(|err| err.error)?;
    Ok(())
}

/// Checks if a configuration file exists.
///
/// Returns `false` for paths that exist but are directories.
pub fn config_exists(path: &Path) -> bool {
    path.is_file()
}
