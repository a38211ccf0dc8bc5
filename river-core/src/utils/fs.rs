//! Filesystem helpers used during startup: creating the runtime directory
//! for the control socket, and reading the user's init script.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::RiverCoreError;

/// Ensures that a directory exists at the given path, creating it (and its
/// parents) if necessary.
pub fn ensure_directory_exists<P: AsRef<Path>>(path: P) -> Result<(), RiverCoreError> {
    let path_ref = path.as_ref();

    if !path_ref.exists() {
        fs::create_dir_all(path_ref).map_err(|e| RiverCoreError::Io {
            message: "failed to create directory".to_string(),
            path: path_ref.to_path_buf(),
            source: e,
        })?;
    } else if !path_ref.is_dir() {
        return Err(RiverCoreError::Io {
            message: "path exists but is not a directory".to_string(),
            path: path_ref.to_path_buf(),
            source: io::Error::new(io::ErrorKind::AlreadyExists, "not a directory"),
        });
    }

    Ok(())
}

/// Reads the entire contents of a file into a string.
pub fn read_file_to_string<P: AsRef<Path>>(path: P) -> Result<String, RiverCoreError> {
    let path_ref = path.as_ref();

    fs::read_to_string(path_ref).map_err(|e| RiverCoreError::Io {
        message: "failed to read file".to_string(),
        path: path_ref.to_path_buf(),
        source: e,
    })
}
