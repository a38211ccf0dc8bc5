//! Top-level error type. Per-subsystem details live in `thiserror` enums
//! closer to the code that produces them (`domain::lock`, the Wayland glue
//! layer, etc.); `RiverError` only wraps the fatal startup failures that
//! warrant exiting the process.

use std::io;
use thiserror::Error;

use river_core::RiverCoreError;

/// Errors that abort the process. Everything else (allocation failure,
/// protocol misuse, duplicate/orphan events, constraint rejection,
/// hot-unplug) is handled at the point of occurrence and never surfaces
/// here.
#[derive(Error, Debug)]
pub enum RiverError {
    #[error("failed to create the Wayland display socket: {0}")]
    DisplaySocket(#[source] io::Error),

    #[error("failed to start the input backend: {0}")]
    BackendStart(String),

    #[error(transparent)]
    Core(#[from] RiverCoreError),
}
