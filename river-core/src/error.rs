//! Error types shared by the River compositor binary and its support modules.
//!
//! None of these are meant to unwind across a live protocol handler: every
//! `RiverCoreError` variant is either a fatal startup failure (exit 1) or a
//! logging/CLI/filesystem error surfaced before the event loop starts.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for ambient (non-domain) failures.
#[derive(Error, Debug)]
pub enum RiverCoreError {
    /// Logging could not be initialized (e.g. a global subscriber already set).
    #[error("failed to initialize logging: {0}")]
    Logging(#[from] LoggingError),

    /// The command line could not be parsed, or named a file that doesn't exist.
    #[error("usage error: {0}")]
    Usage(String),

    /// A directory or config file could not be read or created.
    #[error("{message}: {path}")]
    Io {
        message: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A fatal startup failure: display socket, backend, or envvar setup.
    #[error("fatal startup error: {0}")]
    Fatal(String),
}

/// Error type for logging initialization.
#[derive(Error, Debug)]
pub enum LoggingError {
    /// The global tracing subscriber was already set.
    #[error("global tracing subscriber already initialized: {0}")]
    AlreadyInitialized(String),

    /// A `-log-scopes` entry did not match the closed scope enumeration.
    #[error("unknown log scope: {0}")]
    UnknownScope(String),
}
