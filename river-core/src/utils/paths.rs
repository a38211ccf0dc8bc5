//! XDG path resolution: the init script location and the control socket's
//! runtime directory.

use std::path::PathBuf;

use directories_next::BaseDirs;

use crate::error::RiverCoreError;

/// The `river` subdirectory of `$XDG_CONFIG_HOME` (or `~/.config`).
pub fn config_dir() -> Result<PathBuf, RiverCoreError> {
    BaseDirs::new()
        .map(|dirs| dirs.config_dir().join("river"))
        .ok_or_else(|| RiverCoreError::Fatal("could not determine config directory (no $HOME)".to_string()))
}

/// The default init script path: `$XDG_CONFIG_HOME/river/init`.
pub fn init_script_path() -> Result<PathBuf, RiverCoreError> {
    Ok(config_dir()?.join("init"))
}

/// The `river` subdirectory of `$XDG_RUNTIME_DIR`, where the control socket
/// is created. Fails if `$XDG_RUNTIME_DIR` is unset, since that's required
/// for the Wayland socket too.
pub fn runtime_dir() -> Result<PathBuf, RiverCoreError> {
    BaseDirs::new()
        .and_then(|dirs| dirs.runtime_dir().map(|dir| dir.join("river")))
        .ok_or_else(|| RiverCoreError::Fatal("$XDG_RUNTIME_DIR is not set".to_string()))
}
