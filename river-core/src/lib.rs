//! Ambient infrastructure for the River compositor binary: error types,
//! structured logging, and XDG path helpers. Domain logic (scene graph,
//! cursor state machine, seat focus, protocol glue) lives in the `river`
//! binary crate; this crate only carries what every subsystem needs.

pub mod error;
pub mod logging;
pub mod utils;

pub use error::{LoggingError, RiverCoreError};
pub use logging::{init_logging, init_minimal_logging, parse_log_scopes, LogScope, ScopeDirective};
pub use utils::{config_dir, ensure_directory_exists, init_script_path, read_file_to_string, runtime_dir};
