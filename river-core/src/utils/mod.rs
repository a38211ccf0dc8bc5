//! Small utility submodules shared by the binary crate.

pub mod fs;
pub mod paths;

pub use fs::{ensure_directory_exists, read_file_to_string};
pub use paths::{config_dir, init_script_path, runtime_dir};
