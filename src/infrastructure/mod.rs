//! Platform integration.
//!
//! - [`paths`]: Data directory, config file location and `~` expansion

pub mod paths;

pub use paths::{expand_tilde, get_config_file, get_data_dir};
