//! Climate API Core Library
//!
//! Shared utilities for the climate query service:
//! - Configuration loading (XDG-compliant)
//! - File system helpers

mod config;
pub mod fs;

pub use config::{find_config_file, load_config, ConfigSource};
pub use fs::{is_directory, path_exists};

/// Application name used for XDG paths
pub const APP_NAME: &str = "climate-api";

/// Default port the API listens on
pub const DEFAULT_API_PORT: u16 = 5000;
