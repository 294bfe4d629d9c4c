//! Filesystem helpers
//!
//! The service never creates anything on disk; these helpers exist to
//! validate the dataset path handed to us at startup.

use std::path::Path;

use log::debug;

/// Check if a path exists
pub fn path_exists(path: &str) -> bool {
    let exists = Path::new(path).exists();
    debug!("checked path {}: exists={}", path, exists);
    exists
}

/// Check if a path is a directory
pub fn is_directory(path: &str) -> bool {
    Path::new(path).is_dir()
}
