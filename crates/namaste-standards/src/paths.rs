//! Terminology directory path resolution.

use std::path::PathBuf;

/// Environment variable for overriding the terminology directory.
pub const TERMINOLOGY_ENV_VAR: &str = "NAMASTE_TERMINOLOGY_DIR";

/// Get the terminology root directory.
///
/// Resolution order:
/// 1. `NAMASTE_TERMINOLOGY_DIR` environment variable
/// 2. `terminology/` directory relative to workspace root
///
/// # Example
///
/// ```rust,ignore
/// let root = namaste_standards::terminology_root();
/// let manifest = root.join("manifest.toml");
/// ```
pub fn terminology_root() -> PathBuf {
    if let Ok(root) = std::env::var(TERMINOLOGY_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../terminology")
}
