use std::path::PathBuf;

/// Returns the root mailform directory path.
///
/// Resolution order:
/// 1. `MAILFORM_ROOT` environment variable (if set)
/// 2. Current working directory + `.mailform`
pub fn mailform_root() -> PathBuf {
    if let Ok(root) = std::env::var("MAILFORM_ROOT") {
        PathBuf::from(root)
    } else {
        PathBuf::from(".mailform")
    }
}

/// Returns the path to the config file.
pub fn config_path() -> PathBuf {
    mailform_root().join("config.yaml")
}
