/// Data directory resolution.
use std::path::{Path, PathBuf};

/// Environment variable that overrides every other data directory source.
pub const DATA_DIR_ENV: &str = "PALLET_LOG_DATA_DIR";

/// Resolves the directory holding the delivery database.
///
/// Resolution order:
/// 1. `PALLET_LOG_DATA_DIR` environment variable
/// 2. `configured` (the config file's `data_dir`), if non-empty
/// 3. The platform data directory joined with `pallet-log`
/// 4. `.data/` directory next to the executable
pub fn resolve_data_dir(configured: &str) -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    if !configured.trim().is_empty() {
        return PathBuf::from(configured.trim());
    }
    if let Some(dir) = dirs::data_dir() {
        return dir.join("pallet-log");
    }
    let exe = std::env::current_exe().unwrap_or_else(|_| PathBuf::from("."));
    exe.parent().unwrap_or(Path::new(".")).join(".data")
}
