//! Platform-specific configuration paths.

use crate::constants::APP_NAME;
use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Name of the configuration file inside the config directory.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Get the configuration directory for the current platform.
///
/// - Linux: `~/.config/urbansas-filter/`
/// - macOS: `~/Library/Application Support/urbansas-filter/`
/// - Windows: `%APPDATA%\urbansas-filter\`
pub fn config_dir() -> Result<PathBuf> {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or(Error::ConfigDirNotFound)
}

/// Get the config file path, preferring an explicit `--config` path.
pub fn config_file_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(config_dir()?.join(CONFIG_FILE_NAME)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir_names_app() {
        let path = config_dir().unwrap();
        assert!(path.to_string_lossy().contains(APP_NAME));
    }

    #[test]
    fn test_default_config_file_path_ends_with_toml() {
        let path = config_file_path(None).unwrap();
        assert!(path.to_string_lossy().ends_with(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_explicit_config_file_path_wins() {
        let path = config_file_path(Some(Path::new("/tmp/custom.toml"))).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/custom.toml"));
    }
}
