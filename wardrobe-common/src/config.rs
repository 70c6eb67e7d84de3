//! Configuration loading and root folder resolution
//!
//! The root folder holds everything the service owns: the `wardrobe/` image
//! directory and the SQLite database. Resolution priority:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (`WARDROBE_ROOT_FOLDER`)
//! 3. TOML config file (`root_folder` key)
//! 4. OS-dependent compiled default (fallback)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable consulted for the root folder
pub const ROOT_FOLDER_ENV: &str = "WARDROBE_ROOT_FOLDER";

/// Optional TOML configuration file contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Root folder override
    pub root_folder: Option<String>,
}

/// Resolve the root folder following the documented priority order
pub fn resolve_root_folder(cli_arg: Option<&str>) -> Result<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Ok(PathBuf::from(path));
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    // Priority 3: TOML config file
    if let Some(config) = load_config_file()? {
        if let Some(root_folder) = config.root_folder {
            return Ok(PathBuf::from(root_folder));
        }
    }

    // Priority 4: OS-dependent compiled default
    Ok(default_root_folder())
}

/// Load the TOML config file if one exists
///
/// A missing file is not an error (defaults apply); an unreadable or
/// malformed file is.
pub fn load_config_file() -> Result<Option<TomlConfig>> {
    let Some(path) = config_file_path() else {
        return Ok(None);
    };
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("Read config failed ({}): {}", path.display(), e)))?;
    let config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse config failed ({}): {}", path.display(), e)))?;
    Ok(Some(config))
}

/// Platform config file location (`<config dir>/wardrobe/config.toml`)
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("wardrobe").join("config.toml"))
}

/// OS-dependent default root folder
pub fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/wardrobe
        dirs::data_local_dir()
            .map(|d| d.join("wardrobe"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/wardrobe"))
    } else if cfg!(target_os = "macos") {
        // ~/Library/Application Support/wardrobe
        dirs::data_dir()
            .map(|d| d.join("wardrobe"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/wardrobe"))
    } else if cfg!(target_os = "windows") {
        // %LOCALAPPDATA%\wardrobe
        dirs::data_local_dir()
            .map(|d| d.join("wardrobe"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\wardrobe"))
    } else {
        PathBuf::from("./wardrobe_data")
    }
}
