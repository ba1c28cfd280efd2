//! Configuration file discovery and loading

use super::CompilerConfig;
use crate::error::CartoError;
use crate::result::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names, in priority order
const CONFIG_FILE_NAMES: &[&str] = &[".cartorc.toml", ".cartorc.json", "carto.toml", "carto.json"];

/// Configuration loader for discovering and loading config files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Auto-discover a config file by traversing upward from `start_path`
    ///
    /// Searches each directory for the names in [`CONFIG_FILE_NAMES`] order and
    /// stops at the first hit or at the filesystem root.
    pub fn auto_discover(start_path: &Path) -> Result<Option<PathBuf>> {
        let mut current = start_path
            .canonicalize()
            .map_err(|e| CartoError::config_error(format!("Invalid path: {e}")))?;

        loop {
            for filename in CONFIG_FILE_NAMES {
                let config_path = current.join(filename);
                if config_path.is_file() {
                    tracing::debug!("Found config: {}", config_path.display());
                    return Ok(Some(config_path));
                }
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => break,
            }
        }

        Ok(None)
    }

    /// Load configuration from a specific file
    ///
    /// Supports TOML (.toml) and JSON (.json) formats
    pub fn load_from_file(path: &Path) -> Result<CompilerConfig> {
        let content = fs::read_to_string(path).map_err(|e| CartoError::io_error(path, e))?;
        let ext = path.extension().and_then(|e| e.to_str());

        let parsed = match ext {
            Some("toml") => toml::from_str(&content).map_err(|e| e.to_string()),
            Some("json") => serde_json::from_str(&content).map_err(|e| e.to_string()),
            _ => Err("unsupported file extension (expected .toml or .json)".to_string()),
        };

        parsed.map_err(|message| {
            CartoError::config_error(format!(
                "Failed to load config from '{}': {}",
                path.display(),
                message
            ))
        })
    }

    /// Load config from an explicit path, or auto-discover it from
    /// `start_dir`, falling back to defaults when nothing is found
    pub fn load(custom_path: Option<&Path>, start_dir: Option<&Path>) -> Result<CompilerConfig> {
        if let Some(path) = custom_path {
            if !path.exists() {
                return Err(CartoError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Self::load_from_file(path);
        }

        let search_dir = start_dir.unwrap_or_else(|| Path::new("."));
        match Self::auto_discover(search_dir)? {
            Some(path) => Self::load_from_file(&path),
            None => {
                tracing::debug!("No config file found, using defaults");
                Ok(CompilerConfig::default())
            }
        }
    }
}
