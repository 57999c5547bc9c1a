//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::SvportConfig;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in project directories.
pub const CONFIG_FILE_NAME: &str = "svport.toml";

/// Loads and validates an `svport.toml` configuration from a project directory.
///
/// Reads `<project_dir>/svport.toml`, parses it, and validates it.
pub fn load_config(project_dir: &Path) -> Result<SvportConfig, ConfigError> {
    let config_path = project_dir.join(CONFIG_FILE_NAME);
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates an `svport.toml` configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<SvportConfig, ConfigError> {
    let config: SvportConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Walks up from `start` looking for a directory that contains `svport.toml`.
///
/// Returns the directory, not the file path.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(CONFIG_FILE_NAME).is_file())
        .map(Path::to_path_buf)
}

fn validate_config(config: &SvportConfig) -> Result<(), ConfigError> {
    if config.project.name.trim().is_empty() {
        return Err(ConfigError::MissingField("project.name".to_string()));
    }
    if config.sources.extensions.is_empty() {
        return Err(ConfigError::ValidationError(
            "sources.extensions must not be empty".to_string(),
        ));
    }
    if let Some(ext) = config
        .sources
        .extensions
        .iter()
        .find(|e| e.is_empty() || e.starts_with('.'))
    {
        return Err(ConfigError::ValidationError(format!(
            "invalid extension '{ext}' in sources.extensions (omit the leading '.')"
        )));
    }
    Ok(())
}
