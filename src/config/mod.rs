pub mod types;

use crate::error::{ConfigError, Result};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = ".swarm-conformity.toml";

/// Get the global config file path (~/.swarm-conformity.toml)
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(CONFIG_FILE_NAME))
}

/// Get the local config file path (./.swarm-conformity.toml)
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE_NAME)
}

/// Load configuration from file or use defaults.
///
/// An explicit path must exist and parse. Otherwise the local config is tried
/// first, then the global one; implicit files that fail to parse are skipped.
pub fn load_config(explicit: Option<&Path>) -> Result<types::Config> {
    if let Some(path) = explicit {
        return Ok(read_config(path)?);
    }

    let mut candidates = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(local_config_path(&cwd));
    }
    candidates.extend(global_config_path());

    for candidate in candidates {
        if !candidate.exists() {
            continue;
        }
        match read_config(&candidate) {
            Ok(config) => {
                log::trace!("loaded configuration from {}", candidate.display());
                return Ok(config);
            }
            Err(e) => log::debug!("ignoring {}: {}", candidate.display(), e),
        }
    }

    Ok(types::Config::default())
}

/// Read and parse one configuration file.
pub fn read_config(path: &Path) -> std::result::Result<types::Config, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::ParsingFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
