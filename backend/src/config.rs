//! # Tracker Configuration
//!
//! Optional YAML file with the tracker's startup settings:
//!
//! ```yaml
//! default_cycle_length: 28
//! log_level: "info"
//! ```
//!
//! Missing keys and a missing file both fall back to the defaults. The
//! file never stores user data.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use shared::CycleTrackerConfig;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Parse a YAML config document
pub fn parse_config(yaml: &str) -> Result<CycleTrackerConfig, ConfigError> {
    if yaml.trim().is_empty() {
        return Ok(CycleTrackerConfig::default());
    }
    Ok(serde_yaml::from_str(yaml)?)
}

/// Load the config file at `path`, using defaults if it does not exist
pub fn load_config(path: &Path) -> Result<CycleTrackerConfig, ConfigError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("📋 No config at {}, using defaults", path.display());
            return Ok(CycleTrackerConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let config = parse_config(&contents)?;
    debug!("📋 Loaded config from {}: {:?}", path.display(), config);
    Ok(config)
}
