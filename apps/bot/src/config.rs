//! Strategy file loading.

use goldwatch_core::StrategyConfig;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Load the strategy: built-in defaults, optionally overridden by a
/// JSON file. Sparse files keep the defaults for omitted fields.
pub fn load_strategy(path: Option<&Path>) -> Result<StrategyConfig, ConfigFileError> {
    let Some(path) = path else {
        return Ok(StrategyConfig::default());
    };

    let raw = std::fs::read_to_string(path).map_err(|source| ConfigFileError::Read {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ConfigFileError::Parse {
        path: path.display().to_string(),
        source,
    })
}
