// FILE: src/cli/config.rs

use crate::error::{Result, SassError};
use crate::types::OutputStyle;
use serde::{Deserialize, Serialize};
use std::fs;

/// On-disk defaults for the command line tool. Every field is optional;
/// flags given on the command line win over the file.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub style: Option<OutputStyle>,
    pub include_paths: Option<Vec<String>>,
    pub precision: Option<i32>,
    pub comments: Option<bool>,
    pub map_path: Option<String>,
    pub map_root: Option<String>,
    pub embed_map: Option<bool>,
    pub map_contents: Option<bool>,
    pub omit_map_url: Option<bool>,
}

pub fn load(config_path: &str) -> Result<ConfigFile> {
    let config_content = fs::read_to_string(config_path).map_err(|e| {
        log::debug!("Cannot read config {}: {}", config_path, e);
        SassError::file_not_found(config_path)
    })?;

    let config = if config_path.ends_with(".json") {
        serde_json::from_str(&config_content)
            .map_err(|e| SassError::invalid_format(format!("Invalid JSON config: {}", e)))?
    } else if config_path.ends_with(".toml") {
        toml::from_str(&config_content)
            .map_err(|e| SassError::invalid_format(format!("Invalid TOML config: {}", e)))?
    } else {
        return Err(SassError::invalid_format(
            "Config file must be .json or .toml format",
        ));
    };
    log::info!("Loaded configuration from {}", config_path);
    Ok(config)
}
