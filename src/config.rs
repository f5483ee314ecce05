use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{AdoError, Result};

pub const CONFIG_FILE: &str = ".ado-config.toml";
/// Read when no TOML file exists, for configs written for the older tool.
pub const LEGACY_CONFIG_FILE: &str = ".ado-config.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Personal access token
    pub token: String,
    pub project: String,
    #[serde(alias = "orgUrl")]
    pub org_url: String,
    /// Project GUID, used to build Git ref artifact links
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_id: Option<String>,
}

/// Prefer `.ado-config.toml` in `dir`, falling back to `.ado-config.json`.
fn config_path_in(dir: &Path) -> PathBuf {
    let toml_path = dir.join(CONFIG_FILE);
    let json_path = dir.join(LEGACY_CONFIG_FILE);
    if !toml_path.exists() && json_path.exists() {
        json_path
    } else {
        toml_path
    }
}

/// Load the config from `path`, or from the working directory.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config_path_in(Path::new("")));
    if !path.exists() {
        return Err(AdoError::Config(format!(
            "{} not found. Create it with token, project and org_url",
            path.display()
        )));
    }
    let contents = std::fs::read_to_string(&path).map_err(|e| {
        AdoError::Config(format!("Failed to read config from {}: {e}", path.display()))
    })?;

    let parsed = if path.extension().is_some_and(|ext| ext == "json") {
        parse_json_config(&contents).map_err(|e| e.to_string())
    } else {
        parse_config(&contents).map_err(|e| e.to_string())
    };
    parsed.map_err(|e| AdoError::Config(format!("Failed to parse {}: {e}", path.display())))
}

fn parse_config(contents: &str) -> std::result::Result<Config, toml::de::Error> {
    toml::from_str(contents)
}

fn parse_json_config(contents: &str) -> std::result::Result<Config, serde_json::Error> {
    serde_json::from_str(contents)
}

pub fn print_config(config: &Config, out: &mut impl Write) -> Result<()> {
    let rendered = toml::to_string_pretty(config)
        .map_err(|e| AdoError::Config(format!("Failed to render config: {e}")))?;
    write!(out, "{rendered}")?;
    Ok(())
}
