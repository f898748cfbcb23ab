use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use chomp_core::Config;

const APP_DIR: &str = "chomp";
const CONFIG_FILE: &str = "config.toml";

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Reads the config file at `path`. A missing file yields the defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    if !path.exists() {
        return Ok(Config::default());
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("invalid config {}", path.display()))
}

/// `--data-dir` wins over the config file, which wins over the platform default.
pub fn resolve_data_dir(flag: Option<PathBuf>, config: &Config) -> anyhow::Result<PathBuf> {
    if let Some(dir) = flag.or_else(|| config.storage.data_dir.clone()) {
        return Ok(dir);
    }
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR))
        .context("could not determine a data directory; pass --data-dir")
}
