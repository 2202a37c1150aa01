use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use typed_i18n_runtime::SourceFormat;

use crate::error::CliError;

#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    pub default_locale: String,
    pub locales_dir: String,
    #[serde(default)]
    pub format: SourceFormat,
    pub spec_path: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            default_locale: "en".to_string(),
            locales_dir: "locales".to_string(),
            format: SourceFormat::Json,
            spec_path: "i18n-spec.json".to_string(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<CliConfig, CliError> {
    let contents = fs::read_to_string(path)?;
    let config = toml::from_str(&contents)?;
    Ok(config)
}

pub fn load_config_or_default(path: &Path) -> Result<CliConfig, CliError> {
    if path.exists() {
        load_config(path)
    } else {
        Ok(CliConfig::default())
    }
}

/// Resolves `value` against the directory holding the config file.
pub fn resolve_path(config_path: &Path, value: &str) -> PathBuf {
    let path = PathBuf::from(value);
    if path.is_absolute() {
        return path;
    }
    config_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(path)
}
