use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;
use typed_i18n_runtime::{FileSource, OperationSpec, SourceFormat, ValidatingProvider};

use crate::config::{CliConfig, load_config_or_default, resolve_path};
use crate::error::CliError;
use crate::model::load_spec;

#[derive(Debug, Clone)]
pub struct Project {
    pub config: CliConfig,
    pub spec: Arc<OperationSpec>,
    pub locales_dir: PathBuf,
}

impl Project {
    /// Loads the config and spec; `format` overrides the configured source
    /// format when given.
    pub fn load(config_path: &Path, format: Option<SourceFormat>) -> Result<Self, CliError> {
        let mut config = load_config_or_default(config_path)?;
        if let Some(format) = format {
            config.format = format;
        }
        let spec_path = resolve_path(config_path, &config.spec_path);
        let locales_dir = resolve_path(config_path, &config.locales_dir);
        debug!(spec = %spec_path.display(), locales = %locales_dir.display(), "loading project");
        let spec = load_spec(&spec_path)?;
        Ok(Self {
            config,
            spec: Arc::new(spec),
            locales_dir,
        })
    }

    pub fn source(&self) -> FileSource {
        FileSource::for_format(&self.locales_dir, self.config.format)
    }

    pub fn provider(&self) -> ValidatingProvider<FileSource, SourceFormat> {
        ValidatingProvider::new(self.source(), self.config.format, Arc::clone(&self.spec))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    pub const SPEC: &str = r#"{
        "operations": [
            {"name": "hello", "args": [{"name": "name", "type": "string"}]},
            {"name": "oranges", "args": [{"name": "number", "type": "integer"}]},
            {"name": "sub", "operations": [{"name": "yo"}]}
        ]
    }"#;

    pub const EN: &str = r#"{"hello": "Hi ::name::!", "oranges": "There are ::number:: orange(s)!", "sub": {"yo": "Yo!"}}"#;

    pub fn temp_dir(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        path.push(format!("typed_i18n_{name}_{nanos}"));
        fs::create_dir_all(&path).expect("dir");
        path
    }

    /// Writes a config, spec and locale files; returns the config path.
    pub fn write_project(root: &PathBuf, locales: &[(&str, &str)]) -> PathBuf {
        let locales_dir = root.join("locales");
        fs::create_dir_all(&locales_dir).expect("locales");
        for (locale, contents) in locales {
            fs::write(locales_dir.join(format!("{locale}.json")), contents).expect("locale");
        }
        fs::write(root.join("spec.json"), SPEC).expect("spec");
        let config_path = root.join("typed-i18n.toml");
        fs::write(
            &config_path,
            "default_locale = \"en\"\nlocales_dir = \"locales\"\nformat = \"json\"\nspec_path = \"spec.json\"\n",
        )
        .expect("config");
        config_path
    }
}
