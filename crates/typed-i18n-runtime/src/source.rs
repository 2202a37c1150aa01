use std::collections::BTreeMap;
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::SourceError;
use crate::parser::SourceFormat;

/// Supplies the raw bytes for one locale.
pub trait ByteSource: Send + Sync {
    fn fetch(&self, locale: &str) -> impl Future<Output = Result<Vec<u8>, SourceError>> + Send;
}

/// Reads `<root>/<locale>.<extension>`.
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
    extension: String,
}

impl FileSource {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    pub fn for_format(root: impl Into<PathBuf>, format: SourceFormat) -> Self {
        Self::new(root, format.extension())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, locale: &str) -> Result<PathBuf, SourceError> {
        check_locale(locale)?;
        Ok(self.root.join(format!("{locale}.{}", self.extension)))
    }

    /// Locale codes of every file in the root carrying this source's extension.
    pub async fn discover(&self) -> Result<Vec<String>, SourceError> {
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        let mut locales = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(self.extension.as_str()) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                locales.push(stem.to_string());
            }
        }
        locales.sort();
        Ok(locales)
    }
}

impl ByteSource for FileSource {
    async fn fetch(&self, locale: &str) -> Result<Vec<u8>, SourceError> {
        let path = self.path_for(locale)?;
        debug!(locale, path = %path.display(), "reading locale file");
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(SourceError::NotFound(locale.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// Locale bytes held in memory, e.g. assets compiled into the binary.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    locales: BTreeMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, locale: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(locale, bytes);
        self
    }

    pub fn insert(&mut self, locale: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.locales.insert(locale.into(), bytes.into());
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }
}

impl ByteSource for MemorySource {
    async fn fetch(&self, locale: &str) -> Result<Vec<u8>, SourceError> {
        self.locales
            .get(locale)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(locale.to_string()))
    }
}

fn check_locale(locale: &str) -> Result<(), SourceError> {
    let valid = !locale.is_empty()
        && locale
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(SourceError::InvalidLocale(locale.to_string()))
    }
}
