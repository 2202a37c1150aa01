use serde::Deserialize;
use serde_json::Value as Tree;

use crate::error::ParseError;

/// Turns raw locale bytes into a generic tree.
pub trait TreeParser: Send + Sync {
    fn parse(&self, bytes: &[u8]) -> Result<Tree, ParseError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParser;

impl TreeParser for JsonParser {
    fn parse(&self, bytes: &[u8]) -> Result<Tree, ParseError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TomlParser;

impl TreeParser for TomlParser {
    fn parse(&self, bytes: &[u8]) -> Result<Tree, ParseError> {
        let text = std::str::from_utf8(bytes)?;
        Ok(toml::from_str(text)?)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    #[default]
    Json,
    Toml,
}

impl SourceFormat {
    pub fn extension(self) -> &'static str {
        match self {
            SourceFormat::Json => "json",
            SourceFormat::Toml => "toml",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "json" => Some(SourceFormat::Json),
            "toml" => Some(SourceFormat::Toml),
            _ => None,
        }
    }
}

impl TreeParser for SourceFormat {
    fn parse(&self, bytes: &[u8]) -> Result<Tree, ParseError> {
        match self {
            SourceFormat::Json => JsonParser.parse(bytes),
            SourceFormat::Toml => TomlParser.parse(bytes),
        }
    }
}
