use thiserror::Error;
use typed_i18n_runtime::CoreError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid spec: {0}")]
    Spec(#[from] CoreError),
    #[error("invalid spec: {0}")]
    SpecShape(String),
}
