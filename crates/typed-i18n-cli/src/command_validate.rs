use std::path::PathBuf;

use thiserror::Error;
use tracing::info;
use typed_i18n_runtime::{SourceError, SourceFormat};

use crate::diagnostic::Diagnostic;
use crate::error::CliError;
use crate::project::Project;

#[derive(Debug, Error)]
pub enum ValidateCommandError {
    #[error("config error: {0}")]
    Config(#[from] CliError),
    #[error("cannot list locales: {0}")]
    Discover(#[from] SourceError),
    #[error("no locales to validate")]
    NoLocales,
    #[error("validation failed with {0} diagnostics")]
    Failed(usize),
}

#[derive(Debug, Clone)]
pub struct ValidateOptions {
    pub locales: Vec<String>,
    pub format: Option<SourceFormat>,
    pub config_path: PathBuf,
}

/// Checks each locale against the project spec, reporting every problem
/// rather than the first one per locale.
pub async fn run_validate(options: &ValidateOptions) -> Result<Vec<Diagnostic>, ValidateCommandError> {
    let project = Project::load(&options.config_path, options.format)?;
    let locales = if options.locales.is_empty() {
        project.source().discover().await?
    } else {
        options.locales.clone()
    };
    if locales.is_empty() {
        return Err(ValidateCommandError::NoLocales);
    }

    let provider = project.provider();
    let mut diagnostics = Vec::new();
    for locale in &locales {
        let errors = provider.diagnose(locale).await;
        info!(locale = locale.as_str(), errors = errors.len(), "validated locale");
        diagnostics.extend(errors.iter().map(Diagnostic::from));
    }
    Ok(diagnostics)
}
