use std::path::PathBuf;

use thiserror::Error;
use typed_i18n_runtime::{
    CallError, KeyPath, Manager, Operation, ParamType, SourceFormat, ValidationError, Value,
};

use crate::error::CliError;
use crate::project::Project;

#[derive(Debug, Error)]
pub enum RenderCommandError {
    #[error("config error: {0}")]
    Config(#[from] CliError),
    #[error(transparent)]
    Load(#[from] ValidationError),
    #[error(transparent)]
    Call(#[from] CallError),
    #[error("invalid key {0:?}")]
    InvalidKey(String),
    #[error("{0} is not an operation")]
    NotAnOperation(String),
    #[error("argument {name}: {message}")]
    Argument { name: String, message: String },
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub locale: Option<String>,
    pub key: String,
    pub args: Vec<(String, String)>,
    pub format: Option<SourceFormat>,
    pub config_path: PathBuf,
}

pub async fn run_render(options: &RenderOptions) -> Result<String, RenderCommandError> {
    let project = Project::load(&options.config_path, options.format)?;
    let locale = options
        .locale
        .clone()
        .unwrap_or_else(|| project.config.default_locale.clone());

    let path = KeyPath::new(options.key.as_str())
        .map_err(|_| RenderCommandError::InvalidKey(options.key.clone()))?;
    let leaf = match project.spec.lookup(&path) {
        Some(Operation::Leaf(leaf)) => leaf.clone(),
        _ => return Err(RenderCommandError::NotAnOperation(options.key.clone())),
    };
    let mut values = Vec::with_capacity(leaf.params().len());
    for param in leaf.params() {
        let raw = options
            .args
            .iter()
            .find(|(name, _)| *name == param.name)
            .map(|(_, value)| value.as_str())
            .ok_or_else(|| RenderCommandError::Argument {
                name: param.name.clone(),
                message: "missing".to_string(),
            })?;
        values.push(coerce(&param.name, param.ty, raw)?);
    }
    if let Some((name, _)) = options.args.iter().find(|(name, _)| !leaf.declares(name)) {
        return Err(RenderCommandError::Argument {
            name: name.clone(),
            message: format!("not declared by {path}"),
        });
    }

    let manager = Manager::new(project.provider());
    manager.prepare([locale.as_str()]).await?;
    let translator = manager.language(&locale)?;
    Ok(translator.call_at(path.as_str(), &values)?)
}

fn coerce(name: &str, ty: ParamType, raw: &str) -> Result<Value, RenderCommandError> {
    let invalid = || RenderCommandError::Argument {
        name: name.to_string(),
        message: format!("expected {ty}, got {raw:?}"),
    };
    match ty {
        ParamType::Str => Ok(Value::from(raw)),
        ParamType::Int => raw.parse::<i64>().map(Value::Int).map_err(|_| invalid()),
        ParamType::Float => raw.parse::<f64>().map(Value::Float).map_err(|_| invalid()),
        ParamType::Bool => raw.parse::<bool>().map(Value::Bool).map_err(|_| invalid()),
    }
}
