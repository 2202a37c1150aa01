use std::path::PathBuf;

use thiserror::Error;
use typed_i18n_runtime::SourceFormat;

use crate::command_render::{RenderCommandError, RenderOptions, run_render};
use crate::command_validate::{ValidateCommandError, ValidateOptions, run_validate};

const DEFAULT_CONFIG: &str = "typed-i18n.toml";

#[derive(Debug, Error)]
pub enum CliAppError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Validate(#[from] ValidateCommandError),
    #[error(transparent)]
    Render(#[from] RenderCommandError),
}

pub async fn run() -> Result<(), CliAppError> {
    let mut args = std::env::args().skip(1);
    let command = args.next().ok_or_else(|| CliAppError::Usage(usage()))?;
    match command.as_str() {
        "validate" => {
            let options = parse_validate_options(args.collect())?;
            let diagnostics = run_validate(&options).await?;
            for diagnostic in &diagnostics {
                eprintln!("{diagnostic}");
            }
            if diagnostics.is_empty() {
                Ok(())
            } else {
                Err(ValidateCommandError::Failed(diagnostics.len()).into())
            }
        }
        "render" => {
            let options = parse_render_options(args.collect())?;
            let output = run_render(&options).await?;
            println!("{output}");
            Ok(())
        }
        _ => Err(CliAppError::Usage(usage())),
    }
}

fn parse_validate_options(args: Vec<String>) -> Result<ValidateOptions, CliAppError> {
    let mut locales = Vec::new();
    let mut format = None;
    let mut config_path = PathBuf::from(DEFAULT_CONFIG);
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--locale" => locales.push(next_value("--locale", &mut iter)?),
            "--format" => format = Some(parse_format(&next_value("--format", &mut iter)?)?),
            "--config" => config_path = PathBuf::from(next_value("--config", &mut iter)?),
            "--help" | "-h" => return Err(CliAppError::Usage(usage())),
            _ => return Err(CliAppError::Usage(usage())),
        }
    }
    Ok(ValidateOptions {
        locales,
        format,
        config_path,
    })
}

fn parse_render_options(args: Vec<String>) -> Result<RenderOptions, CliAppError> {
    let mut locale = None;
    let mut key = None;
    let mut values = Vec::new();
    let mut format = None;
    let mut config_path = PathBuf::from(DEFAULT_CONFIG);
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--locale" => locale = Some(next_value("--locale", &mut iter)?),
            "--key" => key = Some(next_value("--key", &mut iter)?),
            "--format" => format = Some(parse_format(&next_value("--format", &mut iter)?)?),
            "--arg" => {
                let pair = next_value("--arg", &mut iter)?;
                let (name, value) = pair.split_once('=').ok_or_else(|| {
                    CliAppError::Usage(format!("--arg expects name=value\n\n{}", usage()))
                })?;
                values.push((name.to_string(), value.to_string()));
            }
            "--config" => config_path = PathBuf::from(next_value("--config", &mut iter)?),
            "--help" | "-h" => return Err(CliAppError::Usage(usage())),
            _ => return Err(CliAppError::Usage(usage())),
        }
    }
    let key = key.ok_or_else(|| CliAppError::Usage(usage()))?;
    Ok(RenderOptions {
        locale,
        key,
        args: values,
        format,
        config_path,
    })
}

fn next_value(flag: &str, iter: &mut impl Iterator<Item = String>) -> Result<String, CliAppError> {
    iter.next()
        .ok_or_else(|| CliAppError::Usage(format!("{flag} requires a value\n\n{}", usage())))
}

fn parse_format(name: &str) -> Result<SourceFormat, CliAppError> {
    SourceFormat::from_name(name).ok_or_else(|| {
        CliAppError::Usage(format!("unknown format {name:?}, expected json or toml\n\n{}", usage()))
    })
}

fn usage() -> String {
    "usage: typed-i18n validate [--locale <code>...] [--format json|toml] [--config <path>]\n       typed-i18n render --key <dotted.path> [--locale <code>] [--arg <name>=<value>...] [--format json|toml] [--config <path>]".to_string()
}
