use std::fmt;

use thiserror::Error;
use typed_i18n_core::{KeyPath, ParamType};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no data for locale {0}")]
    NotFound(String),
    #[error("invalid locale code {0:?}")]
    InvalidLocale(String),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("utf-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Shape an entry of the locale tree was required to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Group,
    String,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Group => f.write_str("group"),
            Expected::String => f.write_str("string"),
        }
    }
}

/// Every failure `prepare` can report. Cloneable so coalesced callers can
/// share one outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("locale {locale}: source unavailable: {message}")]
    SourceUnavailable { locale: String, message: String },
    #[error("locale {locale}: malformed input: {message}")]
    MalformedInput { locale: String, message: String },
    #[error("locale {locale}: missing key {path}")]
    MissingKey { locale: String, path: KeyPath },
    #[error("locale {locale}: {path} must be a {expected}")]
    TypeMismatch {
        locale: String,
        path: KeyPath,
        expected: Expected,
    },
    #[error("locale {locale}: {path} uses unknown placeholder ::{token}::")]
    UnknownPlaceholder {
        locale: String,
        path: KeyPath,
        token: String,
    },
    #[error("locale {0} is not prepared")]
    NotPrepared(String),
}

impl ValidationError {
    pub fn locale(&self) -> &str {
        match self {
            ValidationError::SourceUnavailable { locale, .. }
            | ValidationError::MalformedInput { locale, .. }
            | ValidationError::MissingKey { locale, .. }
            | ValidationError::TypeMismatch { locale, .. }
            | ValidationError::UnknownPlaceholder { locale, .. }
            | ValidationError::NotPrepared(locale) => locale,
        }
    }

    pub fn path(&self) -> Option<&KeyPath> {
        match self {
            ValidationError::MissingKey { path, .. }
            | ValidationError::TypeMismatch { path, .. }
            | ValidationError::UnknownPlaceholder { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Misuse of a [`crate::Translator`] detected against the operation spec.
/// Never caused by locale data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    #[error("unknown operation {0}")]
    UnknownOperation(KeyPath),
    #[error("{0} is a group, not an operation")]
    NotAnOperation(KeyPath),
    #[error("{0} is an operation, not a group")]
    NotAGroup(KeyPath),
    #[error("{path} expects {expected} arguments, got {found}")]
    ArgumentCount {
        path: KeyPath,
        expected: usize,
        found: usize,
    },
    #[error("{path}: argument {param} expects {expected}, got {found}")]
    ArgumentType {
        path: KeyPath,
        param: String,
        expected: ParamType,
        found: ParamType,
    },
}

pub type LoadResult<T> = Result<T, ValidationError>;
