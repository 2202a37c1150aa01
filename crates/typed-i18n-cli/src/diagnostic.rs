use std::fmt;

use typed_i18n_runtime::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: String,
    pub message: String,
    pub locale: Option<String>,
    pub path: Option<String>,
}

impl Diagnostic {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            locale: None,
            path: None,
        }
    }

    pub fn with_location(mut self, locale: impl Into<String>, path: Option<String>) -> Self {
        self.locale = Some(locale.into());
        self.path = path;
        self
    }
}

impl From<&ValidationError> for Diagnostic {
    fn from(error: &ValidationError) -> Self {
        let (code, message) = match error {
            ValidationError::SourceUnavailable { message, .. } => {
                ("TI001", format!("source unavailable: {message}"))
            }
            ValidationError::MalformedInput { message, .. } => {
                ("TI002", format!("malformed input: {message}"))
            }
            ValidationError::MissingKey { .. } => ("TI100", "missing key".to_string()),
            ValidationError::TypeMismatch { expected, .. } => {
                ("TI101", format!("expected a {expected}"))
            }
            ValidationError::UnknownPlaceholder { token, .. } => {
                ("TI102", format!("unknown placeholder ::{token}::"))
            }
            ValidationError::NotPrepared(_) => ("TI200", "locale not prepared".to_string()),
        };
        Diagnostic::new(code, message).with_location(
            error.locale(),
            error.path().map(|path| path.to_string()),
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)?;
        match (&self.locale, &self.path) {
            (Some(locale), Some(path)) => write!(f, " {locale}:{path}")?,
            (Some(locale), None) => write!(f, " {locale}")?,
            _ => {}
        }
        write!(f, ": {}", self.message)
    }
}
