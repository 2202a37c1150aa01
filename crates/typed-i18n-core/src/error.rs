use alloc::string::String;
use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    InvalidInput(&'static str),
    DuplicateName(String),
    UnknownPlaceholder(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::InvalidInput(message) => write!(f, "invalid input: {message}"),
            CoreError::DuplicateName(name) => write!(f, "duplicate name: {name}"),
            CoreError::UnknownPlaceholder(name) => write!(f, "unknown placeholder: {name}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CoreError {}

#[cfg(test)]
mod tests {
    use super::CoreError;
    use alloc::string::{String, ToString};

    #[test]
    fn display_formats_invalid_input() {
        let err = CoreError::InvalidInput("name is empty");
        assert_eq!(err.to_string(), "invalid input: name is empty");
    }

    #[test]
    fn display_formats_duplicate_name() {
        let err = CoreError::DuplicateName(String::from("hello"));
        assert_eq!(err.to_string(), "duplicate name: hello");
    }

    #[test]
    fn display_formats_unknown_placeholder() {
        let err = CoreError::UnknownPlaceholder(String::from("nam"));
        assert_eq!(err.to_string(), "unknown placeholder: nam");
    }
}
