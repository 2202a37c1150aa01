#![forbid(unsafe_code)]

mod error;
mod manager;
mod parser;
mod provider;
mod source;
mod translator;

pub use crate::error::{CallError, Expected, LoadResult, ParseError, SourceError, ValidationError};
pub use crate::manager::Manager;
pub use crate::parser::{JsonParser, SourceFormat, TomlParser, TreeParser};
pub use crate::provider::{ErrorMode, PreparedLanguage, ValidatingProvider};
pub use crate::source::{ByteSource, FileSource, MemorySource};
pub use crate::translator::Translator;
pub use typed_i18n_core::{
    Args, CoreError, KeyPath, LocaleData, LocaleEntry, Operation, OperationSpec,
    OperationSpecBuilder, ParamType, Template, TemplateEngine, Value,
};
