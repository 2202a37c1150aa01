#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod args;
mod engine;
mod error;
mod locale_data;
mod spec;
mod template;
mod types;

pub use args::{Args, ParamType, Value};
pub use engine::{TemplateEngine, format_value};
pub use error::{CoreError, CoreResult};
pub use locale_data::{LocaleData, LocaleEntry};
pub use spec::{LeafSpec, Operation, OperationSpec, OperationSpecBuilder, Param};
pub use template::{Segment, Template};
pub use types::KeyPath;
