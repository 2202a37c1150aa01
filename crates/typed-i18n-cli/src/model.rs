use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use typed_i18n_runtime::{OperationSpec, ParamType};

use crate::error::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgType {
    String,
    Integer,
    Float,
    Boolean,
}

impl From<ArgType> for ParamType {
    fn from(value: ArgType) -> Self {
        match value {
            ArgType::String => ParamType::Str,
            ArgType::Integer => ParamType::Int,
            ArgType::Float => ParamType::Float,
            ArgType::Boolean => ParamType::Bool,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub arg_type: ArgType,
}

/// One entry of a spec file: a leaf when `operations` is absent, a group
/// otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<ArgSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operations: Option<Vec<OperationDef>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecFile {
    pub operations: Vec<OperationDef>,
}

impl SpecFile {
    pub fn to_operation_spec(&self) -> Result<OperationSpec, CliError> {
        build_level(&self.operations)
    }
}

fn build_level(defs: &[OperationDef]) -> Result<OperationSpec, CliError> {
    let mut builder = OperationSpec::builder();
    for def in defs {
        builder = match &def.operations {
            Some(children) => {
                if !def.args.is_empty() {
                    return Err(CliError::SpecShape(format!(
                        "group {} cannot declare args",
                        def.name
                    )));
                }
                builder.group(def.name.clone(), build_level(children)?)
            }
            None => builder.leaf(
                def.name.clone(),
                def.args
                    .iter()
                    .map(|arg| (arg.name.clone(), ParamType::from(arg.arg_type))),
            ),
        };
    }
    Ok(builder.build()?)
}

pub fn load_spec(path: &Path) -> Result<OperationSpec, CliError> {
    let contents = fs::read_to_string(path)?;
    let file: SpecFile = serde_json::from_str(&contents)?;
    file.to_operation_spec()
}
