use alloc::string::{String, ToString};

use crate::{Args, CoreError, CoreResult, Segment, Template, Value};

/// Stateless `::name::` substitution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TemplateEngine;

impl TemplateEngine {
    pub const fn new() -> Self {
        Self
    }

    pub fn render(&self, template: &Template, args: &Args) -> CoreResult<String> {
        let mut output = String::with_capacity(template.source().len());
        for segment in template.segments() {
            match segment {
                Segment::Text(text) => output.push_str(text),
                Segment::Placeholder(name) => {
                    let value = args
                        .get(name)
                        .ok_or_else(|| CoreError::UnknownPlaceholder(name.clone()))?;
                    push_value(&mut output, value);
                }
            }
        }
        Ok(output)
    }

    pub fn render_str(&self, template: &str, args: &Args) -> CoreResult<String> {
        self.render(&Template::parse(template), args)
    }
}

pub fn format_value(value: &Value) -> String {
    let mut out = String::new();
    push_value(&mut out, value);
    out
}

fn push_value(output: &mut String, value: &Value) {
    match value {
        Value::Str(text) => output.push_str(text),
        Value::Int(number) => output.push_str(&number.to_string()),
        Value::Float(number) => output.push_str(&number.to_string()),
        Value::Bool(true) => output.push_str("true"),
        Value::Bool(false) => output.push_str("false"),
    }
}
