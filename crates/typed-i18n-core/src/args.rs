use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamType {
    Str,
    Int,
    Float,
    Bool,
}

impl ParamType {
    pub fn matches(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (ParamType::Str, Value::Str(_))
                | (ParamType::Int, Value::Int(_))
                | (ParamType::Float, Value::Float(_))
                | (ParamType::Bool, Value::Bool(_))
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            ParamType::Str => "string",
            ParamType::Int => "integer",
            ParamType::Float => "float",
            ParamType::Bool => "boolean",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Value {
    pub fn param_type(&self) -> ParamType {
        match self {
            Value::Str(_) => ParamType::Str,
            Value::Int(_) => ParamType::Int,
            Value::Float(_) => ParamType::Float,
            Value::Bool(_) => ParamType::Bool,
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(String::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

/// Named arguments in the order the operation declares its parameters.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Args {
    values: Vec<(String, Value)>,
}

impl Args {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    /// Appends an argument, replacing an earlier one with the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let name = name.into();
        let value = value.into();
        if let Some((_, slot)) = self.values.iter_mut().find(|(key, _)| *key == name) {
            return Some(core::mem::replace(slot, value));
        }
        self.values.push((name, value));
        None
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use super::{Args, ParamType, Value};

    #[test]
    fn args_insert_and_get() {
        let mut args = Args::new();
        args.insert("name", "Nova");
        match args.get("name").expect("value should exist") {
            Value::Str(value) => assert_eq!(value, "Nova"),
            _ => panic!("unexpected value type"),
        }
        assert!(args.get("missing").is_none());
    }

    #[test]
    fn insert_replaces_existing_name_in_place() {
        let mut args = Args::new().with("a", 1).with("b", 2);
        let previous = args.insert("a", 3);
        assert_eq!(previous, Some(Value::Int(1)));
        let order: Vec<&str> = args.iter().map(|(name, _)| name).collect();
        assert_eq!(order, ["a", "b"]);
        assert_eq!(args.get("a"), Some(&Value::Int(3)));
    }

    #[test]
    fn param_type_matches_values() {
        assert!(ParamType::Str.matches(&Value::Str(String::from("x"))));
        assert!(ParamType::Int.matches(&Value::Int(4)));
        assert!(ParamType::Float.matches(&Value::Float(4.5)));
        assert!(ParamType::Bool.matches(&Value::Bool(true)));
        assert!(!ParamType::Int.matches(&Value::Float(4.0)));
        assert!(!ParamType::Str.matches(&Value::Bool(false)));
    }
}
