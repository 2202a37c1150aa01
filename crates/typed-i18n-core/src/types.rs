use alloc::string::String;
use core::fmt;

use crate::{CoreError, CoreResult};

/// Dotted location of an entry inside an operation spec, e.g. `menu.file.open`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyPath(String);

impl KeyPath {
    pub const fn root() -> Self {
        Self(String::new())
    }

    pub fn new(value: impl Into<String>) -> CoreResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(CoreError::InvalidInput("key path is empty"));
        }
        if value.split('.').any(str::is_empty) {
            return Err(CoreError::InvalidInput("key path has an empty segment"));
        }
        Ok(Self(value))
    }

    pub fn child(&self, name: &str) -> Self {
        if self.0.is_empty() {
            return Self(String::from(name));
        }
        let mut path = String::with_capacity(self.0.len() + 1 + name.len());
        path.push_str(&self.0);
        path.push('.');
        path.push_str(name);
        Self(path)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.').filter(|segment| !segment.is_empty())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::KeyPath;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    #[test]
    fn key_path_rejects_empty() {
        let err = KeyPath::new("").expect_err("empty path should fail");
        assert_eq!(err, crate::CoreError::InvalidInput("key path is empty"));
    }

    #[test]
    fn key_path_rejects_empty_segment() {
        assert!(KeyPath::new("menu..open").is_err());
        assert!(KeyPath::new(".open").is_err());
    }

    #[test]
    fn child_joins_with_dots() {
        let path = KeyPath::root().child("menu").child("open");
        assert_eq!(path.as_str(), "menu.open");
        assert_eq!(path.to_string(), "menu.open");
        let segments: Vec<&str> = path.segments().collect();
        assert_eq!(segments, ["menu", "open"]);
    }

    #[test]
    fn root_displays_placeholder() {
        let root = KeyPath::root();
        assert!(root.is_root());
        assert_eq!(root.to_string(), "<root>");
        assert_eq!(root.segments().count(), 0);
    }
}
