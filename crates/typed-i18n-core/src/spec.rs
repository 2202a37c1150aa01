use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::{CoreError, CoreResult, KeyPath, ParamType};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: ParamType,
}

/// Parameters of one renderable operation, in call order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LeafSpec {
    params: Vec<Param>,
}

impl LeafSpec {
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|param| param.name == name)
    }

    pub fn declares(&self, name: &str) -> bool {
        self.param(name).is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    Leaf(LeafSpec),
    Group(Arc<OperationSpec>),
}

/// Declared shape of a set of translation operations.
///
/// Built once through [`OperationSpecBuilder`] and read-only afterwards.
/// Entries keep declaration order; names are unique per level.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OperationSpec {
    entries: Vec<(String, Operation)>,
}

impl OperationSpec {
    pub fn builder() -> OperationSpecBuilder {
        OperationSpecBuilder::default()
    }

    pub fn get(&self, name: &str) -> Option<&Operation> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, operation)| operation)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &Operation)> {
        self.entries
            .iter()
            .map(|(name, operation)| (name.as_str(), operation))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of renderable operations across every nesting level.
    pub fn leaf_count(&self) -> usize {
        self.entries
            .iter()
            .map(|(_, operation)| match operation {
                Operation::Leaf(_) => 1,
                Operation::Group(group) => group.leaf_count(),
            })
            .sum()
    }

    pub fn lookup(&self, path: &KeyPath) -> Option<&Operation> {
        let mut segments = path.segments();
        let mut current = self.get(segments.next()?)?;
        for segment in segments {
            match current {
                Operation::Group(group) => current = group.get(segment)?,
                Operation::Leaf(_) => return None,
            }
        }
        Some(current)
    }
}

#[derive(Debug, Default)]
pub struct OperationSpecBuilder {
    entries: Vec<(String, Operation)>,
    error: Option<CoreError>,
}

impl OperationSpecBuilder {
    pub fn leaf<N, P>(mut self, name: impl Into<String>, params: P) -> Self
    where
        N: Into<String>,
        P: IntoIterator<Item = (N, ParamType)>,
    {
        let mut leaf = LeafSpec::default();
        for (param, ty) in params {
            let param = param.into();
            if param.is_empty() {
                self.fail(CoreError::InvalidInput("parameter name is empty"));
            } else if leaf.declares(&param) {
                self.fail(CoreError::DuplicateName(param));
            } else {
                leaf.params.push(Param { name: param, ty });
            }
        }
        self.push(name.into(), Operation::Leaf(leaf))
    }

    pub fn group(self, name: impl Into<String>, spec: OperationSpec) -> Self {
        self.push(name.into(), Operation::Group(Arc::new(spec)))
    }

    pub fn build(self) -> CoreResult<OperationSpec> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(OperationSpec {
                entries: self.entries,
            }),
        }
    }

    fn push(mut self, name: String, operation: Operation) -> Self {
        if name.is_empty() || name.contains('.') {
            self.fail(CoreError::InvalidInput("operation name must be non-empty without dots"));
        } else if self.entries.iter().any(|(key, _)| *key == name) {
            self.fail(CoreError::DuplicateName(name));
        } else {
            self.entries.push((name, operation));
        }
        self
    }

    fn fail(&mut self, error: CoreError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use super::{Operation, OperationSpec};
    use crate::{CoreError, KeyPath, ParamType};

    fn no_params() -> [(&'static str, ParamType); 0] {
        []
    }

    fn sample() -> OperationSpec {
        let sub = OperationSpec::builder()
            .leaf("yo", no_params())
            .build()
            .expect("sub spec");
        OperationSpec::builder()
            .leaf("hello", [("name", ParamType::Str)])
            .leaf("oranges", [("number", ParamType::Int)])
            .group("sub", sub)
            .build()
            .expect("spec")
    }

    #[test]
    fn entries_keep_declaration_order() {
        let spec = sample();
        let names: Vec<&str> = spec.entries().map(|(name, _)| name).collect();
        assert_eq!(names, ["hello", "oranges", "sub"]);
        assert_eq!(spec.leaf_count(), 3);
    }

    #[test]
    fn lookup_walks_groups() {
        let spec = sample();
        let path = KeyPath::new("sub.yo").expect("path");
        assert!(matches!(spec.lookup(&path), Some(Operation::Leaf(_))));
        let missing = KeyPath::new("hello.nested").expect("path");
        assert!(spec.lookup(&missing).is_none());
        assert!(spec.lookup(&KeyPath::root()).is_none());
    }

    #[test]
    fn leaf_params_keep_order() {
        let spec = OperationSpec::builder()
            .leaf("greet", [("first", ParamType::Str), ("count", ParamType::Int)])
            .build()
            .expect("spec");
        let Some(Operation::Leaf(leaf)) = spec.get("greet") else {
            panic!("expected leaf");
        };
        let names: Vec<&str> = leaf.params().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["first", "count"]);
        assert_eq!(leaf.param("count").map(|p| p.ty), Some(ParamType::Int));
    }

    #[test]
    fn rejects_duplicate_operation() {
        let err = OperationSpec::builder()
            .leaf("hello", no_params())
            .leaf("hello", no_params())
            .build()
            .expect_err("duplicate should fail");
        assert_eq!(err, CoreError::DuplicateName(String::from("hello")));
    }

    #[test]
    fn rejects_duplicate_param() {
        let err = OperationSpec::builder()
            .leaf("hello", [("name", ParamType::Str), ("name", ParamType::Int)])
            .build()
            .expect_err("duplicate should fail");
        assert_eq!(err, CoreError::DuplicateName(String::from("name")));
    }

    #[test]
    fn rejects_dotted_name() {
        let result = OperationSpec::builder().leaf("a.b", no_params()).build();
        assert!(matches!(result, Err(CoreError::InvalidInput(_))));
    }
}
