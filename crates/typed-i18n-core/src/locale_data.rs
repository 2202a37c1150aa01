use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::{KeyPath, Operation, OperationSpec, Template};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LocaleEntry {
    Template(Template),
    Group(Arc<LocaleData>),
}

/// Validated per-language data mirroring the shape of an [`OperationSpec`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LocaleData {
    entries: Vec<(String, LocaleEntry)>,
}

impl LocaleData {
    pub fn get(&self, name: &str) -> Option<&LocaleEntry> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, entry)| entry)
    }

    pub fn template(&self, name: &str) -> Option<&Template> {
        match self.get(name)? {
            LocaleEntry::Template(template) => Some(template),
            LocaleEntry::Group(_) => None,
        }
    }

    pub fn group(&self, name: &str) -> Option<&Arc<LocaleData>> {
        match self.get(name)? {
            LocaleEntry::Group(group) => Some(group),
            LocaleEntry::Template(_) => None,
        }
    }

    pub fn lookup(&self, path: &KeyPath) -> Option<&LocaleEntry> {
        let mut segments = path.segments();
        let mut current = self.get(segments.next()?)?;
        for segment in segments {
            match current {
                LocaleEntry::Group(group) => current = group.get(segment)?,
                LocaleEntry::Template(_) => return None,
            }
        }
        Some(current)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &LocaleEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when every spec key is present with the right shape, every
    /// placeholder is declared by its leaf, and no extra keys exist.
    pub fn conforms_to(&self, spec: &OperationSpec) -> bool {
        if self.entries.len() != spec.len() {
            return false;
        }
        spec.entries().all(|(name, operation)| match (operation, self.get(name)) {
            (Operation::Leaf(leaf), Some(LocaleEntry::Template(template))) => {
                template.placeholders().all(|token| leaf.declares(token))
            }
            (Operation::Group(child), Some(LocaleEntry::Group(data))) => data.conforms_to(child),
            _ => false,
        })
    }
}

impl FromIterator<(String, LocaleEntry)> for LocaleData {
    fn from_iter<T: IntoIterator<Item = (String, LocaleEntry)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
