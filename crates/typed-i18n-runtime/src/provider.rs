use std::sync::Arc;

use serde_json::{Map, Value as Tree};
use sha2::{Digest, Sha256};
use tracing::{debug, trace};
use typed_i18n_core::{KeyPath, LocaleData, LocaleEntry, Operation, OperationSpec, Template};

use crate::error::{Expected, LoadResult, ValidationError};
use crate::parser::TreeParser;
use crate::source::ByteSource;

/// A language whose data passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedLanguage {
    locale: String,
    data: Arc<LocaleData>,
    digest: [u8; 32],
}

impl PreparedLanguage {
    pub fn new(locale: impl Into<String>, data: LocaleData, digest: [u8; 32]) -> Self {
        Self {
            locale: locale.into(),
            data: Arc::new(data),
            digest,
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn data(&self) -> &Arc<LocaleData> {
        &self.data
    }

    /// SHA-256 of the raw bytes the data was validated from.
    pub fn digest(&self) -> [u8; 32] {
        self.digest
    }

    pub fn digest_hex(&self) -> String {
        format!("sha256:{}", hex::encode(self.digest))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorMode {
    FirstError,
    CollectAll,
}

/// Fetches, parses and checks locale data against an [`OperationSpec`].
pub struct ValidatingProvider<S, P> {
    source: S,
    parser: P,
    spec: Arc<OperationSpec>,
}

impl<S, P> ValidatingProvider<S, P>
where
    S: ByteSource,
    P: TreeParser,
{
    pub fn new(source: S, parser: P, spec: impl Into<Arc<OperationSpec>>) -> Self {
        Self {
            source,
            parser,
            spec: spec.into(),
        }
    }

    pub fn spec(&self) -> &Arc<OperationSpec> {
        &self.spec
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Loads one locale, stopping at the first problem found.
    pub async fn load(&self, locale: &str) -> LoadResult<PreparedLanguage> {
        let (tree, digest) = self.fetch_tree(locale).await?;
        match self.validate_tree(locale, &tree, ErrorMode::FirstError) {
            Ok(data) => Ok(PreparedLanguage::new(locale, data, digest)),
            Err(mut errors) => Err(errors.swap_remove(0)),
        }
    }

    /// Loads one locale and reports every problem instead of the first.
    pub async fn diagnose(&self, locale: &str) -> Vec<ValidationError> {
        match self.fetch_tree(locale).await {
            Ok((tree, _)) => self
                .validate_tree(locale, &tree, ErrorMode::CollectAll)
                .err()
                .unwrap_or_default(),
            Err(err) => vec![err],
        }
    }

    /// Walks an already parsed tree. On failure the list is never empty.
    pub fn validate_tree(
        &self,
        locale: &str,
        tree: &Tree,
        mode: ErrorMode,
    ) -> Result<LocaleData, Vec<ValidationError>> {
        let mut walk = Walk {
            locale,
            mode,
            errors: Vec::new(),
        };
        let root = KeyPath::root();
        let data = match tree {
            Tree::Object(map) => walk.group(&self.spec, map, &root),
            _ => {
                walk.report(ValidationError::TypeMismatch {
                    locale: locale.to_string(),
                    path: root,
                    expected: Expected::Group,
                });
                None
            }
        };
        match data {
            Some(data) if walk.errors.is_empty() => Ok(data),
            _ => Err(walk.errors),
        }
    }

    async fn fetch_tree(&self, locale: &str) -> LoadResult<(Tree, [u8; 32])> {
        let bytes = self
            .source
            .fetch(locale)
            .await
            .map_err(|err| ValidationError::SourceUnavailable {
                locale: locale.to_string(),
                message: err.to_string(),
            })?;
        debug!(locale, bytes = bytes.len(), "fetched locale source");
        let digest: [u8; 32] = Sha256::digest(&bytes).into();
        let tree = self
            .parser
            .parse(&bytes)
            .map_err(|err| ValidationError::MalformedInput {
                locale: locale.to_string(),
                message: err.to_string(),
            })?;
        Ok((tree, digest))
    }
}

struct Walk<'a> {
    locale: &'a str,
    mode: ErrorMode,
    errors: Vec<ValidationError>,
}

impl Walk<'_> {
    fn group(
        &mut self,
        spec: &OperationSpec,
        tree: &Map<String, Tree>,
        path: &KeyPath,
    ) -> Option<LocaleData> {
        let mut entries = Vec::with_capacity(spec.len());
        for (name, operation) in spec.entries() {
            let entry_path = path.child(name);
            let Some(node) = tree.get(name) else {
                self.report(ValidationError::MissingKey {
                    locale: self.locale.to_string(),
                    path: entry_path,
                });
                if self.should_stop() {
                    return None;
                }
                continue;
            };
            let entry = match (operation, node) {
                (Operation::Group(child), Tree::Object(map)) => self
                    .group(child, map, &entry_path)
                    .map(|data| LocaleEntry::Group(Arc::new(data))),
                (Operation::Group(_), _) => {
                    self.mismatch(entry_path, Expected::Group);
                    None
                }
                (Operation::Leaf(leaf), Tree::String(text)) => {
                    let template = Template::parse(text.as_str());
                    let mut clean = true;
                    for token in template.placeholders() {
                        if leaf.declares(token) {
                            continue;
                        }
                        clean = false;
                        self.report(ValidationError::UnknownPlaceholder {
                            locale: self.locale.to_string(),
                            path: entry_path.clone(),
                            token: token.to_string(),
                        });
                        if self.should_stop() {
                            break;
                        }
                    }
                    clean.then_some(LocaleEntry::Template(template))
                }
                (Operation::Leaf(_), _) => {
                    self.mismatch(entry_path, Expected::String);
                    None
                }
            };
            if self.should_stop() {
                return None;
            }
            if let Some(entry) = entry {
                entries.push((name.to_string(), entry));
            }
        }

        for key in tree.keys().filter(|key| spec.get(key.as_str()).is_none()) {
            trace!(locale = self.locale, path = %path.child(key), "ignoring unknown key");
        }

        (entries.len() == spec.len()).then(|| entries.into_iter().collect())
    }

    fn mismatch(&mut self, path: KeyPath, expected: Expected) {
        self.report(ValidationError::TypeMismatch {
            locale: self.locale.to_string(),
            path,
            expected,
        });
    }

    fn report(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    fn should_stop(&self) -> bool {
        self.mode == ErrorMode::FirstError && !self.errors.is_empty()
    }
}
