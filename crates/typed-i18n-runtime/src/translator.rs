use std::sync::Arc;

use tracing::error;
use typed_i18n_core::{
    Args, KeyPath, LeafSpec, LocaleData, Operation, OperationSpec, TemplateEngine, Value,
};

use crate::error::CallError;
use crate::provider::PreparedLanguage;

/// Read-only view of one prepared language, positioned at a group of the
/// operation spec. Cloning is cheap; the locale data is shared.
#[derive(Debug, Clone)]
pub struct Translator {
    language: Arc<PreparedLanguage>,
    spec: Arc<OperationSpec>,
    data: Arc<LocaleData>,
    path: KeyPath,
    engine: TemplateEngine,
}

impl Translator {
    pub(crate) fn new(
        language: Arc<PreparedLanguage>,
        spec: Arc<OperationSpec>,
        engine: TemplateEngine,
    ) -> Self {
        let data = Arc::clone(language.data());
        Self {
            language,
            spec,
            data,
            path: KeyPath::root(),
            engine,
        }
    }

    pub fn locale(&self) -> &str {
        self.language.locale()
    }

    /// Location of this view inside the operation tree; the root for a fresh translator.
    pub fn path(&self) -> &KeyPath {
        &self.path
    }

    pub fn operations(&self) -> impl Iterator<Item = (&str, &Operation)> {
        self.spec.entries()
    }

    pub fn group(&self, name: &str) -> Result<Translator, CallError> {
        let path = self.path.child(name);
        let spec = match self.spec.get(name) {
            Some(Operation::Group(spec)) => spec,
            Some(Operation::Leaf(_)) => return Err(CallError::NotAGroup(path)),
            None => return Err(CallError::UnknownOperation(path)),
        };
        let Some(data) = self.data.group(name) else {
            self.invariant_violated(&path, "validated group has no data")
        };
        Ok(Translator {
            language: Arc::clone(&self.language),
            spec: Arc::clone(spec),
            data: Arc::clone(data),
            path,
            engine: self.engine,
        })
    }

    /// Renders the operation `name` with positional arguments in the order
    /// its parameters were declared.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<String, CallError> {
        let path = self.path.child(name);
        let leaf = match self.spec.get(name) {
            Some(Operation::Leaf(leaf)) => leaf,
            Some(Operation::Group(_)) => return Err(CallError::NotAnOperation(path)),
            None => return Err(CallError::UnknownOperation(path)),
        };
        let args = bind_args(&path, leaf, args)?;
        let Some(template) = self.data.template(name) else {
            self.invariant_violated(&path, "validated operation has no template")
        };
        match self.engine.render(template, &args) {
            Ok(output) => Ok(output),
            Err(err) => self.invariant_violated(&path, &err.to_string()),
        }
    }

    /// Like [`Translator::call`] but addressed by a dotted path relative to
    /// this view, e.g. `menu.file.open`.
    pub fn call_at(&self, path: &str, args: &[Value]) -> Result<String, CallError> {
        let segments: Vec<&str> = path.split('.').collect();
        let Some((name, groups)) = segments.split_last() else {
            return Err(CallError::UnknownOperation(self.path.clone()));
        };
        let mut view = self.clone();
        for group in groups {
            view = view.group(group)?;
        }
        view.call(name, args)
    }

    fn invariant_violated(&self, path: &KeyPath, detail: &str) -> ! {
        error!(locale = self.locale(), %path, detail, "render reached data the validator should have rejected");
        panic!(
            "locale {}: {path}: {detail}; validation let inconsistent data through",
            self.locale()
        );
    }
}

fn bind_args(path: &KeyPath, leaf: &LeafSpec, values: &[Value]) -> Result<Args, CallError> {
    let params = leaf.params();
    if params.len() != values.len() {
        return Err(CallError::ArgumentCount {
            path: path.clone(),
            expected: params.len(),
            found: values.len(),
        });
    }
    let mut args = Args::with_capacity(params.len());
    for (param, value) in params.iter().zip(values) {
        if !param.ty.matches(value) {
            return Err(CallError::ArgumentType {
                path: path.clone(),
                param: param.name.clone(),
                expected: param.ty,
                found: value.param_type(),
            });
        }
        args.insert(param.name.clone(), value.clone());
    }
    Ok(args)
}
