use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::{BoxFuture, FutureExt, Shared, join_all};
use tracing::{debug, info, warn};
use typed_i18n_core::{OperationSpec, TemplateEngine};

use crate::error::{LoadResult, ValidationError};
use crate::parser::TreeParser;
use crate::provider::{PreparedLanguage, ValidatingProvider};
use crate::source::ByteSource;
use crate::translator::Translator;

type LoadFuture = Shared<BoxFuture<'static, LoadResult<Arc<PreparedLanguage>>>>;

enum Slot {
    Loading { generation: u64, future: LoadFuture },
    Ready(Arc<PreparedLanguage>),
}

/// Caches prepared languages and hands out translators bound to them.
///
/// At most one load per locale is in flight; concurrent `prepare` calls for
/// the same locale await that load. A failed load leaves the locale
/// unprepared so a later `prepare` fetches again.
pub struct Manager<S, P> {
    provider: Arc<ValidatingProvider<S, P>>,
    engine: TemplateEngine,
    slots: Mutex<BTreeMap<String, Slot>>,
    generation: AtomicU64,
}

impl<S, P> Manager<S, P>
where
    S: ByteSource + 'static,
    P: TreeParser + 'static,
{
    pub fn new(provider: ValidatingProvider<S, P>) -> Self {
        Self {
            provider: Arc::new(provider),
            engine: TemplateEngine::new(),
            slots: Mutex::new(BTreeMap::new()),
            generation: AtomicU64::new(0),
        }
    }

    pub fn spec(&self) -> &Arc<OperationSpec> {
        self.provider.spec()
    }

    /// Prepares every listed locale. Locales that validate stay cached even
    /// when another one in the batch fails; the error reported is the first
    /// failure in the order given.
    pub async fn prepare<I>(&self, locales: I) -> LoadResult<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut batch: Vec<String> = Vec::new();
        for locale in locales {
            let locale = locale.as_ref();
            if !batch.iter().any(|seen| seen == locale) {
                batch.push(locale.to_string());
            }
        }
        let outcomes = join_all(batch.iter().map(|locale| self.prepare_one(locale))).await;
        outcomes.into_iter().try_for_each(|outcome| outcome.map(drop))
    }

    pub async fn prepare_one(&self, locale: &str) -> LoadResult<Arc<PreparedLanguage>> {
        let (generation, future) = {
            let mut slots = self.slots();
            match slots.get(locale) {
                Some(Slot::Ready(prepared)) => {
                    debug!(locale, "locale already prepared");
                    return Ok(Arc::clone(prepared));
                }
                Some(Slot::Loading { generation, future }) => {
                    debug!(locale, "joining in-flight load");
                    (*generation, future.clone())
                }
                None => {
                    let generation = self.generation.fetch_add(1, Ordering::Relaxed);
                    let future = self.start_load(locale);
                    slots.insert(
                        locale.to_string(),
                        Slot::Loading {
                            generation,
                            future: future.clone(),
                        },
                    );
                    (generation, future)
                }
            }
        };

        let outcome = future.await;

        let mut slots = self.slots();
        let current = matches!(
            slots.get(locale),
            Some(Slot::Loading { generation: active, .. }) if *active == generation
        );
        if current {
            match &outcome {
                Ok(prepared) => {
                    info!(locale, digest = %prepared.digest_hex(), "locale prepared");
                    slots.insert(locale.to_string(), Slot::Ready(Arc::clone(prepared)));
                }
                Err(err) => {
                    warn!(locale, error = %err, "locale failed validation");
                    slots.remove(locale);
                }
            }
        }
        outcome
    }

    /// Translator for a prepared locale.
    pub fn language(&self, locale: &str) -> LoadResult<Translator> {
        match self.slots().get(locale) {
            Some(Slot::Ready(prepared)) => Ok(Translator::new(
                Arc::clone(prepared),
                Arc::clone(self.spec()),
                self.engine,
            )),
            _ => Err(ValidationError::NotPrepared(locale.to_string())),
        }
    }

    pub fn prepared(&self, locale: &str) -> Option<Arc<PreparedLanguage>> {
        match self.slots().get(locale) {
            Some(Slot::Ready(prepared)) => Some(Arc::clone(prepared)),
            _ => None,
        }
    }

    pub fn is_prepared(&self, locale: &str) -> bool {
        self.prepared(locale).is_some()
    }

    pub fn prepared_locales(&self) -> Vec<String> {
        self.slots()
            .iter()
            .filter(|(_, slot)| matches!(slot, Slot::Ready(_)))
            .map(|(locale, _)| locale.clone())
            .collect()
    }

    /// Drops a cached or in-flight locale. An in-flight load still completes
    /// for its current waiters but is not cached.
    pub fn invalidate(&self, locale: &str) -> bool {
        let removed = self.slots().remove(locale).is_some();
        if removed {
            debug!(locale, "locale invalidated");
        }
        removed
    }

    fn start_load(&self, locale: &str) -> LoadFuture {
        let provider = Arc::clone(&self.provider);
        let locale = locale.to_string();
        async move { provider.load(&locale).await.map(Arc::new) }
            .boxed()
            .shared()
    }

    fn slots(&self) -> MutexGuard<'_, BTreeMap<String, Slot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::Manager;
    use crate::error::{SourceError, ValidationError};
    use crate::parser::JsonParser;
    use crate::provider::ValidatingProvider;
    use crate::source::{ByteSource, MemorySource};
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use typed_i18n_core::{OperationSpec, ParamType, Value};

    #[derive(Clone, Default)]
    struct CountingSource {
        locales: Arc<Mutex<BTreeMap<String, String>>>,
        fetches: Arc<AtomicUsize>,
        delay: Option<Duration>,
    }

    impl CountingSource {
        fn with(self, locale: &str, contents: &str) -> Self {
            self.set(locale, contents);
            self
        }

        fn set(&self, locale: &str, contents: &str) {
            self.locales
                .lock()
                .expect("lock")
                .insert(locale.to_string(), contents.to_string());
        }

        fn fetches(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    impl ByteSource for CountingSource {
        async fn fetch(&self, locale: &str) -> Result<Vec<u8>, SourceError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            let contents = self.locales.lock().expect("lock").get(locale).cloned();
            contents
                .map(String::into_bytes)
                .ok_or_else(|| SourceError::NotFound(locale.to_string()))
        }
    }

    fn spec() -> OperationSpec {
        let sub = OperationSpec::builder()
            .leaf("yo", [] as [(&str, ParamType); 0])
            .build()
            .expect("sub");
        OperationSpec::builder()
            .leaf("hello", [("name", ParamType::Str)])
            .leaf("oranges", [("number", ParamType::Int)])
            .group("sub", sub)
            .build()
            .expect("spec")
    }

    const EN: &str = r#"{"hello": "Hi ::name::!", "oranges": "There are ::number:: orange(s)!", "sub": {"yo": "Yo!"}}"#;
    const FR: &str = r#"{"hello": "Salut ::name:: !", "oranges": "Il y a ::number:: orange(s) !", "sub": {"yo": "Yo !"}}"#;

    fn manager(source: CountingSource) -> Manager<CountingSource, JsonParser> {
        Manager::new(ValidatingProvider::new(source, JsonParser, spec()))
    }

    #[tokio::test]
    async fn prepare_then_translate() {
        let manager = manager(CountingSource::default().with("en", EN));
        manager.prepare(["en"]).await.expect("prepare");
        let en = manager.language("en").expect("translator");
        assert_eq!(
            en.call("hello", &[Value::from("Nova")]).expect("call"),
            "Hi Nova!"
        );
        assert_eq!(
            en.call("oranges", &[Value::from(4)]).expect("call"),
            "There are 4 orange(s)!"
        );
        let sub = en.group("sub").expect("group");
        assert_eq!(sub.call("yo", &[]).expect("call"), "Yo!");
    }

    #[tokio::test]
    async fn prepare_is_idempotent() {
        let source = CountingSource::default().with("en", EN);
        let manager = manager(source.clone());
        manager.prepare(["en"]).await.expect("first");
        manager.prepare(["en"]).await.expect("second");
        assert_eq!(source.fetches(), 1);
        assert!(manager.is_prepared("en"));
    }

    #[tokio::test]
    async fn duplicate_codes_in_one_batch_fetch_once() {
        let source = CountingSource::default().with("en", EN);
        let manager = manager(source.clone());
        manager.prepare(["en", "en"]).await.expect("prepare");
        assert_eq!(source.fetches(), 1);
    }

    #[tokio::test]
    async fn concurrent_prepares_are_coalesced() {
        let source = CountingSource {
            delay: Some(Duration::from_millis(20)),
            ..CountingSource::default()
        }
        .with("en", EN);
        let manager = manager(source.clone());
        let (a, b, c) = tokio::join!(
            manager.prepare(["en"]),
            manager.prepare(["en"]),
            manager.prepare_one("en"),
        );
        a.expect("a");
        b.expect("b");
        c.expect("c");
        assert_eq!(source.fetches(), 1);
    }

    #[tokio::test]
    async fn language_requires_prepare() {
        let manager = manager(CountingSource::default().with("fr", FR));
        let err = manager.language("fr").expect_err("not prepared");
        assert_eq!(err, ValidationError::NotPrepared("fr".to_string()));
    }

    #[tokio::test]
    async fn partial_success_is_retained() {
        let source = CountingSource::default()
            .with("en", EN)
            .with("de", r#"{"hello": "Hallo"}"#);
        let manager = manager(source);
        let err = manager
            .prepare(["en", "de", "fr"])
            .await
            .expect_err("should fail");
        assert_eq!(err.locale(), "de");
        assert!(manager.is_prepared("en"));
        assert!(!manager.is_prepared("de"));
        assert!(!manager.is_prepared("fr"));
        assert_eq!(manager.prepared_locales(), ["en"]);
    }

    #[tokio::test]
    async fn failed_locale_is_fetched_again() {
        let source = CountingSource::default().with("en", "{}");
        let manager = manager(source.clone());
        let err = manager.prepare(["en"]).await.expect_err("should fail");
        assert!(matches!(err, ValidationError::MissingKey { .. }));
        source.set("en", EN);
        manager.prepare(["en"]).await.expect("retry");
        assert_eq!(source.fetches(), 2);
        assert!(manager.language("en").is_ok());
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let source = CountingSource::default().with("en", EN);
        let manager = manager(source.clone());
        manager.prepare(["en"]).await.expect("prepare");
        let before = manager.prepared("en").expect("prepared").digest();

        source.set("en", &EN.replace("Hi", "Hello"));
        assert!(manager.invalidate("en"));
        assert!(!manager.invalidate("en"));
        assert!(manager.language("en").is_err());

        manager.prepare(["en"]).await.expect("prepare again");
        assert_eq!(source.fetches(), 2);
        let after = manager.prepared("en").expect("prepared").digest();
        assert_ne!(before, after);
        let en = manager.language("en").expect("translator");
        assert_eq!(
            en.call("hello", &[Value::from("Nova")]).expect("call"),
            "Hello Nova!"
        );
    }

    #[tokio::test]
    async fn invalidated_in_flight_load_is_not_cached() {
        let source = CountingSource {
            delay: Some(Duration::from_millis(20)),
            ..CountingSource::default()
        }
        .with("en", EN);
        let manager = manager(source);
        let (outcome, _) = tokio::join!(manager.prepare_one("en"), async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            manager.invalidate("en")
        });
        outcome.expect("load still completes");
        assert!(!manager.is_prepared("en"));
    }

    #[tokio::test]
    async fn cancelled_prepare_leaves_cache_usable() {
        let source = CountingSource {
            delay: Some(Duration::from_millis(50)),
            ..CountingSource::default()
        }
        .with("en", EN);
        let manager = manager(source.clone());
        let cancelled =
            tokio::time::timeout(Duration::from_millis(5), manager.prepare(["en"])).await;
        assert!(cancelled.is_err());
        assert!(!manager.is_prepared("en"));

        manager.prepare(["en"]).await.expect("prepare");
        assert!(manager.is_prepared("en"));
        assert_eq!(source.fetches(), 1);
    }

    #[tokio::test]
    async fn works_with_memory_source() {
        let source = MemorySource::new().with("fr", FR);
        let manager = Manager::new(ValidatingProvider::new(source, JsonParser, spec()));
        manager.prepare(["fr"]).await.expect("prepare");
        let fr = manager.language("fr").expect("translator");
        assert_eq!(
            fr.call_at("sub.yo", &[]).expect("call"),
            "Yo !"
        );
    }
}
