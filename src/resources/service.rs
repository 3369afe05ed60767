//! Resolution of component translations with default-language fallback.

use std::collections::BTreeSet;
use std::sync::Arc;

use super::{
    TranslationCache,
    TranslationError,
    build_resources,
    component_resources,
};
use crate::active::ActiveSet;
use crate::config::TranslationSettings;
use crate::identifier::Identifier;
use crate::input::{
    FlatMap,
    FsJsonLoader,
    JsonLoader,
    load_translation_files,
};
use crate::registry::{
    ModuleRegistry,
    RegistryError,
};
use crate::resolver::TranslationPaths;

/// Serves flattened component translations for a language.
#[derive(Clone)]
pub struct TranslationService {
    /// Maps identifiers to module locations
    registry: Arc<dyn ModuleRegistry>,
    /// Supplies the identifiers to serve
    active: Arc<dyn ActiveSet>,
    /// Reads translation files
    loader: Arc<dyn JsonLoader>,
    /// Per-language cache shared with other holders of the handle
    cache: TranslationCache,
    /// Translation file location rules
    paths: TranslationPaths,
    /// Language used to fill missing keys
    default_language: String,
    /// Files read in parallel per batch
    concurrency: usize,
}

impl std::fmt::Debug for TranslationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationService")
            .field("registry", &"<dyn ModuleRegistry>")
            .field("active", &"<dyn ActiveSet>")
            .field("cache", &self.cache)
            .field("paths", &self.paths)
            .field("default_language", &self.default_language)
            .field("concurrency", &self.concurrency)
            .finish_non_exhaustive()
    }
}

impl TranslationService {
    /// Create a service reading files from disk.
    #[must_use]
    pub fn new(
        registry: Arc<dyn ModuleRegistry>,
        active: Arc<dyn ActiveSet>,
        cache: TranslationCache,
        settings: &TranslationSettings,
    ) -> Self {
        Self {
            registry,
            active,
            loader: Arc::new(FsJsonLoader),
            cache,
            paths: TranslationPaths::from_settings(settings),
            default_language: settings.default_language.clone(),
            concurrency: settings.loading.concurrency(),
        }
    }

    /// Replace the filesystem JSON loader.
    #[must_use]
    pub fn with_loader(mut self, loader: Arc<dyn JsonLoader>) -> Self {
        self.loader = loader;
        self
    }

    /// The cache this service fills.
    #[must_use]
    pub const fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    /// Language whose strings fill missing keys.
    #[must_use]
    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Translations of every required identifier in `language` only.
    ///
    /// Identifiers that are not cached yet are resolved and loaded as one
    /// batch. The language partition stays locked while the batch loads, so a
    /// concurrent call for the same language waits and then reads the cache.
    ///
    /// # Errors
    /// - [`TranslationError::NotFound`]: an identifier is unknown to the registry
    /// - [`TranslationError::Load`]: a translation file could not be loaded;
    ///   nothing from the batch is cached
    pub async fn get_component_resources(
        &self,
        language: &str,
    ) -> Result<FlatMap, TranslationError> {
        let required = self.active.required_identifiers();
        let partition = self.cache.partition(language).await;
        let mut cache = partition.lock().await;

        let missing: BTreeSet<&Identifier> =
            required.iter().filter(|identifier| !cache.contains_key(*identifier)).collect();

        if !missing.is_empty() {
            let files = missing
                .into_iter()
                .map(|identifier| {
                    let path = self.paths.resolve(self.registry.as_ref(), identifier, language)?;
                    Ok((identifier.clone(), path))
                })
                .collect::<Result<Vec<_>, RegistryError>>()?;

            tracing::debug!(language, missing = files.len(), "Loading missing translations");
            let loaded =
                load_translation_files(Arc::clone(&self.loader), files, self.concurrency).await?;
            cache.extend(loaded);
        }

        let resources = build_resources(&cache, &required);
        drop(cache);

        Ok(component_resources(resources))
    }

    /// Translations for `language`, with gaps filled from the default language.
    ///
    /// # Errors
    /// Fails if either language fails; see [`Self::get_component_resources`].
    pub async fn get_translations(&self, language: &str) -> Result<FlatMap, TranslationError> {
        if language == self.default_language {
            return self.get_component_resources(language).await;
        }

        let (resources, mut merged) = tokio::try_join!(
            self.get_component_resources(language),
            self.get_component_resources(&self.default_language),
        )?;
        tracing::debug!(
            language,
            keys = resources.len(),
            fallback_keys = merged.len(),
            "Merging translations over default language"
        );

        merged.extend(resources);
        Ok(merged)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::active::ActiveComponents;
    use crate::input::LoadError;
    use crate::registry::{
        ModuleLocation,
        StaticRegistry,
    };
    use crate::test_utils::{
        CountingLoader,
        write_json,
    };

    /// Service over a temporary component root
    struct Fixture {
        /// Component root; removed on drop
        temp_dir: TempDir,
        /// Active set the service reads
        active: Arc<ActiveComponents>,
        /// Loader counting file reads
        loader: Arc<CountingLoader>,
        /// Service under test
        service: TranslationService,
    }

    impl Fixture {
        /// Write a translation file relative to the component root.
        fn write(&self, relative: &str, value: &serde_json::Value) {
            write_json(self.temp_dir.path(), relative, value);
        }
    }

    /// `light` is a package, `light.hue` lives in the `hue` package.
    fn fixture() -> Fixture {
        fixture_with(&TranslationSettings::default())
    }

    /// Same layout as [`fixture`] with custom settings.
    fn fixture_with(settings: &TranslationSettings) -> Fixture {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let registry = StaticRegistry::new()
            .with_component(
                "light",
                ModuleLocation::new(root.join("light/__init__.py"), "light", "light"),
            )
            .with_component("hue", ModuleLocation::new(root.join("hue/__init__.py"), "hue", "hue"))
            .with_platform(
                "light",
                "hue",
                ModuleLocation::new(root.join("hue/light.py"), "hue", "hue.light"),
            );
        let active = Arc::new(ActiveComponents::with_loaded([
            Identifier::component("light"),
            Identifier::platform("light", "hue"),
        ]));
        let loader = Arc::new(CountingLoader::default());
        let service =
            TranslationService::new(Arc::new(registry), active.clone(), TranslationCache::new(), settings)
                .with_loader(loader.clone());

        Fixture { temp_dir, active, loader, service }
    }

    /// A platform's value replaces its component's value for the same key
    #[tokio::test]
    async fn platform_overrides_component_key() {
        let f = fixture();
        f.write("light/.translations/en.json", &json!({ "state": { "on": "On" } }));
        f.write("hue/.translations/light.en.json", &json!({ "state": { "on": "On (Hue)" } }));

        let resources = f.service.get_component_resources("en").await.unwrap();

        assert_eq!(
            resources,
            FlatMap::from([("component.light.state.on".to_string(), "On (Hue)".to_string())])
        );
    }

    /// A repeated call with the same active set loads nothing
    #[tokio::test]
    async fn second_call_reads_cache_only() {
        let f = fixture();
        f.write("light/.translations/en.json", &json!({ "title": "Light" }));
        f.write("hue/.translations/light.en.json", &json!({ "hue": "Hue" }));

        let first = f.service.get_component_resources("en").await.unwrap();
        let second = f.service.get_component_resources("en").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(f.loader.calls(), 2);
    }

    /// An identifier that becomes active later is the only one loaded
    #[tokio::test]
    async fn newly_active_identifier_loads_only_the_miss() {
        let f = fixture();
        f.write("light/.translations/en.json", &json!({ "title": "Light" }));
        f.write("hue/.translations/light.en.json", &json!({ "hue": "Hue" }));
        f.write("hue/.translations/en.json", &json!({ "title": "Hue" }));

        f.service.get_component_resources("en").await.unwrap();
        f.active.begin_flow(Identifier::component("hue"));
        let resources = f.service.get_component_resources("en").await.unwrap();

        assert_eq!(f.loader.calls(), 3);
        assert_eq!(resources.get("component.hue.title"), Some(&"Hue".to_string()));
        assert_eq!(resources.get("component.light.title"), Some(&"Light".to_string()));
    }

    /// Keys missing from the requested language come from the default language
    #[tokio::test]
    async fn fallback_fills_missing_keys() {
        let f = fixture();
        f.write("light/.translations/en.json", &json!({ "state": { "on": "On", "off": "Off" } }));
        f.write("hue/.translations/light.en.json", &json!({}));
        f.write("light/.translations/nl.json", &json!({ "state": { "on": "Aan" } }));
        f.write("hue/.translations/light.nl.json", &json!({}));

        let translations = f.service.get_translations("nl").await.unwrap();

        assert_eq!(
            translations,
            FlatMap::from([
                ("component.light.state.off".to_string(), "Off".to_string()),
                ("component.light.state.on".to_string(), "Aan".to_string()),
            ])
        );
    }

    /// Requesting the default language resolves it only once
    #[tokio::test]
    async fn default_language_is_computed_once() {
        let f = fixture();
        f.write("light/.translations/en.json", &json!({ "title": "Light" }));
        f.write("hue/.translations/light.en.json", &json!({}));

        f.service.get_translations("en").await.unwrap();

        assert_eq!(f.loader.calls(), 2);
        assert_eq!(f.service.cache().languages().await, vec!["en".to_string()]);
    }

    /// A configured default language is the fallback and is resolved once when requested
    #[tokio::test]
    async fn configured_default_language() {
        let settings = TranslationSettings {
            default_language: "de".to_string(),
            ..TranslationSettings::default()
        };
        let f = fixture_with(&settings);
        f.write("light/.translations/de.json", &json!({ "state": { "on": "An", "off": "Aus" } }));
        f.write("hue/.translations/light.de.json", &json!({}));
        f.write("light/.translations/fr.json", &json!({ "state": { "on": "Allumé" } }));
        f.write("hue/.translations/light.fr.json", &json!({}));

        let german = f.service.get_translations("de").await.unwrap();

        assert_eq!(f.service.default_language(), "de");
        assert_eq!(f.loader.calls(), 2);
        assert_eq!(f.service.cache().languages().await, vec!["de".to_string()]);
        assert_eq!(german.get("component.light.state.on"), Some(&"An".to_string()));

        let french = f.service.get_translations("fr").await.unwrap();

        assert_eq!(
            french,
            FlatMap::from([
                ("component.light.state.off".to_string(), "Aus".to_string()),
                ("component.light.state.on".to_string(), "Allumé".to_string()),
            ])
        );
        assert_eq!(f.loader.calls(), 4);
        assert_eq!(f.service.cache().languages().await, vec!["de".to_string(), "fr".to_string()]);
    }

    /// A failed load leaves the partition empty and a later retry succeeds
    #[tokio::test]
    async fn failed_batch_caches_nothing() {
        let f = fixture();
        f.write("light/.translations/en.json", &json!({ "title": "Light" }));

        let result = f.service.get_component_resources("en").await;

        assert!(matches!(result, Err(TranslationError::Load(LoadError::Io { .. }))));
        assert!(f.service.cache().cached_identifiers("en").await.is_empty());

        f.write("hue/.translations/light.en.json", &json!({}));
        let retried = f.service.get_component_resources("en").await.unwrap();

        assert_eq!(retried.get("component.light.title"), Some(&"Light".to_string()));
    }

    /// An identifier unknown to the registry fails before any file is read
    #[tokio::test]
    async fn unknown_identifier_is_not_found() {
        let f = fixture();
        f.active.mark_loaded(Identifier::component("switch"));

        let result = f.service.get_component_resources("en").await;

        assert!(matches!(
            result,
            Err(TranslationError::NotFound(RegistryError::ComponentNotFound(name))) if name == "switch"
        ));
        assert_eq!(f.loader.calls(), 0);
    }

    /// Concurrent calls for one language read each file once
    #[tokio::test]
    async fn concurrent_same_language_calls_load_once() {
        let f = fixture();
        f.write("light/.translations/en.json", &json!({ "title": "Light" }));
        f.write("hue/.translations/light.en.json", &json!({}));

        let (first, second) = tokio::join!(
            f.service.get_component_resources("en"),
            f.service.get_component_resources("en"),
        );

        assert_eq!(first.unwrap(), second.unwrap());
        assert_eq!(f.loader.calls(), 2);
    }
}
