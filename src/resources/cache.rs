//! Process-wide translation cache, partitioned by language.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{
    Mutex,
    RwLock,
};

use crate::identifier::Identifier;
use crate::input::TranslationTree;

/// Identifier → loaded tree, for one language.
pub type LanguageCache = HashMap<Identifier, TranslationTree>;

/// Shared handle to the translation cache.
///
/// Each language has its own partition behind its own lock, so work on one
/// language never waits for another. Partitions are created on first use and
/// entries are never evicted; the owner of the handle decides how long the
/// cache lives.
#[derive(Clone, Default)]
pub struct TranslationCache {
    /// Language code → partition
    languages: Arc<RwLock<HashMap<String, Arc<Mutex<LanguageCache>>>>>,
}

impl TranslationCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the partition for `language`, creating it if needed.
    pub async fn partition(&self, language: &str) -> Arc<Mutex<LanguageCache>> {
        if let Some(partition) = self.languages.read().await.get(language) {
            return Arc::clone(partition);
        }

        let mut languages = self.languages.write().await;
        Arc::clone(languages.entry(language.to_string()).or_default())
    }

    /// Identifiers with cached translations for `language`, sorted.
    pub async fn cached_identifiers(&self, language: &str) -> Vec<Identifier> {
        let Some(partition) = self.languages.read().await.get(language).map(Arc::clone) else {
            return Vec::new();
        };

        let mut identifiers: Vec<_> = partition.lock().await.keys().cloned().collect();
        identifiers.sort();
        identifiers
    }

    /// Languages that have a partition, sorted.
    pub async fn languages(&self) -> Vec<String> {
        let mut languages: Vec<_> = self.languages.read().await.keys().cloned().collect();
        languages.sort();
        languages
    }
}

impl std::fmt::Debug for TranslationCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationCache")
            .field("languages", &"<HashMap<String, LanguageCache>>")
            .finish()
    }
}
