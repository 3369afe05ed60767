//! Translation file loading and key flattening.

use std::collections::{
    BTreeMap,
    HashMap,
};
use std::path::{
    Path,
    PathBuf,
};
use std::sync::Arc;

use futures::{
    StreamExt,
    TryStreamExt,
};
use serde_json::{
    Map,
    Value,
};
use thiserror::Error;

use crate::identifier::Identifier;

/// Parsed content of one translation file. Always a JSON object.
pub type TranslationTree = Map<String, Value>;

/// Dot-separated key → display string (e.g., "state.on" → "On").
pub type FlatMap = BTreeMap<String, String>;

/// Why a translation file could not be loaded.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be read
    #[error("Failed to read translation file {}: {source}", path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid JSON
    #[error("Failed to parse translation file {}: {source}", path.display())]
    Parse {
        /// File that failed
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },
    /// The top-level value is not an object
    #[error("Translation file {} must contain a JSON object at the top level", path.display())]
    NotAnObject {
        /// File that failed
        path: PathBuf,
    },
    /// The blocking read task panicked or was cancelled
    #[error("Translation load task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Reads a document from disk and parses it as JSON.
pub trait JsonLoader: Send + Sync {
    /// Read `path` and parse its content.
    fn load_json(&self, path: &Path) -> Result<Value, LoadError>;
}

/// [`JsonLoader`] backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsJsonLoader;

impl JsonLoader for FsJsonLoader {
    fn load_json(&self, path: &Path) -> Result<Value, LoadError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;

        serde_json::from_str(&content)
            .map_err(|source| LoadError::Parse { path: path.to_path_buf(), source })
    }
}

/// Load a single translation file.
///
/// # Errors
/// Returns error if the file cannot be read, is not JSON, or is not an object.
pub fn load_translation_file(
    loader: &dyn JsonLoader,
    path: &Path,
) -> Result<TranslationTree, LoadError> {
    match loader.load_json(path)? {
        Value::Object(tree) => Ok(tree),
        _ => Err(LoadError::NotAnObject { path: path.to_path_buf() }),
    }
}

/// Load a batch of translation files.
///
/// Files are read on the blocking pool, at most `concurrency` at a time.
/// The first failure aborts the whole batch and nothing is returned for the
/// files that did load.
pub async fn load_translation_files(
    loader: Arc<dyn JsonLoader>,
    files: Vec<(Identifier, PathBuf)>,
    concurrency: usize,
) -> Result<HashMap<Identifier, TranslationTree>, LoadError> {
    tracing::debug!(count = files.len(), concurrency, "Loading translation files");

    futures::stream::iter(files)
        .map(|(identifier, path)| {
            let loader = Arc::clone(&loader);
            async move {
                let tree = tokio::task::spawn_blocking(move || {
                    load_translation_file(loader.as_ref(), &path)
                })
                .await??;
                Ok::<_, LoadError>((identifier, tree))
            }
        })
        .buffered(concurrency.max(1))
        .try_collect()
        .await
}

/// Flatten a translation tree into dot-separated keys.
///
/// Nested objects are descended into; every other value is a leaf. String
/// leaves are kept as-is and other leaves are rendered as JSON text.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use component_translations::input::translation::flatten;
///
/// let json = json!({
///     "state": {
///         "on": "On",
///         "off": "Off"
///     }
/// });
///
/// let flattened = flatten(json.as_object().unwrap());
/// assert_eq!(flattened.get("state.on"), Some(&"On".to_string()));
/// assert_eq!(flattened.get("state.off"), Some(&"Off".to_string()));
/// ```
#[must_use]
pub fn flatten(tree: &TranslationTree) -> FlatMap {
    let mut result = FlatMap::new();
    flatten_tree(tree, "", &mut result);
    result
}

/// Insert the leaves of `tree` into `result`, keys prefixed with `prefix`.
fn flatten_tree(tree: &TranslationTree, prefix: &str, result: &mut FlatMap) {
    for (key, value) in tree {
        match value {
            Value::Object(map) => flatten_tree(map, &format!("{prefix}{key}."), result),
            Value::String(s) => {
                result.insert(format!("{prefix}{key}"), s.clone());
            }
            _ => {
                result.insert(format!("{prefix}{key}"), value.to_string());
            }
        }
    }
}
