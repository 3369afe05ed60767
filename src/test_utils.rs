//! Helpers shared by unit tests.
#![cfg(test)]
#![allow(clippy::unwrap_used, clippy::panic)]

use std::fs;
use std::path::Path;
use std::sync::atomic::{
    AtomicUsize,
    Ordering,
};

use serde_json::Value;

use crate::input::{
    FsJsonLoader,
    JsonLoader,
    LoadError,
    TranslationTree,
};

/// Unwrap a `json!` object literal into a translation tree.
pub(crate) fn tree(value: Value) -> TranslationTree {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

/// Write `value` as JSON to `root/relative`, creating parent directories.
pub(crate) fn write_json(root: &Path, relative: &str, value: &Value) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, value.to_string()).unwrap();
}

/// Filesystem loader that counts how many files it has read.
#[derive(Debug, Default)]
pub(crate) struct CountingLoader {
    /// Files read so far
    calls: AtomicUsize,
}

impl CountingLoader {
    /// Number of files read so far.
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl JsonLoader for CountingLoader {
    fn load_json(&self, path: &Path) -> Result<Value, LoadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        FsJsonLoader.load_json(path)
    }
}
