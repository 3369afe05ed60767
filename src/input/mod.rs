//! Translation file inputs.
/// Translation file loading and flattening
pub mod translation;

pub use translation::{
    FlatMap,
    FsJsonLoader,
    JsonLoader,
    LoadError,
    TranslationTree,
    flatten,
    load_translation_file,
    load_translation_files,
};
