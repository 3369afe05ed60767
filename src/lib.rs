//! component-translations
//!
//! Resolves, caches and merges translation files for the components and
//! platforms an application has loaded, with default-language fallback.

/// Identifiers that currently need translations
pub mod active;
/// Settings and their loading
pub mod config;
/// Component and platform identifiers
pub mod identifier;
/// Translation file loading
pub mod input;
/// Lookup of loaded units
pub mod registry;
/// Translation file location rules
pub mod resolver;
/// Merged resources, cache and service
pub mod resources;
/// Unit test helpers
mod test_utils;

pub use active::{
    ActiveComponents,
    ActiveSet,
};
pub use identifier::Identifier;
pub use resources::{
    TranslationCache,
    TranslationError,
    TranslationService,
};
