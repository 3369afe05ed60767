//! Errors produced while resolving translations.

use thiserror::Error;

use crate::input::LoadError;
use crate::registry::RegistryError;

/// Why translations for a language could not be produced.
#[derive(Error, Debug)]
pub enum TranslationError {
    /// The registry does not know an active identifier
    #[error(transparent)]
    NotFound(#[from] RegistryError),
    /// A translation file failed to load
    #[error(transparent)]
    Load(#[from] LoadError),
}
