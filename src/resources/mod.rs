//! Per-domain translation resources with a per-language cache.
/// Per-domain grouping and namespacing
pub mod aggregate;
/// Per-language translation cache
mod cache;
/// Resolution errors
mod error;
/// Cached resolution with fallback
mod service;

pub use aggregate::{
    Resources,
    build_resources,
    component_resources,
};
pub use cache::{
    LanguageCache,
    TranslationCache,
};
pub use error::TranslationError;
pub use service::TranslationService;
