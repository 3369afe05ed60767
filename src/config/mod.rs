//! Settings for locating and loading translation files.
/// Settings file loader
mod loader;
/// Settings types and validation
mod types;

pub use loader::{
    CONFIG_FILE_NAME,
    load_from_workspace,
    load_settings,
};
pub use types::{
    ConfigError,
    LoadingConfig,
    TranslationSettings,
    ValidationError,
};
