//! Settings types and validation.

use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// A rejected settings value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "loading.maxConcurrentLoads")
    pub field_path: String,
    /// Human-readable explanation
    pub message: String,
}

impl ValidationError {
    /// Create a validation error for `field_path`.
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

/// Failures while loading settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// One or more values failed validation
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    /// The settings file could not be read
    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// The settings file is not valid JSON for the schema
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// One numbered line per error.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Settings read from `.component-translations.json`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationSettings {
    /// Language whose strings fill keys missing from the requested language.
    pub default_language: String,

    /// Directory, next to each unit, holding its translation files.
    pub translations_dir: String,
    /// Extension of translation files, without the dot.
    pub file_extension: String,

    /// Directories searched for components, in priority order.
    pub component_roots: Vec<PathBuf>,
    /// Extension of module files, without the dot.
    pub module_extension: String,
    /// File stem that marks a directory as a package component.
    pub package_entry: String,

    /// File loading limits.
    pub loading: LoadingConfig,
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
            translations_dir: ".translations".to_string(),
            file_extension: "json".to_string(),
            component_roots: Vec::new(),
            module_extension: "py".to_string(),
            package_entry: "__init__".to_string(),
            loading: LoadingConfig::default(),
        }
    }
}

/// Limits applied while reading translation files.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct LoadingConfig {
    /// Translation files read in parallel per batch.
    /// Default: 80% of CPU cores (minimum 1).
    pub max_concurrent_loads: Option<usize>,
}

impl LoadingConfig {
    /// Configured concurrency, or the CPU-based default.
    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.max_concurrent_loads.unwrap_or_else(|| (num_cpus::get() * 4 / 5).max(1))
    }
}

impl TranslationSettings {
    /// Check values that deserialize but cannot be used.
    ///
    /// # Errors
    /// - Required field is empty
    /// - Directory or extension contains a path separator
    /// - Zero concurrency
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.default_language.is_empty() {
            errors.push(ValidationError::new(
                "defaultLanguage",
                "The default language cannot be empty. Example: \"en\"",
            ));
        }

        for (field, value) in [
            ("translationsDir", &self.translations_dir),
            ("fileExtension", &self.file_extension),
            ("moduleExtension", &self.module_extension),
            ("packageEntry", &self.package_entry),
        ] {
            if value.is_empty() {
                errors.push(ValidationError::new(field, "The value cannot be empty"));
            } else if value.contains(['/', '\\']) {
                errors.push(ValidationError::new(
                    field,
                    format!("'{value}' must be a single name without path separators"),
                ));
            }
        }

        if self.loading.max_concurrent_loads == Some(0) {
            errors.push(ValidationError::new(
                "loading.maxConcurrentLoads",
                "At least one concurrent load is required. Remove this field to use the default",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
