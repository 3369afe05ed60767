//! Settings file loading.

use std::path::Path;

use super::{
    ConfigError,
    TranslationSettings,
};

/// Settings file name looked up in the workspace root.
pub const CONFIG_FILE_NAME: &str = ".component-translations.json";

/// Reads `.component-translations.json` from `workspace_root`.
///
/// # Returns
/// - `Ok(Some(settings))`: the file exists and parsed
/// - `Ok(None)`: there is no settings file
/// - `Err(ConfigError)`: the file could not be read or parsed
pub fn load_from_workspace(
    workspace_root: &Path,
) -> Result<Option<TranslationSettings>, ConfigError> {
    let config_path = workspace_root.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let settings: TranslationSettings = serde_json::from_str(&content)?;

    Ok(Some(settings))
}

/// Loads and validates settings, falling back to defaults when no file exists.
///
/// Relative `componentRoots` are resolved against `workspace_root`.
pub fn load_settings(workspace_root: Option<&Path>) -> Result<TranslationSettings, ConfigError> {
    let mut settings = match workspace_root {
        Some(root) => load_from_workspace(root)?.unwrap_or_default(),
        None => TranslationSettings::default(),
    };

    if let Some(root) = workspace_root {
        for component_root in &mut settings.component_roots {
            if component_root.is_relative() {
                *component_root = root.join(component_root.as_path());
            }
        }
    }

    settings.validate().map_err(ConfigError::ValidationErrors)?;
    tracing::debug!(?settings, "Settings loaded");

    Ok(settings)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    /// A present file is parsed
    #[rstest]
    fn test_load_from_workspace_with_valid_config() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), r#"{"defaultLanguage": "fr"}"#)
            .unwrap();

        let settings = load_from_workspace(temp_dir.path()).unwrap();

        assert_eq!(settings.unwrap().default_language, "fr");
    }

    /// A missing file is not an error
    #[rstest]
    fn test_load_from_workspace_no_config_file() {
        let temp_dir = TempDir::new().unwrap();

        let result = load_from_workspace(temp_dir.path());

        assert!(result.unwrap().is_none());
    }

    /// Malformed JSON is a parse error
    #[rstest]
    fn test_load_from_workspace_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "invalid json").unwrap();

        let result = load_from_workspace(temp_dir.path());

        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    /// No workspace means defaults
    #[rstest]
    fn test_load_settings_without_workspace() {
        let settings = load_settings(None).unwrap();

        assert_eq!(settings.default_language, "en");
    }

    /// Relative roots are joined to the workspace, absolute ones kept
    #[rstest]
    fn test_load_settings_resolves_relative_roots() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            r#"{"componentRoots": ["custom_components", "/abs/components"]}"#,
        )
        .unwrap();

        let settings = load_settings(Some(temp_dir.path())).unwrap();

        assert_eq!(
            settings.component_roots,
            vec![temp_dir.path().join("custom_components"), "/abs/components".into()]
        );
    }

    /// Loaded settings are validated
    #[rstest]
    fn test_load_settings_rejects_invalid_values() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), r#"{"defaultLanguage": ""}"#).unwrap();

        let result = load_settings(Some(temp_dir.path()));

        assert!(matches!(result, Err(ConfigError::ValidationErrors(errors)) if errors.len() == 1));
    }
}
