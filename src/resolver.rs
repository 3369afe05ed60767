//! Translation file location rules.

use std::path::{
    Path,
    PathBuf,
};

use crate::config::TranslationSettings;
use crate::identifier::Identifier;
use crate::registry::{
    ModuleRegistry,
    RegistryError,
};

/// Computes where a unit keeps its translation file for a language.
///
/// # Examples
/// - component package `light/__init__.py` → `light/.translations/nl.json`
/// - single-file component `group.py` → `.translations/group.nl.json`
/// - platform `light/hue.py` → `light/.translations/hue.nl.json`
/// - platform `hue/light.py` → `hue/.translations/light.nl.json`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationPaths {
    /// Directory next to each unit holding its files
    translations_dir: String,
    /// Extension of translation files, without the dot
    file_extension: String,
}

impl Default for TranslationPaths {
    fn default() -> Self {
        Self { translations_dir: ".translations".to_string(), file_extension: "json".to_string() }
    }
}

impl TranslationPaths {
    /// Locate files in `translations_dir` with `file_extension`.
    #[must_use]
    pub fn new(translations_dir: impl Into<String>, file_extension: impl Into<String>) -> Self {
        Self { translations_dir: translations_dir.into(), file_extension: file_extension.into() }
    }

    /// Location rules from loaded settings.
    #[must_use]
    pub fn from_settings(settings: &TranslationSettings) -> Self {
        Self::new(&settings.translations_dir, &settings.file_extension)
    }

    /// Returns the translation file for `identifier` in `language`.
    ///
    /// # Errors
    /// Returns [`RegistryError`] if the registry does not know the unit.
    pub fn resolve(
        &self,
        registry: &dyn ModuleRegistry,
        identifier: &Identifier,
        language: &str,
    ) -> Result<PathBuf, RegistryError> {
        let (dir, stem) = match identifier {
            Identifier::Component(name) => {
                let module = registry.component_module(name)?;
                let stem = if module.is_package() {
                    language.to_string()
                } else {
                    format!("{name}.{language}")
                };
                (parent_dir(&module.file_path), stem)
            }
            Identifier::Platform { domain, platform } => {
                let module = registry.platform_module(domain, platform)?;
                let dir = parent_dir(&module.file_path);
                // Comparing the directory avoids stripping the module extension.
                let owner = if dir_name_is(&dir, domain) { platform } else { domain };
                (dir, format!("{owner}.{language}"))
            }
        };

        Ok(dir.join(&self.translations_dir).join(format!("{stem}.{}", self.file_extension)))
    }
}

/// Directory containing `file_path`.
fn parent_dir(file_path: &Path) -> PathBuf {
    file_path.parent().map(Path::to_path_buf).unwrap_or_default()
}

/// Whether the last component of `dir` is `name`.
fn dir_name_is(dir: &Path, name: &str) -> bool {
    dir.file_name().is_some_and(|dir_name| dir_name == name)
}
