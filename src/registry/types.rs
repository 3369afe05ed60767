//! Registry trait and the locations it returns.

use std::path::PathBuf;

use thiserror::Error;

/// Lookup failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No loaded unit for the component
    #[error("Component not found: {0}")]
    ComponentNotFound(String),
    /// No loaded unit for the platform
    #[error("Platform not found: {domain}.{platform}")]
    PlatformNotFound {
        /// Domain the platform extends
        domain: String,
        /// Name of the providing component
        platform: String,
    },
}

/// Where a loaded unit lives.
///
/// A unit whose `module_name` equals its `package_name` is the entry unit of a
/// package (e.g. `light/__init__.py`), anything else is a single module file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleLocation {
    /// Source file of the unit
    pub file_path: PathBuf,
    /// Package the unit belongs to
    pub package_name: String,
    /// Dotted module name of the unit
    pub module_name: String,
}

impl ModuleLocation {
    /// Create a location record.
    #[must_use]
    pub fn new(
        file_path: impl Into<PathBuf>,
        package_name: impl Into<String>,
        module_name: impl Into<String>,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            package_name: package_name.into(),
            module_name: module_name.into(),
        }
    }

    /// Whether this unit is the entry point of its own package.
    #[must_use]
    pub fn is_package(&self) -> bool {
        self.module_name == self.package_name
    }
}

/// Maps component and platform names to the units the host has loaded.
pub trait ModuleRegistry: Send + Sync {
    /// Location of the component `name`.
    fn component_module(&self, name: &str) -> Result<ModuleLocation, RegistryError>;

    /// Location of the `platform` platform of `domain`.
    fn platform_module(&self, domain: &str, platform: &str)
    -> Result<ModuleLocation, RegistryError>;
}
