//! Registry that discovers units on disk.

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ModuleLocation,
    ModuleRegistry,
    RegistryError,
};

/// Registry that finds units by their on-disk layout.
///
/// Roots are searched in order and the first root containing the unit wins,
/// so custom component directories should come before built-in ones.
///
/// # Layouts
/// - package component: `<root>/light/__init__.py`
/// - single-file component: `<root>/group.py`
/// - platform inside its domain: `<root>/light/hue.py`
/// - platform inside its own package: `<root>/hue/light.py`
#[derive(Debug, Clone)]
pub struct FilesystemRegistry {
    /// Directories searched in order
    roots: Vec<PathBuf>,
    /// Extension of module files, without the dot
    module_extension: String,
    /// File stem of a package's entry module
    package_entry: String,
}

impl FilesystemRegistry {
    /// Search `roots` for `.py` modules with `__init__` package entries.
    #[must_use]
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots, module_extension: "py".to_string(), package_entry: "__init__".to_string() }
    }

    /// Use `extension` for module files.
    #[must_use]
    pub fn with_module_extension(mut self, extension: impl Into<String>) -> Self {
        self.module_extension = extension.into();
        self
    }

    /// Use `entry` as the package entry file stem.
    #[must_use]
    pub fn with_package_entry(mut self, entry: impl Into<String>) -> Self {
        self.package_entry = entry.into();
        self
    }

    /// Search roots, in priority order.
    #[must_use]
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// `dir/stem.<ext>`
    fn module_file(&self, dir: &Path, stem: &str) -> PathBuf {
        dir.join(format!("{stem}.{}", self.module_extension))
    }

    /// Look for the component under one root, package layout first.
    fn find_component(&self, root: &Path, name: &str) -> Option<ModuleLocation> {
        let entry = self.module_file(&root.join(name), &self.package_entry);
        if entry.is_file() {
            return Some(ModuleLocation::new(entry, name, name));
        }

        let single = self.module_file(root, name);
        if single.is_file() {
            let package = dir_name(root);
            let module = format!("{package}.{name}");
            return Some(ModuleLocation::new(single, package, module));
        }

        None
    }

    /// Look for the platform under one root, inside its domain first.
    fn find_platform(&self, root: &Path, domain: &str, platform: &str) -> Option<ModuleLocation> {
        let inside_domain = self.module_file(&root.join(domain), platform);
        if inside_domain.is_file() {
            return Some(ModuleLocation::new(inside_domain, domain, format!("{domain}.{platform}")));
        }

        let inside_platform = self.module_file(&root.join(platform), domain);
        if inside_platform.is_file() {
            return Some(ModuleLocation::new(
                inside_platform,
                platform,
                format!("{platform}.{domain}"),
            ));
        }

        None
    }
}

/// Last path component of `dir`, empty if it has none.
fn dir_name(dir: &Path) -> String {
    dir.file_name().map(|name| name.to_string_lossy().to_string()).unwrap_or_default()
}

impl ModuleRegistry for FilesystemRegistry {
    fn component_module(&self, name: &str) -> Result<ModuleLocation, RegistryError> {
        let location = self.roots.iter().find_map(|root| self.find_component(root, name));
        tracing::debug!(component = name, ?location, "Component lookup");
        location.ok_or_else(|| RegistryError::ComponentNotFound(name.to_string()))
    }

    fn platform_module(
        &self,
        domain: &str,
        platform: &str,
    ) -> Result<ModuleLocation, RegistryError> {
        let location =
            self.roots.iter().find_map(|root| self.find_platform(root, domain, platform));
        tracing::debug!(domain, platform, ?location, "Platform lookup");
        location.ok_or_else(|| RegistryError::PlatformNotFound {
            domain: domain.to_string(),
            platform: platform.to_string(),
        })
    }
}
