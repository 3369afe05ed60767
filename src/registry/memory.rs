//! Registry backed by explicitly registered locations.

use std::collections::HashMap;

use super::{
    ModuleLocation,
    ModuleRegistry,
    RegistryError,
};

/// Registry over a fixed set of units, for hosts that already know where
/// everything lives.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    /// Component name → location
    components: HashMap<String, ModuleLocation>,
    /// (domain, platform) → location
    platforms: HashMap<(String, String), ModuleLocation>,
}

impl StaticRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component.
    #[must_use]
    pub fn with_component(mut self, name: impl Into<String>, location: ModuleLocation) -> Self {
        self.components.insert(name.into(), location);
        self
    }

    /// Register a platform.
    #[must_use]
    pub fn with_platform(
        mut self,
        domain: impl Into<String>,
        platform: impl Into<String>,
        location: ModuleLocation,
    ) -> Self {
        self.platforms.insert((domain.into(), platform.into()), location);
        self
    }
}

impl ModuleRegistry for StaticRegistry {
    fn component_module(&self, name: &str) -> Result<ModuleLocation, RegistryError> {
        self.components
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::ComponentNotFound(name.to_string()))
    }

    fn platform_module(
        &self,
        domain: &str,
        platform: &str,
    ) -> Result<ModuleLocation, RegistryError> {
        self.platforms.get(&(domain.to_string(), platform.to_string())).cloned().ok_or_else(|| {
            RegistryError::PlatformNotFound {
                domain: domain.to_string(),
                platform: platform.to_string(),
            }
        })
    }
}
