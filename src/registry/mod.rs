//! Lookup of loaded components and platforms.
/// Filesystem-backed registry
mod filesystem;
/// In-memory registry
mod memory;
/// Registry trait and location records
mod types;

pub use filesystem::FilesystemRegistry;
pub use memory::StaticRegistry;
pub use types::{
    ModuleLocation,
    ModuleRegistry,
    RegistryError,
};
