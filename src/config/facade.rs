//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::BootfxdConfig;
use config::ConfigError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from the global config file (if any) and environment.
    pub fn load() -> Result<BootfxdConfig, ConfigError> {
        MergeService::load()
    }

    /// Load from a specific file and environment.
    pub fn load_from_file(path: &Path) -> Result<BootfxdConfig, ConfigError> {
        MergeService::load_from_file(path)
    }

    /// Load from `path` when given, otherwise from the standard sources.
    pub fn resolve(path: Option<&Path>) -> Result<BootfxdConfig, ConfigError> {
        match path {
            Some(p) => Self::load_from_file(p),
            None => Self::load(),
        }
    }
}
