//! Configuration
//!
//! Layered configuration via the `config` crate: built-in defaults, then the global or an
//! explicit config file, then `BOOTFXD__*` environment variables.

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;

pub use facade::ConfigLoader;

use crate::baseline::DEFAULT_BASELINE_PATH;
use crate::logging::LoggingConfig;
use crate::scanner::policy::ScanPolicy;
use crate::scanner::walker::WalkerConfig;
use crate::scanner::BootSurfaceScanner;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BootfxdConfig {
    #[serde(default)]
    pub baseline: BaselineConfig,

    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_baseline_path() -> PathBuf {
    PathBuf::from(DEFAULT_BASELINE_PATH)
}

/// Where the baseline lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaselineConfig {
    /// Relative paths resolve against the working directory.
    #[serde(default = "default_baseline_path")]
    pub path: PathBuf,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            path: default_baseline_path(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from("/")
}

/// Scanner settings. The targets themselves are fixed by policy; only the filesystem
/// root they hang off can move.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default = "default_root")]
    pub root: PathBuf,

    #[serde(default)]
    pub follow_symlinks: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            follow_symlinks: false,
        }
    }
}

impl ScanConfig {
    /// Build a scanner for this configuration.
    pub fn scanner(&self) -> BootSurfaceScanner {
        BootSurfaceScanner::new(ScanPolicy::rooted(&self.root)).with_walker_config(
            WalkerConfig {
                follow_symlinks: self.follow_symlinks,
            },
        )
    }
}
