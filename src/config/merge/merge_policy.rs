//! Built-in defaults, applied before any file or environment source.

use crate::baseline::DEFAULT_BASELINE_PATH;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("baseline.path", DEFAULT_BASELINE_PATH)?
        .set_default("scan.root", "/")?
        .set_default("scan.follow_symlinks", false)
}
