//! Environment variable source: BOOTFXD__* prefix with __ separator

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment};

/// Add environment variable overlay to builder.
/// `BOOTFXD__SCAN__ROOT=/mnt` sets `scan.root`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(
        Environment::with_prefix("BOOTFXD")
            .separator("__")
            .try_parsing(true),
    ))
}
