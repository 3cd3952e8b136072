//! CLI Tooling
//!
//! Command-line interface for capture and rescan. Every invocation resolves to exactly one
//! command; anything else is an argument error.

use crate::baseline::JsonBaselineStore;
use crate::config::{BootfxdConfig, ConfigLoader};
use crate::error::ApiError;
use crate::monitor::IntegrityMonitor;
use crate::tooling::report::CommandReport;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

/// bootfxd - boot-chain integrity checker
#[derive(Parser, Debug)]
#[command(name = "bootfxd", version)]
#[command(about = "Hash boot-critical files and detect modification, addition, or removal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Capture a baseline (same as `capture`)
    #[arg(long, conflicts_with = "scan")]
    pub init: bool,

    /// Rescan against the baseline (same as `rescan`)
    #[arg(long)]
    pub scan: bool,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Baseline file path
    #[arg(long, global = true)]
    pub baseline: Option<PathBuf>,

    /// Filesystem root the boot targets are resolved under
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Status output format
    #[arg(long, value_enum, default_value = "json", global = true)]
    pub format: OutputFormat,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Hash the boot surface and record it as the baseline
    #[command(visible_alias = "init")]
    Capture,
    /// Re-hash the boot surface and compare it against the baseline
    #[command(visible_alias = "scan")]
    Rescan,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

impl Cli {
    /// The single command this invocation asks for, if it is unambiguous.
    pub fn resolved_command(&self) -> Option<Commands> {
        match (self.command, self.init, self.scan) {
            (Some(command), false, false) => Some(command),
            (None, true, false) => Some(Commands::Capture),
            (None, false, true) => Some(Commands::Rescan),
            _ => None,
        }
    }

    /// Load configuration and apply command-line overrides on top.
    pub fn load_config(&self) -> Result<BootfxdConfig, ApiError> {
        let mut config = ConfigLoader::resolve(self.config.as_deref())?;

        if let Some(ref baseline) = self.baseline {
            config.baseline.path = baseline.clone();
        }
        if let Some(ref root) = self.root {
            config.scan.root = root.clone();
        }
        if self.verbose {
            config.logging.level = "debug".to_string();
        }
        if let Some(ref level) = self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(ref format) = self.log_format {
            config.logging.format = format.clone();
        }
        if let Some(ref output) = self.log_output {
            config.logging.output = output.clone();
        }
        if let Some(ref file) = self.log_file {
            config.logging.file = Some(file.clone());
        }

        Ok(config)
    }
}

/// Execution context: the monitor wired from configuration.
pub struct CliContext {
    monitor: IntegrityMonitor<JsonBaselineStore>,
}

impl CliContext {
    pub fn new(config: &BootfxdConfig) -> Self {
        let store = JsonBaselineStore::new(config.baseline.path.clone());
        Self {
            monitor: IntegrityMonitor::new(config.scan.scanner(), store),
        }
    }

    /// Execute a CLI command
    pub fn execute(&self, command: Commands) -> Result<CommandReport, ApiError> {
        let started = Instant::now();
        info!(command = ?command, "Executing command");

        let result = match command {
            Commands::Capture => self.monitor.capture().map(CommandReport::BaselineCreated),
            Commands::Rescan => self.monitor.rescan().map(CommandReport::Scan),
        };

        debug!(
            command = ?command,
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }
}
