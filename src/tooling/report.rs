//! Status line rendering and exit codes.

use crate::compare::CompareResult;
use crate::error::ApiError;
use crate::monitor::{CaptureOutcome, ScanOutcome};
use crate::tooling::cli::OutputFormat;
use crate::types::ComponentKey;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::Serialize;

pub const EXIT_OK: i32 = 0;
pub const EXIT_ERROR: i32 = 1;
pub const EXIT_TAMPERED: i32 = 2;

/// Successful command result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandReport {
    BaselineCreated(CaptureOutcome),
    Scan(ScanOutcome),
}

/// The one line of structured output each invocation prints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StatusLine {
    BaselineCreated {
        entries: usize,
    },
    Clean,
    Tampered {
        modified: Vec<ComponentKey>,
        added: Vec<ComponentKey>,
        removed: Vec<ComponentKey>,
    },
    Error {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        detail: Option<String>,
    },
}

impl StatusLine {
    pub fn error(message: &str, detail: Option<String>) -> Self {
        StatusLine::Error {
            message: message.to_string(),
            detail,
        }
    }

    pub fn from_result(result: &Result<CommandReport, ApiError>) -> Self {
        match result {
            Ok(CommandReport::BaselineCreated(outcome)) => StatusLine::BaselineCreated {
                entries: outcome.entries,
            },
            Ok(CommandReport::Scan(ScanOutcome::Clean)) => StatusLine::Clean,
            Ok(CommandReport::Scan(ScanOutcome::Tampered(CompareResult {
                modified,
                added,
                removed,
            }))) => StatusLine::Tampered {
                modified: modified.clone(),
                added: added.clone(),
                removed: removed.clone(),
            },
            Err(e) => StatusLine::error(e.status_code(), Some(e.to_string())),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            StatusLine::BaselineCreated { .. } | StatusLine::Clean => EXIT_OK,
            StatusLine::Tampered { .. } => EXIT_TAMPERED,
            StatusLine::Error { .. } => EXIT_ERROR,
        }
    }
}

/// Process exit code for a command result.
pub fn exit_code(result: &Result<CommandReport, ApiError>) -> i32 {
    StatusLine::from_result(result).exit_code()
}

/// Render a status line in the requested format.
pub fn render(status: &StatusLine, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string(status).unwrap_or_else(|_| {
            r#"{"status":"error","message":"render_failed"}"#.to_string()
        }),
        OutputFormat::Text => render_text(status),
    }
}

fn render_text(status: &StatusLine) -> String {
    match status {
        StatusLine::BaselineCreated { entries } => format!(
            "{} {} entries recorded",
            "BASELINE CREATED".green().bold(),
            entries
        ),
        StatusLine::Clean => format!(
            "{} boot surface matches baseline",
            "CLEAN".green().bold()
        ),
        StatusLine::Tampered {
            modified,
            added,
            removed,
        } => {
            let mut out = format!(
                "{} {} modified, {} added, {} removed\n",
                "TAMPERED".red().bold(),
                modified.len(),
                added.len(),
                removed.len()
            );
            let mut table = Table::new();
            table.load_preset(UTF8_BORDERS_ONLY);
            table.set_header(vec!["Change", "Component"]);
            for (label, keys) in [("modified", modified), ("added", added), ("removed", removed)] {
                for key in keys {
                    table.add_row(vec![label.to_string(), key.to_string()]);
                }
            }
            out.push_str(&table.to_string());
            out
        }
        StatusLine::Error { message, detail } => match detail {
            Some(detail) => format!("{} {}: {}", "ERROR".red().bold(), message, detail),
            None => format!("{} {}", "ERROR".red().bold(), message),
        },
    }
}
