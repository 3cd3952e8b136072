//! Baseline Store
//!
//! Persists a snapshot as a flat JSON object, one `"<key>": "<digest>"` pair per line.
//! Loading is best-effort: a missing file is an empty snapshot, and a damaged file yields
//! whichever entries still parse.

use crate::error::StorageError;
use crate::types::{ComponentKey, HashDigest, Snapshot};
use serde_json::{Map, Value};
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default baseline location, relative to the working directory.
pub const DEFAULT_BASELINE_PATH: &str = "output/baseline.json";

/// Baseline Store interface
pub trait BaselineStore {
    /// Write the snapshot, replacing any previous baseline. On failure the previous
    /// baseline is left as it was.
    fn save(&self, snapshot: &Snapshot) -> Result<(), StorageError>;

    /// Read the baseline. Empty means "not available".
    fn load(&self) -> Snapshot;

    fn location(&self) -> &Path;
}

/// File-backed baseline store.
#[derive(Debug, Clone)]
pub struct JsonBaselineStore {
    path: PathBuf,
}

impl JsonBaselineStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl BaselineStore for JsonBaselineStore {
    fn save(&self, snapshot: &Snapshot) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut body = serde_json::to_string_pretty(snapshot)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        body.push('\n');

        let staging = staging_path(&self.path);
        if let Err(e) = write_synced(&staging, body.as_bytes())
            .and_then(|()| fs::rename(&staging, &self.path))
        {
            let _ = fs::remove_file(&staging);
            return Err(e.into());
        }
        debug!(
            "Wrote {} baseline entries to {}",
            snapshot.len(),
            self.path.display()
        );
        Ok(())
    }

    fn load(&self) -> Snapshot {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No baseline at {}", self.path.display());
                return Snapshot::new();
            }
            Err(e) => {
                warn!("Failed to read baseline {}: {}", self.path.display(), e);
                return Snapshot::new();
            }
        };
        parse_baseline(&String::from_utf8_lossy(&bytes))
    }

    fn location(&self) -> &Path {
        &self.path
    }
}

/// Sibling file the baseline is written to before it is renamed into place.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".partial");
    path.with_file_name(name)
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

/// Parse baseline text. Falls back to a line-by-line scan when the document is not
/// valid JSON.
pub fn parse_baseline(content: &str) -> Snapshot {
    match serde_json::from_str::<Map<String, Value>>(content) {
        Ok(map) => map
            .into_iter()
            .filter_map(|(key, value)| match value.as_str() {
                Some(digest) => parse_entry(&key, digest),
                None => {
                    warn!("Skipping baseline entry {} with non-string value", key);
                    None
                }
            })
            .collect(),
        Err(e) => {
            warn!("Baseline is not valid JSON ({}), recovering line by line", e);
            content
                .lines()
                .filter_map(quoted_pair)
                .filter_map(|(key, digest)| parse_entry(&key, &digest))
                .collect()
        }
    }
}

fn parse_entry(key: &str, digest: &str) -> Option<(ComponentKey, HashDigest)> {
    let parsed_key = match key.parse::<ComponentKey>() {
        Ok(k) => k,
        Err(e) => {
            warn!("Skipping baseline entry: {}", e);
            return None;
        }
    };
    match HashDigest::parse(digest) {
        Some(d) => Some((parsed_key, d)),
        None => {
            warn!("Skipping baseline entry {} with malformed digest", key);
            None
        }
    }
}

/// Decode the first two JSON string literals on a line.
fn quoted_pair(line: &str) -> Option<(String, String)> {
    let mut rest = line;
    let key = next_quoted(&mut rest)?;
    let value = next_quoted(&mut rest)?;
    Some((key, value))
}

/// Consume up to and including the next complete `"..."` token and decode its escapes.
/// An unterminated token or a bad escape yields `None`.
fn next_quoted(rest: &mut &str) -> Option<String> {
    let start = rest.find('"')?;
    let body = &rest[start..];
    let mut escaped = false;
    for (i, c) in body.char_indices().skip(1) {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => {
                let token = &body[..=i];
                *rest = &body[i + 1..];
                return match serde_json::from_str::<String>(token) {
                    Ok(decoded) => Some(decoded),
                    Err(e) => {
                        warn!("Skipping baseline token {}: {}", token, e);
                        None
                    }
                };
            }
            _ => {}
        }
    }
    None
}
