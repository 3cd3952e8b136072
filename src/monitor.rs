//! Integrity Monitor
//!
//! Composes the scanner, baseline store and differ into the two operator-facing
//! operations: capture a baseline, and rescan against it.

use crate::baseline::BaselineStore;
use crate::compare::{compare, CompareResult};
use crate::error::ApiError;
use crate::scanner::BootSurfaceScanner;
use crate::types::BootMode;
use tracing::{info, warn};

/// Successful capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureOutcome {
    pub mode: BootMode,
    pub entries: usize,
    pub skipped: usize,
}

/// Successful rescan: either nothing changed, or the differences found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Clean,
    Tampered(CompareResult),
}

impl ScanOutcome {
    pub fn is_clean(&self) -> bool {
        matches!(self, ScanOutcome::Clean)
    }
}

/// Orchestrator over a scanner and a baseline store.
pub struct IntegrityMonitor<S: BaselineStore> {
    scanner: BootSurfaceScanner,
    store: S,
}

impl<S: BaselineStore> IntegrityMonitor<S> {
    pub fn new(scanner: BootSurfaceScanner, store: S) -> Self {
        Self { scanner, store }
    }

    /// Hash the boot surface and persist it as the new baseline.
    ///
    /// An empty collection is never persisted.
    pub fn capture(&self) -> Result<CaptureOutcome, ApiError> {
        let collection = self.scanner.collect();

        if collection.snapshot.is_empty() {
            if collection.targets_present == 0 {
                warn!("No boot targets exist under the configured policy");
                return Err(ApiError::NoBootSurface);
            }
            warn!(
                targets = collection.targets_present,
                "Every present boot target failed to hash"
            );
            return Err(ApiError::HashCollectionFailed {
                targets: collection.targets_present,
            });
        }

        self.store
            .save(&collection.snapshot)
            .map_err(ApiError::BaselinePersistFailed)?;

        info!(
            entries = collection.snapshot.len(),
            skipped = collection.skipped,
            baseline = %self.store.location().display(),
            "Baseline created"
        );
        Ok(CaptureOutcome {
            mode: collection.mode,
            entries: collection.snapshot.len(),
            skipped: collection.skipped,
        })
    }

    /// Load the baseline, hash the current boot surface and diff the two.
    pub fn rescan(&self) -> Result<ScanOutcome, ApiError> {
        let baseline = self.store.load();
        if baseline.is_empty() {
            return Err(ApiError::BaselineMissing {
                path: self.store.location().to_path_buf(),
            });
        }

        let current = self.scanner.collect_hashes();
        let result = compare(&baseline, &current);

        if result.is_clean() {
            info!(entries = baseline.len(), "Boot surface matches baseline");
            return Ok(ScanOutcome::Clean);
        }

        warn!(
            modified = result.modified.len(),
            added = result.added.len(),
            removed = result.removed.len(),
            "Boot surface differs from baseline"
        );
        Ok(ScanOutcome::Tampered(result))
    }
}
