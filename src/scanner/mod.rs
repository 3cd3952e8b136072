//! Boot Surface Scanner
//!
//! Detects the boot mode, then hashes every target the policy lists for that mode.
//! Nothing is cached: each call re-probes the firmware marker and re-walks the filesystem.

pub mod mode;
pub mod policy;
pub mod walker;

use crate::hashing;
use crate::types::{BootMode, ComponentKey, Snapshot};
use policy::{ScanPolicy, ScanTarget, TargetKind};
use std::path::Path;
use tracing::{debug, info};
use walker::{WalkStats, WalkerConfig};

pub use mode::detect_boot_mode;

/// Result of one collection pass.
#[derive(Debug, Clone)]
pub struct Collection {
    pub snapshot: Snapshot,
    pub mode: BootMode,
    /// Targets that existed on disk, whether or not they could be read.
    pub targets_present: usize,
    /// Entries dropped because they could not be read or hashed.
    pub skipped: usize,
}

/// Boot Surface Scanner
#[derive(Debug, Clone, Default)]
pub struct BootSurfaceScanner {
    policy: ScanPolicy,
    walker: WalkerConfig,
}

impl BootSurfaceScanner {
    pub fn new(policy: ScanPolicy) -> Self {
        Self {
            policy,
            walker: WalkerConfig::default(),
        }
    }

    pub fn with_walker_config(mut self, walker: WalkerConfig) -> Self {
        self.walker = walker;
        self
    }

    pub fn policy(&self) -> &ScanPolicy {
        &self.policy
    }

    pub fn detect_boot_mode(&self) -> BootMode {
        detect_boot_mode(&self.policy.firmware_marker)
    }

    /// Hash the boot surface and return only the snapshot.
    pub fn collect_hashes(&self) -> Snapshot {
        self.collect().snapshot
    }

    /// Hash the boot surface, keeping the counters the orchestrator needs to tell
    /// "nothing there" apart from "nothing readable".
    pub fn collect(&self) -> Collection {
        let mode = self.detect_boot_mode();
        info!(mode = %mode, "Collecting boot surface hashes");

        let mut collection = Collection {
            snapshot: Snapshot::new(),
            mode,
            targets_present: 0,
            skipped: 0,
        };

        for target in self.policy.targets_for(mode) {
            if !target_present(target) {
                debug!("Boot target {} not present", target.path.display());
                continue;
            }
            collection.targets_present += 1;

            let stats = self.measure(target, &mut collection.snapshot);
            info!(
                category = %target.category,
                path = %target.path.display(),
                hashed = stats.hashed,
                skipped = stats.skipped,
                "Measured boot target"
            );
            collection.skipped += stats.skipped;
        }

        collection
    }

    fn measure(&self, target: &ScanTarget, snapshot: &mut Snapshot) -> WalkStats {
        match target.kind {
            TargetKind::Tree => {
                walker::hash_tree(&target.path, target.category, &self.walker, snapshot)
            }
            TargetKind::DeviceBoot => match hashing::digest_device_boot(&target.path) {
                Ok(digest) => {
                    let key = ComponentKey::from_path(target.category, &target.path);
                    snapshot.insert(key, digest);
                    WalkStats {
                        hashed: 1,
                        skipped: 0,
                    }
                }
                Err(e) => {
                    debug!("Skipping boot record: {}", e);
                    WalkStats {
                        hashed: 0,
                        skipped: 1,
                    }
                }
            },
        }
    }
}

fn target_present(target: &ScanTarget) -> bool {
    let path: &Path = &target.path;
    match target.kind {
        TargetKind::Tree => path.is_dir(),
        TargetKind::DeviceBoot => path.exists(),
    }
}
