//! Boot surface policy
//!
//! A declarative table mapping boot mode to the (category, path, kind) targets that get
//! hashed. The scanner only consumes the table, so tests can re-root it onto a temporary
//! directory.

use crate::scanner::mode::FIRMWARE_MARKER;
use crate::types::{BootMode, Category};
use std::path::{Component, Path, PathBuf};
use tracing::warn;

/// How a target is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// Recursively hash every regular file under a directory.
    Tree,
    /// Hash the first 512 bytes of a device or image.
    DeviceBoot,
}

/// One hashing target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanTarget {
    pub category: Category,
    pub path: PathBuf,
    pub kind: TargetKind,
}

/// Table row: `mode == None` applies in every boot mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyEntry {
    pub mode: Option<BootMode>,
    pub target: ScanTarget,
}

/// Boot surface policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanPolicy {
    pub firmware_marker: PathBuf,
    pub entries: Vec<PolicyEntry>,
}

impl Default for ScanPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

impl ScanPolicy {
    /// The fixed policy for a live system.
    pub fn standard() -> Self {
        let entry = |mode, category, path: &str, kind| PolicyEntry {
            mode,
            target: ScanTarget {
                category,
                path: PathBuf::from(path),
                kind,
            },
        };

        ScanPolicy {
            firmware_marker: PathBuf::from(FIRMWARE_MARKER),
            entries: vec![
                entry(
                    Some(BootMode::Uefi),
                    Category::Efi,
                    "/boot/efi/EFI",
                    TargetKind::Tree,
                ),
                entry(
                    Some(BootMode::Bios),
                    Category::Mbr,
                    "/dev/sda",
                    TargetKind::DeviceBoot,
                ),
                entry(None, Category::Boot, "/boot/grub", TargetKind::Tree),
                entry(None, Category::Boot, "/boot/grub2", TargetKind::Tree),
            ],
        }
    }

    /// The standard policy with every path re-rooted under `root`.
    ///
    /// A relative root is resolved against the working directory first, so target paths
    /// and the keys built from them are always absolute.
    pub fn rooted(root: &Path) -> Self {
        let root = match std::path::absolute(root) {
            Ok(absolute) => absolute,
            Err(e) => {
                warn!("Failed to make scan root {} absolute: {}", root.display(), e);
                root.to_path_buf()
            }
        };

        let mut policy = Self::standard();
        policy.firmware_marker = reroot(&root, &policy.firmware_marker);
        for entry in &mut policy.entries {
            entry.target.path = reroot(&root, &entry.target.path);
        }
        policy
    }

    /// Targets applicable to `mode`, in table order.
    pub fn targets_for(&self, mode: BootMode) -> impl Iterator<Item = &ScanTarget> {
        self.entries
            .iter()
            .filter(move |e| e.mode.map_or(true, |m| m == mode))
            .map(|e| &e.target)
    }
}

fn reroot(root: &Path, path: &Path) -> PathBuf {
    let relative: PathBuf = path
        .components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect();
    root.join(relative)
}
