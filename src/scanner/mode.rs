//! Boot mode detection

use crate::types::BootMode;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Directory present only when the kernel was booted through UEFI firmware.
pub const FIRMWARE_MARKER: &str = "/sys/firmware/efi";

/// Return `Uefi` if the firmware marker exists, else `Bios`.
///
/// Never fails. Any probe error counts as "marker absent".
pub fn detect_boot_mode(marker: &Path) -> BootMode {
    match std::fs::symlink_metadata(marker) {
        Ok(_) => BootMode::Uefi,
        Err(e) => {
            if e.kind() != ErrorKind::NotFound {
                debug!(
                    "Probing firmware marker {} failed ({}), assuming BIOS",
                    marker.display(),
                    e
                );
            }
            BootMode::Bios
        }
    }
}
