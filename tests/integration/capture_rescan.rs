use std::fs;

use bootfxd::error::ApiError;
use bootfxd::monitor::ScanOutcome;
use bootfxd::types::{BootMode, Category, ComponentKey};

use crate::support::{exists, FakeMachine};

const F1: &str = "boot/efi/EFI/ubuntu/grubx64.efi";
const F2: &str = "boot/grub/grub.cfg";

#[test]
fn capture_then_rescan_without_changes_is_clean() {
    let machine = FakeMachine::uefi();
    let monitor = machine.monitor();

    let outcome = monitor.capture().unwrap();
    assert_eq!(outcome.mode, BootMode::Uefi);
    assert_eq!(outcome.entries, 2);
    assert!(exists(&machine.baseline_path()));

    assert_eq!(monitor.rescan().unwrap(), ScanOutcome::Clean);
}

#[test]
fn modified_file_is_reported_as_modified_only() {
    let machine = FakeMachine::uefi();
    let monitor = machine.monitor();
    monitor.capture().unwrap();

    machine.write(F1, b"");

    match monitor.rescan().unwrap() {
        ScanOutcome::Tampered(result) => {
            assert_eq!(result.modified, vec![machine.key(Category::Efi, F1)]);
            assert!(result.added.is_empty());
            assert!(result.removed.is_empty());
        }
        ScanOutcome::Clean => panic!("truncated EFI binary went undetected"),
    }
}

#[test]
fn deleted_file_is_reported_as_removed() {
    let machine = FakeMachine::uefi();
    let monitor = machine.monitor();
    monitor.capture().unwrap();

    fs::remove_file(machine.path(F2)).unwrap();

    match monitor.rescan().unwrap() {
        ScanOutcome::Tampered(result) => {
            assert_eq!(result.removed, vec![machine.key(Category::Boot, F2)]);
            assert!(result.modified.is_empty());
            assert!(result.added.is_empty());
        }
        ScanOutcome::Clean => panic!("deleted grub.cfg went undetected"),
    }
}

#[test]
fn new_file_is_reported_as_added() {
    let machine = FakeMachine::uefi();
    let monitor = machine.monitor();
    monitor.capture().unwrap();

    let f3 = "boot/efi/EFI/ubuntu/mmx64.efi";
    machine.write(f3, b"z");

    match monitor.rescan().unwrap() {
        ScanOutcome::Tampered(result) => {
            assert_eq!(result.added, vec![machine.key(Category::Efi, f3)]);
            assert!(result.modified.is_empty());
            assert!(result.removed.is_empty());
        }
        ScanOutcome::Clean => panic!("new EFI binary went undetected"),
    }
}

#[test]
fn switching_boot_mode_removes_efi_and_adds_mbr() {
    let machine = FakeMachine::uefi();
    machine.write("dev/sda", &[0x33u8; 1024]);
    let monitor = machine.monitor();
    monitor.capture().unwrap();

    fs::remove_dir_all(machine.path("sys/firmware/efi")).unwrap();

    match monitor.rescan().unwrap() {
        ScanOutcome::Tampered(result) => {
            assert_eq!(result.removed, vec![machine.key(Category::Efi, F1)]);
            assert_eq!(result.added, vec![machine.key(Category::Mbr, "dev/sda")]);
            assert!(result.modified.is_empty());
        }
        ScanOutcome::Clean => panic!("boot mode change went undetected"),
    }
}

#[test]
fn unreadable_surface_fails_capture_without_writing_baseline() {
    let machine = FakeMachine::uefi();
    fs::remove_dir_all(machine.root()).unwrap();
    // BIOS machine whose boot device is too short to hold an MBR.
    machine.write("dev/sda", &[0u8; 64]);

    let err = machine.monitor().capture().unwrap_err();
    assert!(matches!(err, ApiError::HashCollectionFailed { .. }));
    assert!(!exists(&machine.baseline_path()));
}

#[test]
fn rescan_without_baseline_reports_missing() {
    let machine = FakeMachine::uefi();
    let err = machine.monitor().rescan().unwrap_err();
    assert!(matches!(err, ApiError::BaselineMissing { .. }));
    assert_eq!(err.status_code(), "baseline_missing");
}

#[test]
fn partially_corrupt_baseline_still_detects_changes() {
    let machine = FakeMachine::uefi();
    let monitor = machine.monitor();
    monitor.capture().unwrap();

    // Damage the EFI line; the grub.cfg entry must survive.
    let text = fs::read_to_string(machine.baseline_path()).unwrap();
    let damaged: String = text
        .lines()
        .map(|line| {
            if line.contains("EFI:") {
                "  \"EFI:garbage".to_string()
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n");
    fs::write(machine.baseline_path(), damaged).unwrap();

    match monitor.rescan().unwrap() {
        ScanOutcome::Tampered(result) => {
            assert_eq!(result.added, vec![machine.key(Category::Efi, F1)]);
            assert!(result.removed.is_empty());
            assert!(result.modified.is_empty());
        }
        ScanOutcome::Clean => panic!("dropped baseline entry should surface as added"),
    }
}

#[cfg(unix)]
#[test]
fn tampering_one_of_two_non_utf8_siblings_is_detected() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let machine = FakeMachine::uefi();
    let grub = machine.path("boot/grub");
    let fe = grub.join(OsStr::from_bytes(b"cfg\xfe"));
    let ff = grub.join(OsStr::from_bytes(b"cfg\xff"));
    fs::write(&fe, "one").unwrap();
    fs::write(&ff, "two").unwrap();

    let monitor = machine.monitor();
    assert_eq!(monitor.capture().unwrap().entries, 4);

    fs::write(&fe, "rewritten").unwrap();

    match monitor.rescan().unwrap() {
        ScanOutcome::Tampered(result) => {
            assert_eq!(
                result.modified,
                vec![ComponentKey::from_path(Category::Boot, &fe)]
            );
            assert!(result.added.is_empty());
            assert!(result.removed.is_empty());
        }
        ScanOutcome::Clean => panic!("rewritten non-UTF-8 config went undetected"),
    }
}
