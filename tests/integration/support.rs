use std::fs;
use std::path::{Path, PathBuf};

use bootfxd::baseline::JsonBaselineStore;
use bootfxd::monitor::IntegrityMonitor;
use bootfxd::scanner::policy::ScanPolicy;
use bootfxd::scanner::BootSurfaceScanner;
use bootfxd::types::{Category, ComponentKey};
use tempfile::TempDir;

/// A fake machine: `<temp>/root` is the filesystem root, baseline under `<temp>/output`.
pub struct FakeMachine {
    pub temp: TempDir,
}

impl FakeMachine {
    /// UEFI machine with F1 (EFI binary, "x") and F2 (grub.cfg, "y").
    pub fn uefi() -> Self {
        let machine = Self {
            temp: TempDir::new().unwrap(),
        };
        fs::create_dir_all(machine.root().join("sys/firmware/efi")).unwrap();
        machine.write("boot/efi/EFI/ubuntu/grubx64.efi", b"x");
        machine.write("boot/grub/grub.cfg", b"y");
        machine
    }

    pub fn root(&self) -> PathBuf {
        self.temp.path().join("root")
    }

    pub fn baseline_path(&self) -> PathBuf {
        self.temp.path().join("output/baseline.json")
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    pub fn write(&self, relative: &str, content: &[u8]) {
        let path = self.path(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    pub fn key(&self, category: Category, relative: &str) -> ComponentKey {
        ComponentKey::from_path(category, &self.path(relative))
    }

    pub fn monitor(&self) -> IntegrityMonitor<JsonBaselineStore> {
        IntegrityMonitor::new(
            BootSurfaceScanner::new(ScanPolicy::rooted(&self.root())),
            JsonBaselineStore::new(self.baseline_path()),
        )
    }
}

pub fn exists(path: &Path) -> bool {
    path.exists()
}
