//! bootfxd: Boot-Chain Integrity Checking
//!
//! Hashes the boot-critical surface of a machine (EFI binaries, GRUB configuration, or the
//! master boot record), persists the result as a baseline, and later re-hashes to detect
//! modified, added, or removed components.

pub mod baseline;
pub mod compare;
pub mod config;
pub mod error;
pub mod hashing;
pub mod logging;
pub mod monitor;
pub mod scanner;
pub mod tooling;
pub mod types;
