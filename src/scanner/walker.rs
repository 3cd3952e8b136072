//! Best-effort directory walker
//!
//! Every file is hashed through its own `Result`. A failure drops that one key and the
//! walk continues; permission-denied directories and symlink loops are skipped the same way.

use crate::hashing;
use crate::types::{Category, ComponentKey, Snapshot};
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Walker configuration
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Descend into symlinked directories. Loops are detected and skipped.
    pub follow_symlinks: bool,
}

/// Counters for a single walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    pub hashed: usize,
    pub skipped: usize,
}

/// Hash every regular file under `root` into `snapshot`, keyed `<category>:<path>`.
pub fn hash_tree(
    root: &Path,
    category: Category,
    config: &WalkerConfig,
    snapshot: &mut Snapshot,
) -> WalkStats {
    let mut stats = WalkStats::default();
    let walker = WalkDir::new(root)
        .follow_links(config.follow_symlinks)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Skipping unreadable entry under {}: {}", root.display(), e);
                stats.skipped += 1;
                continue;
            }
        };

        if !is_regular_file(&entry) {
            continue;
        }

        match hashing::digest_file(entry.path()) {
            Ok(digest) => {
                let key = ComponentKey::from_path(category, entry.path());
                snapshot.insert(key, digest);
                stats.hashed += 1;
            }
            Err(e) => {
                debug!("Skipping file that failed to hash: {}", e);
                stats.skipped += 1;
            }
        }
    }

    stats
}

/// Regular files, plus symlinks that resolve to one.
fn is_regular_file(entry: &walkdir::DirEntry) -> bool {
    let file_type = entry.file_type();
    if file_type.is_file() {
        return true;
    }
    file_type.is_symlink()
        && std::fs::metadata(entry.path())
            .map(|m| m.is_file())
            .unwrap_or(false)
}
