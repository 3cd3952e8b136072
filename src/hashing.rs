//! Content hashing
//!
//! SHA-256 over in-memory buffers, streamed files, and the leading bytes of a block
//! device. A read failure never yields a digest of partial content.

use crate::error::HashError;
use crate::types::HashDigest;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// Size of the Master Boot Record region.
pub const MBR_BYTES: usize = 512;

/// Chunk size used when streaming files.
const READ_CHUNK_BYTES: usize = 8192;

/// Hash an in-memory buffer. The empty buffer is a valid input.
pub fn digest(bytes: &[u8]) -> HashDigest {
    HashDigest::from_bytes(&Sha256::digest(bytes).into())
}

/// Hash a file's full contents, streaming it in fixed-size chunks.
pub fn digest_file(path: &Path) -> Result<HashDigest, HashError> {
    let unreadable = |source: std::io::Error| HashError::Unreadable {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(unreadable)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; READ_CHUNK_BYTES];
    loop {
        match file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => hasher.update(&buffer[..n]),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(unreadable(e)),
        }
    }
    Ok(HashDigest::from_bytes(&hasher.finalize().into()))
}

/// Read exactly `n` bytes from the start of a file or block device.
///
/// Fewer than `n` available bytes is an error, never a zero-padded buffer.
pub fn read_first_bytes(path: &Path, n: usize) -> Result<Vec<u8>, HashError> {
    let mut file = File::open(path).map_err(|source| HashError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let mut bytes = vec![0u8; n];
    let mut filled = 0;
    while filled < n {
        match file.read(&mut bytes[filled..]) {
            Ok(0) => {
                return Err(HashError::TooSmall {
                    path: path.to_path_buf(),
                    expected: n,
                    actual: filled,
                })
            }
            Ok(read) => filled += read,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(source) => {
                return Err(HashError::Unreadable {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }
    }
    Ok(bytes)
}

/// Hash the MBR region (first 512 bytes) of a device.
pub fn digest_device_boot(path: &Path) -> Result<HashDigest, HashError> {
    let mbr = read_first_bytes(path, MBR_BYTES)?;
    Ok(digest(&mbr))
}
