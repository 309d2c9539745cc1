//! Content hashing for file fingerprints using BLAKE3

use blake3::Hasher;
use std::fs::File;
use std::io;
use std::path::Path;

/// BLAKE3 digest of a file's bytes
pub type ContentHash = [u8; 32];

/// Compute content hash for file bytes
pub fn compute_content_hash(content: &[u8]) -> ContentHash {
    let mut hasher = Hasher::new();
    hasher.update(content);
    *hasher.finalize().as_bytes()
}

/// Stream a file from disk through BLAKE3
pub fn hash_file(path: &Path) -> io::Result<ContentHash> {
    let mut file = File::open(path)?;
    let mut hasher = Hasher::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(*hasher.finalize().as_bytes())
}

/// Short hex form for logs and CLI output
pub fn short_hex(hash: &ContentHash) -> String {
    hex::encode(&hash[..8])
}
