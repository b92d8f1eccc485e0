// src/watch/hash.rs

use blake3::Hasher;

/// Hex blake3 digest of a snapshot's bytes.
///
/// The runtime compares digests of consecutive reads to tell a real edit from
/// a touch or a duplicate notify event.
pub fn compute_content_hash(bytes: &[u8]) -> String {
    let mut hasher = Hasher::new();
    hasher.update(bytes);
    hasher.finalize().to_hex().to_string()
}
