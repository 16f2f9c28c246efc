//! Hash function primitives.
//!
//! SHA-256 is the digest behind the `SHA256withECDSA` signature algorithm.

use sha2::{Digest, Sha256};

/// Compute SHA-256 hash of the input data.
///
/// # Returns
/// A 32-byte SHA-256 digest.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}
