//! # Hashing
//!
//! SHA-256 is the only hash function on the Aether wire: transaction ids,
//! address derivation, job ids, and result cross-checks all use it. Keeping
//! a single digest keeps the compatibility surface small — every byte
//! sequence that gets hashed in this SDK goes through one of the two
//! functions below.

use sha2::{Digest, Sha256};

use crate::types::TxHash;

/// Compute the SHA-256 hash of the input, returned as a fixed array.
///
/// # Example
///
/// ```
/// use aether_sdk::crypto::hash::sha256;
///
/// let h = sha256(b"aether");
/// assert_eq!(h.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Compute the SHA-256 digest of the input and wrap it as a [`TxHash`].
///
/// This is the digest function of the canonical codec: transaction hashes
/// are `digest(canonical_encode(fields))`, signed as-is.
pub fn digest(data: &[u8]) -> TxHash {
    TxHash::from_bytes(sha256(data))
}
