//! Transaction verification: structural checks and cryptographic validation.
//!
//! The SDK runs [`verify_transaction`] over every transaction it is asked
//! to trust — its own build output in tests, and transactions fetched back
//! from a node. Checks are ordered cheapest-first so clearly invalid
//! transactions waste minimal work.

use thiserror::Error;

use crate::transaction::types::Transaction;
use crate::types::{Address, TxHash};

/// Errors from verifying a signed transaction.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The embedded public key does not derive the claimed sender address.
    /// Rejecting this closes the key-substitution hole: a signature that
    /// verifies under *some* key proves nothing unless that key owns the
    /// sender account.
    #[error("sender {sender} is not derived from the embedded public key")]
    SenderKeyMismatch { sender: Address },

    /// The stored hash does not match the digest of the canonical bytes.
    #[error("hash mismatch: expected {expected}, got {actual}")]
    HashMismatch { expected: TxHash, actual: TxHash },

    /// The Ed25519 signature does not verify over the hash.
    #[error("signature does not verify against sender {sender}")]
    InvalidSignature { sender: Address },
}

/// Verify a signed transaction.
///
/// The checks, in order:
///
/// 1. **Key binding** — `sender == address_of(sender_public_key)`.
/// 2. **Hash integrity** — `hash == sha256(canonical_encode(fields))`.
/// 3. **Signature** — Ed25519 verification of `signature` over `hash`
///    under `sender_public_key`.
///
/// Returns the first failing check. A transaction that passes satisfies
/// the full invariant the builder guarantees at construction time.
pub fn verify_transaction(tx: &Transaction) -> Result<(), VerifyError> {
    if tx.sender_public_key.to_address() != tx.sender {
        return Err(VerifyError::SenderKeyMismatch { sender: tx.sender });
    }

    let expected = tx.compute_hash();
    if tx.hash != expected {
        return Err(VerifyError::HashMismatch {
            expected,
            actual: tx.hash,
        });
    }

    if !tx
        .sender_public_key
        .verify(tx.hash.as_bytes(), &tx.signature)
    {
        return Err(VerifyError::InvalidSignature { sender: tx.sender });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
