//! Canonical transaction encoding.
//!
//! This module produces the one byte sequence a transaction hashes and
//! signs over. It is the single highest-risk compatibility surface in the
//! SDK: two implementations that disagree by one byte here produce
//! different hashes for the same logical transaction and cannot
//! interoperate.
//!
//! ## Byte layout
//!
//! The layout is fixed and never varies with which optional fields are
//! present:
//!
//! ```text
//! sender             20 raw bytes
//! sender_public_key  32 raw bytes
//! recipient          20 raw bytes
//! amount             u64, little-endian
//! fee                u64, little-endian
//! gas_limit          u64, little-endian
//! nonce              u64, little-endian
//! memo               raw UTF-8 bytes   (empty span when absent)
//! payload            raw bytes         (empty span when absent)
//! reads              20 raw bytes per address, in field order
//! writes             20 raw bytes per address, in field order
//! ```
//!
//! Rules the layout encodes:
//!
//! - Every integer is u64 little-endian, uniformly. No variable-width or
//!   mixed-width encodings anywhere in the preimage.
//! - Addresses and keys contribute their raw bytes, never their `0x…` text.
//! - An absent memo or payload contributes an empty span — `None` and
//!   `Some("")`/`Some(vec![])` are indistinguishable in the encoding.
//! - Signature and hash never participate.
//!
//! The codec is stateless and infallible: field validation (presence,
//! sender/key binding) happens in the builder before any bytes are
//! assembled, and the fixed-width types make out-of-range values
//! unrepresentable.

use crate::crypto::hash;
use crate::crypto::keys::PublicKey;
use crate::types::{Address, TxHash};

/// The transaction fields that participate in hashing and signing —
/// everything except the signature and the hash itself.
pub struct TxFields<'a> {
    pub sender: &'a Address,
    pub sender_public_key: &'a PublicKey,
    pub recipient: &'a Address,
    pub amount: u64,
    pub fee: u64,
    pub gas_limit: u64,
    pub nonce: u64,
    pub memo: Option<&'a str>,
    pub payload: Option<&'a [u8]>,
    pub reads: &'a [Address],
    pub writes: &'a [Address],
}

/// Encode the signable fields into their canonical byte sequence.
///
/// Pure function of the fields: independent of platform, source-level field
/// ordering, and numeric representation. Repeated calls over equal fields
/// yield identical bytes.
pub fn encode(fields: &TxFields<'_>) -> Vec<u8> {
    let memo = fields.memo.map(str::as_bytes).unwrap_or(&[]);
    let payload = fields.payload.unwrap_or(&[]);

    let mut buf = Vec::with_capacity(
        104 + memo.len() + payload.len() + 20 * (fields.reads.len() + fields.writes.len()),
    );

    buf.extend_from_slice(fields.sender.as_bytes());
    buf.extend_from_slice(fields.sender_public_key.as_bytes());
    buf.extend_from_slice(fields.recipient.as_bytes());
    buf.extend_from_slice(&fields.amount.to_le_bytes());
    buf.extend_from_slice(&fields.fee.to_le_bytes());
    buf.extend_from_slice(&fields.gas_limit.to_le_bytes());
    buf.extend_from_slice(&fields.nonce.to_le_bytes());
    buf.extend_from_slice(memo);
    buf.extend_from_slice(payload);
    for addr in fields.reads {
        buf.extend_from_slice(addr.as_bytes());
    }
    for addr in fields.writes {
        buf.extend_from_slice(addr.as_bytes());
    }

    buf
}

/// SHA-256 digest of canonical bytes, as a [`TxHash`].
pub fn digest(bytes: &[u8]) -> TxHash {
    hash::digest(bytes)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
