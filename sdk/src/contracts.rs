//! # System Contracts
//!
//! The well-known contract addresses baked into the ledger, and the
//! call-data encoding the SDK uses to invoke them.
//!
//! ## Call data format
//!
//! A contract call payload is a 4-byte ASCII method selector followed by
//! the arguments in order:
//!
//! - hashes and addresses contribute their raw bytes (32 / 20);
//! - integers are u64 little-endian;
//! - booleans are one byte, `0x00`/`0x01`;
//! - text arguments carry a u64 little-endian length prefix, then UTF-8
//!   bytes (two adjacent texts stay unambiguous);
//! - a trailing binary blob is appended raw, so it may only come last.

use crate::types::{Address, TxHash};

// ---------------------------------------------------------------------------
// Addresses
// ---------------------------------------------------------------------------

/// Staking system contract: `0x1000000000000000000000000000000000000001`.
pub const STAKING_CONTRACT: Address = Address::from_bytes([
    0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x01,
]);

/// Governance system contract: `0x1000000000000000000000000000000000000002`.
pub const GOVERNANCE_CONTRACT: Address = Address::from_bytes([
    0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x02,
]);

/// AI job escrow contract: `0x1000000000000000000000000000000000000003`.
pub const JOB_ESCROW_CONTRACT: Address = Address::from_bytes([
    0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x03,
]);

// ---------------------------------------------------------------------------
// Call data
// ---------------------------------------------------------------------------

/// The 4-byte ASCII selector for a method name (zero-padded for names
/// shorter than four characters).
pub fn selector(method: &str) -> [u8; 4] {
    let mut sel = [0u8; 4];
    for (dst, src) in sel.iter_mut().zip(method.as_bytes()) {
        *dst = *src;
    }
    sel
}

/// Incremental builder for contract call payloads.
///
/// # Examples
///
/// ```
/// use aether_sdk::contracts::CallData;
/// use aether_sdk::types::TxHash;
///
/// let data = CallData::new("acceptJob")
///     .hash(&TxHash::zero())
///     .build();
/// assert_eq!(&data[..4], b"acce");
/// assert_eq!(data.len(), 4 + 32);
/// ```
#[derive(Debug, Clone)]
pub struct CallData {
    buf: Vec<u8>,
}

impl CallData {
    /// Start a call payload for `method`.
    pub fn new(method: &str) -> Self {
        let mut buf = Vec::with_capacity(64);
        buf.extend_from_slice(&selector(method));
        Self { buf }
    }

    /// Append a 32-byte hash argument.
    pub fn hash(mut self, h: &TxHash) -> Self {
        self.buf.extend_from_slice(h.as_bytes());
        self
    }

    /// Append a 20-byte address argument.
    pub fn address(mut self, a: &Address) -> Self {
        self.buf.extend_from_slice(a.as_bytes());
        self
    }

    /// Append a u64 argument, little-endian.
    pub fn u64(mut self, v: u64) -> Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    /// Append a boolean argument as one byte.
    pub fn bool(mut self, v: bool) -> Self {
        self.buf.push(v as u8);
        self
    }

    /// Append a length-prefixed UTF-8 text argument.
    pub fn text(mut self, s: &str) -> Self {
        self.buf
            .extend_from_slice(&(s.len() as u64).to_le_bytes());
        self.buf.extend_from_slice(s.as_bytes());
        self
    }

    /// Append a trailing binary blob, raw. Must be the last argument.
    pub fn bytes(mut self, b: &[u8]) -> Self {
        self.buf.extend_from_slice(b);
        self
    }

    /// The finished payload.
    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
