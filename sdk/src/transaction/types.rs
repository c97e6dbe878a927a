//! Core transaction value types.
//!
//! A [`Transaction`] is immutable once signed: the builder produces it with
//! its hash and signature already attached, and nothing in the SDK mutates
//! one afterward. Receipts are likewise immutable — they do not exist until
//! the ledger includes the transaction, and once returned they never change.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::crypto::keys::{PublicKey, Signature};
use crate::transaction::codec;
use crate::types::{hex_bytes, hex_bytes_opt, Address, TxHash};

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A signed Aether transaction.
///
/// The field set mirrors what the ledger validates: who pays (`sender`,
/// proven by `sender_public_key` + `signature`), who receives, how much,
/// what it costs (`fee`, `gas_limit`), the replay guard (`nonce`, enforced
/// strictly-increasing by the ledger, not locally), and the optional
/// `memo`/`payload` riders. `reads`/`writes` declare the state the
/// transaction touches; `writes` always contains at least the recipient.
///
/// Invariant, checked by [`verify_transaction`](super::verify_transaction)
/// and upheld by construction in the builder:
/// `hash == sha256(canonical_encode(fields))` and `signature` verifies over
/// `hash` under `sender_public_key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Per-sender sequence number. Zero is valid (a fresh account's first
    /// transaction); ordering is enforced by the ledger.
    pub nonce: u64,

    /// Sender address, derived from `sender_public_key`.
    pub sender: Address,

    /// Sender's Ed25519 public key, embedded so the node can verify the
    /// signature without a key lookup.
    pub sender_public_key: PublicKey,

    /// Recipient address (an account or a contract).
    pub recipient: Address,

    /// Transfer amount in the smallest denomination.
    pub amount: u64,

    /// Fee offered to the ledger.
    pub fee: u64,

    /// Execution gas ceiling.
    pub gas_limit: u64,

    /// Optional human-readable memo.
    pub memo: Option<String>,

    /// Optional binary payload (contract call data).
    #[serde(with = "hex_bytes_opt", default)]
    pub payload: Option<Vec<u8>>,

    /// Addresses this transaction reads.
    pub reads: Vec<Address>,

    /// Addresses this transaction writes. Never empty on a built
    /// transaction: the builder inserts the recipient when nothing else
    /// is declared.
    pub writes: Vec<Address>,

    /// Ed25519 signature over `hash`.
    pub signature: Signature,

    /// `sha256(canonical_encode(fields))` — computed at build time.
    pub hash: TxHash,
}

impl Transaction {
    /// The canonical byte encoding of this transaction's signable fields
    /// (everything except `signature` and `hash`).
    pub fn canonical_bytes(&self) -> Vec<u8> {
        codec::encode(&codec::TxFields {
            sender: &self.sender,
            sender_public_key: &self.sender_public_key,
            recipient: &self.recipient,
            amount: self.amount,
            fee: self.fee,
            gas_limit: self.gas_limit,
            nonce: self.nonce,
            memo: self.memo.as_deref(),
            payload: self.payload.as_deref(),
            reads: &self.reads,
            writes: &self.writes,
        })
    }

    /// Recompute the hash from the current field values.
    pub fn compute_hash(&self) -> TxHash {
        codec::digest(&self.canonical_bytes())
    }
}

// ---------------------------------------------------------------------------
// TransactionStatus / TransactionReceipt
// ---------------------------------------------------------------------------

/// Execution outcome recorded in a receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Included and executed successfully.
    Success,
    /// Included but execution failed; the fee is still consumed.
    Failed,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// An execution log entry emitted by a contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Log {
    /// Emitting contract address.
    pub address: Address,
    /// Indexed topics.
    pub topics: Vec<TxHash>,
    /// Unindexed event data.
    #[serde(with = "hex_bytes")]
    pub data: Vec<u8>,
}

/// Proof of inclusion for a submitted transaction.
///
/// Does not exist until the ledger includes the transaction; once the node
/// returns it, it never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    /// Hash of the included transaction.
    pub transaction_hash: TxHash,
    /// Hash of the including block.
    pub block_hash: TxHash,
    /// Slot of the including block.
    pub block_slot: u64,
    /// Sender, echoed for convenience.
    pub from: Address,
    /// Recipient, echoed for convenience.
    pub to: Address,
    /// Execution outcome.
    pub status: TransactionStatus,
    /// Gas actually consumed.
    pub gas_used: u64,
    /// Logs emitted during execution.
    pub logs: Vec<Log>,
}

impl TransactionReceipt {
    /// `true` if execution succeeded.
    pub fn is_success(&self) -> bool {
        self.status == TransactionStatus::Success
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
