//! # RPC Surface
//!
//! The SDK's view of the node, split in two layers:
//!
//! - [`LedgerRpc`] — the narrow trait the core depends on: account state,
//!   transaction submission and receipts, AI job state, delegated VCR
//!   verification, provider reputation. The completion tracker and the
//!   receipt-verification contract are generic over it, which is also what
//!   makes them testable against an in-memory mock.
//! - [`client::AetherClient`] — the HTTP JSON-RPC implementation of that
//!   trait, plus the wider convenience surface (chain queries, staking,
//!   governance, model registry) that merely forwards typed parameters.
//!
//! Every request and response is a typed struct; no dictionary-shaped
//! parameters cross this boundary.

pub mod client;
pub mod jsonrpc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::ai::types::{AiJob, ProviderReputation, VcrVerification, VerifiableComputeReceipt};
use crate::error::Result;
use crate::transaction::types::{Transaction, TransactionReceipt};
use crate::types::{hex_bytes_opt, Address, TxHash};

pub use client::{AetherClient, ClientConfig};
pub use jsonrpc::{RpcErrorObject, RpcMethod, RpcRequest, RpcResponse};

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// The transaction envelope submitted to `sendTransaction`.
///
/// Deliberately narrower than [`Transaction`]: the node reconstructs and
/// re-verifies everything else from its own state. All addresses, hashes
/// and signatures travel as `0x`-prefixed lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxEnvelope {
    /// Sender address.
    pub from: Address,
    /// Recipient address.
    pub to: Address,
    /// Transfer amount.
    pub value: u64,
    /// Call data / payload, hex-encoded; omitted when absent.
    #[serde(with = "hex_bytes_opt", default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<u8>>,
    /// Sender nonce.
    pub nonce: u64,
    /// Signature over the transaction hash.
    pub signature: crate::crypto::keys::Signature,
}

impl TxEnvelope {
    /// Build the envelope for a signed transaction.
    pub fn from_transaction(tx: &Transaction) -> Self {
        Self {
            from: tx.sender,
            to: tx.recipient,
            value: tx.amount,
            data: tx.payload.clone(),
            nonce: tx.nonce,
            signature: tx.signature,
        }
    }
}

/// Account state as reported by `getAccount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// The account address.
    pub address: Address,
    /// Spendable balance in the smallest denomination.
    pub balance: u128,
    /// Next expected nonce for this sender.
    pub nonce: u64,
    /// Code hash for contract accounts, absent for plain accounts.
    #[serde(default)]
    pub code_hash: Option<TxHash>,
}

/// A finalized block header plus its transaction list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Slot this block occupies.
    pub slot: u64,
    /// Block hash.
    pub hash: TxHash,
    /// Hash of the parent block.
    pub parent_hash: TxHash,
    /// Proposing validator.
    pub proposer: Address,
    /// Hashes of the included transactions.
    pub transactions: Vec<TxHash>,
    /// State root after executing this block.
    pub state_root: TxHash,
    /// Unix timestamp (seconds).
    pub timestamp: u64,
    /// Proposer's VRF proof, when the node includes it.
    #[serde(with = "hex_bytes_opt", default, skip_serializing_if = "Option::is_none")]
    pub vrf_proof: Option<Vec<u8>>,
}

// ---------------------------------------------------------------------------
// LedgerRpc
// ---------------------------------------------------------------------------

/// The RPC surface the SDK core consumes.
///
/// Implemented by [`AetherClient`] over HTTP and by in-memory mocks in
/// tests. Everything the completion tracker and the receipt-verification
/// contract need goes through this trait and nothing else, so the core
/// never knows whether a real node is on the other side.
#[async_trait]
pub trait LedgerRpc: Send + Sync {
    /// Fetch account state (balance and nonce).
    async fn get_account(&self, address: Address) -> Result<Account>;

    /// Submit a signed transaction envelope; returns the transaction hash
    /// the node will index it under.
    async fn send_transaction(&self, envelope: &TxEnvelope) -> Result<TxHash>;

    /// Fetch the inclusion receipt for a transaction. `None` until the
    /// ledger includes it.
    async fn get_transaction_receipt(&self, hash: TxHash) -> Result<Option<TransactionReceipt>>;

    /// Fetch an AI job by id. `None` if the node has no such job.
    async fn ai_get_job(&self, job_id: TxHash) -> Result<Option<AiJob>>;

    /// Ask the node's verifier service to check a compute receipt's proofs.
    async fn ai_verify_vcr(&self, vcr: &VerifiableComputeReceipt) -> Result<VcrVerification>;

    /// Fetch a provider's reputation summary.
    async fn ai_get_provider_reputation(&self, provider: Address) -> Result<ProviderReputation>;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::Keypair;
    use crate::transaction::builder::TransactionBuilder;

    #[test]
    fn envelope_carries_the_signed_fields() {
        let kp = Keypair::from_seed("envelope");
        let tx = TransactionBuilder::new()
            .recipient(Address::from_bytes([0xAA; 20]))
            .amount(1_000)
            .fee(10)
            .gas_limit(21_000)
            .nonce(5)
            .payload(vec![0xCA, 0xFE])
            .build(&kp)
            .unwrap();

        let env = TxEnvelope::from_transaction(&tx);
        assert_eq!(env.from, tx.sender);
        assert_eq!(env.to, tx.recipient);
        assert_eq!(env.value, 1_000);
        assert_eq!(env.nonce, 5);
        assert_eq!(env.data.as_deref(), Some(&[0xCA, 0xFE][..]));
        assert_eq!(env.signature, tx.signature);
    }

    #[test]
    fn envelope_wire_shape() {
        let kp = Keypair::from_seed("envelope");
        let tx = TransactionBuilder::new()
            .recipient(Address::from_bytes([0xAA; 20]))
            .amount(7)
            .fee(1)
            .gas_limit(21_000)
            .nonce(0)
            .build(&kp)
            .unwrap();

        let json = serde_json::to_value(TxEnvelope::from_transaction(&tx)).unwrap();
        // Addresses and signatures are 0x-prefixed lowercase hex strings.
        let from = json["from"].as_str().unwrap();
        assert!(from.starts_with("0x") && from.len() == 42);
        let sig = json["signature"].as_str().unwrap();
        assert!(sig.starts_with("0x") && sig.len() == 130);
        // Absent data is omitted entirely, not sent as null.
        assert!(json.get("data").is_none());
    }

    #[test]
    fn account_json_roundtrip() {
        let account = Account {
            address: Address::from_bytes([0x01; 20]),
            balance: 123_456_789_000,
            nonce: 17,
            code_hash: None,
        };
        let json = serde_json::to_string(&account).unwrap();
        let back: Account = serde_json::from_str(&json).unwrap();
        assert_eq!(account, back);
    }

    #[test]
    fn block_json_roundtrip() {
        let block = Block {
            slot: 99,
            hash: TxHash::from_bytes([0x0A; 32]),
            parent_hash: TxHash::from_bytes([0x0B; 32]),
            proposer: Address::from_bytes([0x0C; 20]),
            transactions: vec![TxHash::from_bytes([0x0D; 32])],
            state_root: TxHash::from_bytes([0x0E; 32]),
            timestamp: 1_700_000_000,
            vrf_proof: None,
        };
        let json = serde_json::to_string(&block).unwrap();
        let back: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(block, back);
    }
}
