//! Transaction construction via a value builder.
//!
//! The [`TransactionBuilder`] accumulates fields in any order and performs
//! the whole pipeline on [`build`](TransactionBuilder::build):
//! validate → canonical-encode → digest → sign → immutable [`Transaction`].
//!
//! The builder never talks to the network. The nonce comes from the caller
//! (who queried account state through the client), which keeps construction
//! a pure transformation from intent to signed artifact — testable without
//! a node and reusable across submission channels.

use thiserror::Error;

use crate::crypto::keys::Keypair;
use crate::transaction::codec::{self, TxFields};
use crate::transaction::types::Transaction;
use crate::types::Address;

/// Errors from assembling a transaction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// A required field was never set. Names the field so the caller can
    /// fix exactly that input.
    #[error("transaction is missing required field `{field}`")]
    Incomplete { field: &'static str },

    /// An explicitly set sender does not match the address derived from
    /// the signing keypair.
    #[error("sender {set} does not match keypair address {derived}")]
    SenderMismatch { set: Address, derived: Address },
}

/// Accumulates transaction fields and produces a signed [`Transaction`].
///
/// Setters consume and return the builder, so chaining works, but nothing
/// requires it — fields may be set in any order, and the validation contract
/// is exactly the same either way.
///
/// Required before `build`: `recipient`, `amount`, `fee`, `gas_limit`,
/// `nonce`. Zero is a valid nonce — "unset" and "zero" are distinct states.
///
/// # Examples
///
/// ```
/// use aether_sdk::crypto::keys::Keypair;
/// use aether_sdk::transaction::TransactionBuilder;
/// use aether_sdk::types::Address;
///
/// let kp = Keypair::from_seed("docs");
/// let tx = TransactionBuilder::new()
///     .recipient(Address::from_bytes([0xAA; 20]))
///     .amount(1_000)
///     .fee(10)
///     .gas_limit(21_000)
///     .nonce(0)
///     .build(&kp)
///     .unwrap();
/// assert_eq!(tx.sender, kp.address());
/// ```
#[derive(Debug, Default, Clone)]
pub struct TransactionBuilder {
    sender: Option<Address>,
    recipient: Option<Address>,
    amount: Option<u64>,
    fee: Option<u64>,
    gas_limit: Option<u64>,
    nonce: Option<u64>,
    memo: Option<String>,
    payload: Option<Vec<u8>>,
    reads: Vec<Address>,
    writes: Vec<Address>,
}

impl TransactionBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset for a plain transfer: recipient and amount.
    pub fn transfer(recipient: Address, amount: u64) -> Self {
        Self::new().recipient(recipient).amount(amount)
    }

    /// Preset for a contract call: recipient contract, call data, and a
    /// zero amount (override with [`amount`](Self::amount) for payable
    /// calls).
    pub fn call(contract: Address, data: Vec<u8>) -> Self {
        Self::new().recipient(contract).amount(0).payload(data)
    }

    /// Set the sender explicitly. Optional: when unset, the sender is
    /// derived from the keypair at build time. When set, it must match the
    /// keypair's address or `build` fails.
    pub fn sender(mut self, sender: Address) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Set the recipient address.
    pub fn recipient(mut self, recipient: Address) -> Self {
        self.recipient = Some(recipient);
        self
    }

    /// Set the transfer amount (smallest denomination).
    pub fn amount(mut self, amount: u64) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Set the fee.
    pub fn fee(mut self, fee: u64) -> Self {
        self.fee = Some(fee);
        self
    }

    /// Set the gas limit.
    pub fn gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }

    /// Set the nonce. Zero is valid.
    pub fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = Some(nonce);
        self
    }

    /// Attach a memo.
    pub fn memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    /// Attach a binary payload.
    pub fn payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Declare an address this transaction reads.
    pub fn read(mut self, address: Address) -> Self {
        self.reads.push(address);
        self
    }

    /// Declare an address this transaction writes. When none is declared,
    /// `build` inserts the recipient.
    pub fn write(mut self, address: Address) -> Self {
        self.writes.push(address);
        self
    }

    /// Validate, canonical-encode, digest, sign, and return the immutable
    /// signed [`Transaction`].
    pub fn build(self, keypair: &Keypair) -> Result<Transaction, BuildError> {
        let recipient = self
            .recipient
            .ok_or(BuildError::Incomplete { field: "recipient" })?;
        let amount = self
            .amount
            .ok_or(BuildError::Incomplete { field: "amount" })?;
        let fee = self.fee.ok_or(BuildError::Incomplete { field: "fee" })?;
        let gas_limit = self
            .gas_limit
            .ok_or(BuildError::Incomplete { field: "gas_limit" })?;
        let nonce = self
            .nonce
            .ok_or(BuildError::Incomplete { field: "nonce" })?;

        let derived = keypair.address();
        let sender = match self.sender {
            Some(set) if set != derived => {
                return Err(BuildError::SenderMismatch { set, derived })
            }
            _ => derived,
        };

        let mut writes = self.writes;
        if writes.is_empty() {
            writes.push(recipient);
        }

        let sender_public_key = keypair.public_key();
        let bytes = codec::encode(&TxFields {
            sender: &sender,
            sender_public_key: &sender_public_key,
            recipient: &recipient,
            amount,
            fee,
            gas_limit,
            nonce,
            memo: self.memo.as_deref(),
            payload: self.payload.as_deref(),
            reads: &self.reads,
            writes: &writes,
        });
        let hash = codec::digest(&bytes);
        let signature = keypair.sign(hash.as_bytes());

        Ok(Transaction {
            nonce,
            sender,
            sender_public_key,
            recipient,
            amount,
            fee,
            gas_limit,
            memo: self.memo,
            payload: self.payload,
            reads: self.reads,
            writes,
            signature,
            hash,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
