// Copyright (c) 2026 Aether Labs. MIT License.
// See LICENSE for details.

//! # Aether SDK
//!
//! The client library for the Aether network: build and sign transactions,
//! submit them, track them to confirmation, run AI compute jobs through the
//! marketplace, and verify the compute receipts that come back.
//!
//! The ledger itself lives elsewhere — this crate never validates blocks or
//! executes contracts. It does exactly the client's share of the work, and
//! it does the dangerous parts (canonical encoding, signing, completion
//! tracking) carefully, because a one-byte disagreement with the node about
//! transaction encoding is not a bug you debug at 3am, it is a bug you
//! debug for a week.
//!
//! ## Architecture
//!
//! - **types** — fixed-width addresses and hashes with their `0x` hex forms.
//! - **crypto** — Ed25519 keypairs, SHA-256 digests, address derivation.
//! - **transaction** — the canonical codec, the builder, verification.
//! - **tracker** — one bounded polling state machine, instantiated for
//!   receipt waits and job waits, with an injectable clock.
//! - **rpc** — the `LedgerRpc` trait the core consumes, and the HTTP
//!   JSON-RPC client that implements it.
//! - **ai** — job lifecycle, the Verifiable Compute Receipt, and the
//!   verification contract for it.
//! - **staking / governance** — typed forwarding for the validator and
//!   proposal surfaces.
//! - **contracts / config** — system contract addresses, call-data
//!   encoding, and every default in one place.
//!
//! ## Quick start
//!
//! ```no_run
//! use aether_sdk::crypto::keys::Keypair;
//! use aether_sdk::rpc::AetherClient;
//! use aether_sdk::transaction::TransactionBuilder;
//! use aether_sdk::types::Address;
//!
//! # async fn demo() -> aether_sdk::error::Result<()> {
//! let client = AetherClient::new("http://localhost:8545")?;
//! let keypair = Keypair::from_seed("do-not-use-this-seed-with-real-funds");
//!
//! let nonce = client.get_nonce(keypair.address()).await?;
//! let tx = TransactionBuilder::new()
//!     .recipient("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa".parse::<Address>()?)
//!     .amount(1_000)
//!     .fee(2_000_000)
//!     .gas_limit(21_000)
//!     .nonce(nonce)
//!     .build(&keypair)?;
//!
//! let receipt = client.submit_and_wait(&tx).await?;
//! println!("included in slot {}", receipt.block_slot);
//! # Ok(())
//! # }
//! ```
//!
//! ## Design stances
//!
//! 1. Validation before crypto, crypto before network. A malformed input
//!    never costs a signature, and a bad signature never costs a round
//!    trip.
//! 2. "We stopped waiting" and "the ledger said no" are different errors,
//!    always.
//! 3. Time is injected. Every wait in this crate can be tested without
//!    sleeping.

pub mod ai;
pub mod config;
pub mod contracts;
pub mod crypto;
pub mod error;
pub mod governance;
pub mod rpc;
pub mod staking;
pub mod tracker;
pub mod transaction;
pub mod types;

// The names most programs need, one `use` away.
pub use ai::{AiJob, AiJobs, JobStatus, VcrVerification, VerifiableComputeReceipt};
pub use crypto::keys::{Keypair, PublicKey, Signature};
pub use error::{Result, SdkError};
pub use rpc::{AetherClient, ClientConfig, LedgerRpc, TxEnvelope};
pub use tracker::Tracker;
pub use transaction::{Transaction, TransactionBuilder, TransactionReceipt};
pub use types::{Address, TxHash};
