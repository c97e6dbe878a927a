//! # Transaction Module
//!
//! Construction, canonical encoding, signing, and verification of Aether
//! transactions.
//!
//! ## Architecture
//!
//! ```text
//! types.rs        — Transaction, TransactionReceipt, status and log types
//! codec.rs        — The canonical byte layout hashed and signed over
//! builder.rs      — Value builder: validate → encode → digest → sign
//! verification.rs — Key-binding, hash, and signature checks
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Build** — [`TransactionBuilder`] validates the fields and produces
//!    an immutable signed [`Transaction`] in one step.
//! 2. **Submit** — the client wraps it in the wire envelope and sends it.
//! 3. **Track** — the completion tracker polls for the
//!    [`TransactionReceipt`].
//!
//! The hash is `sha256` of the canonical bytes and the signature is Ed25519
//! over that hash — see `codec.rs` for the exact layout. The codec is the
//! compatibility-critical piece: treat any change to it as a wire format
//! break.

pub mod builder;
pub mod codec;
pub mod types;
pub mod verification;

pub use builder::{BuildError, TransactionBuilder};
pub use types::{Log, Transaction, TransactionReceipt, TransactionStatus};
pub use verification::{verify_transaction, VerifyError};
