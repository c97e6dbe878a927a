//! # SDK Error Taxonomy
//!
//! One error type crosses the public API boundary: [`SdkError`]. The
//! variants draw a hard line between problems the caller can fix locally
//! (bad input, bad key material), outcomes the ledger actually produced
//! (a failed transaction, a challenged job), and conditions of the wait
//! itself (timeout, identifier unknown to the node).
//!
//! The distinctions that matter most:
//!
//! - [`SdkError::Timeout`] means *we stopped waiting*. It is never raised
//!   for anything the ledger said, and a remote failure is never reported
//!   as a timeout.
//! - [`SdkError::Remote`] means *the ledger said no* — a real-world
//!   outcome, not a bug in the caller or the SDK.
//! - [`SdkError::NotFound`] means the queried identifier has no remote
//!   record. It is distinct from a transport error and from an RPC-level
//!   error, so callers can retry, give up, or escalate deliberately.

use std::time::Duration;
use thiserror::Error;

use crate::ai::receipt::ReceiptError;
use crate::crypto::keys::KeyError;
use crate::transaction::builder::BuildError;
use crate::types::ParseHexError;

/// The error type for every fallible SDK operation.
#[derive(Debug, Error)]
pub enum SdkError {
    /// Malformed or missing input, caught before any network or signing
    /// work. Always locally recoverable by correcting the input.
    #[error("validation: {0}")]
    Validation(#[from] BuildError),

    /// A hex-encoded primitive (address, hash, signature) failed to parse.
    #[error("validation: {0}")]
    Parse(#[from] ParseHexError),

    /// An argument violated a bound (a zero escrow amount, an
    /// out-of-range commission, an oversized proposal title). Also
    /// caught before any network work.
    #[error("validation: {reason}")]
    Invalid { reason: String },

    /// A compute receipt failed a local cross-check against its job.
    /// Raised before the external verifier is ever contacted.
    #[error("receipt rejected: {0}")]
    Receipt(#[from] ReceiptError),

    /// Key material has the wrong length or format.
    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(#[from] KeyError),

    /// The ledger or a job reached an explicit failure state.
    #[error("remote failure: {reason}")]
    Remote { reason: String },

    /// A wait exceeded its budget. Distinct from [`SdkError::Remote`]:
    /// the ledger never answered, we just stopped asking.
    #[error("timed out after {waited:?}")]
    Timeout { waited: Duration },

    /// The queried identifier has no corresponding remote record.
    #[error("not found: {what}")]
    NotFound { what: String },

    /// The node returned a JSON-RPC error object.
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The HTTP request itself failed (connection refused, DNS, TLS, a
    /// non-JSON body). The node was never meaningfully reached.
    #[error("transport: {0}")]
    Transport(String),
}

impl SdkError {
    /// Shorthand for a [`SdkError::Remote`] with a formatted reason.
    pub fn remote(reason: impl Into<String>) -> Self {
        SdkError::Remote {
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`SdkError::NotFound`].
    pub fn not_found(what: impl Into<String>) -> Self {
        SdkError::NotFound { what: what.into() }
    }

    /// Shorthand for a [`SdkError::Invalid`] argument rejection.
    pub fn invalid(reason: impl Into<String>) -> Self {
        SdkError::Invalid {
            reason: reason.into(),
        }
    }

    /// `true` if the error represents a condition worth retrying as-is
    /// (transport hiccups), as opposed to a deterministic rejection.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SdkError::Transport(_))
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SdkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_and_remote_are_distinct() {
        let timeout = SdkError::Timeout {
            waited: Duration::from_secs(30),
        };
        let remote = SdkError::remote("job challenged");

        assert!(matches!(timeout, SdkError::Timeout { .. }));
        assert!(matches!(remote, SdkError::Remote { .. }));
        assert!(!timeout.is_retryable());
        assert!(!remote.is_retryable());
    }

    #[test]
    fn transport_is_retryable() {
        assert!(SdkError::Transport("connection refused".into()).is_retryable());
        assert!(!SdkError::not_found("tx 0xabc").is_retryable());
    }

    #[test]
    fn display_includes_context() {
        let err = SdkError::Rpc {
            code: -32000,
            message: "transaction not found".into(),
        };
        assert_eq!(err.to_string(), "rpc error -32000: transaction not found");
    }
}
