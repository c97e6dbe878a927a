//! # Cryptographic Primitives
//!
//! Everything security-related in the SDK flows through this module:
//! Ed25519 keypairs and signatures, SHA-256 digests, and address
//! derivation.
//!
//! The choices are deliberately boring:
//!
//! - **Ed25519** for signatures — deterministic, compact, well-audited.
//! - **SHA-256** for every digest — it is what the Aether wire format
//!   speaks, and one hash function is one compatibility surface.
//!
//! Nothing here is hand-rolled; these are thin, type-safe wrappers around
//! audited implementations.

pub mod hash;
pub mod keys;

// Re-export the everyday names so callers don't need the full paths.
pub use hash::{digest, sha256};
pub use keys::{verify, KeyError, Keypair, PublicKey, Signature};
