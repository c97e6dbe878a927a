//! # AI Marketplace
//!
//! Aether's verifiable-compute marketplace from the client's side: submit
//! jobs against the escrow contract, track them through the lifecycle
//! `pending → assigned → computing → {completed | challenged} → settled`,
//! and verify the compute receipt that comes back.
//!
//! ```text
//! types.rs   — AiJob, JobStatus, VerifiableComputeReceipt, verdicts
//! jobs.rs    — AiJobs helper: lifecycle transactions + completion waits
//! receipt.rs — the receipt-verification contract (local cross-checks,
//!              delegated proof math)
//! ```

pub mod jobs;
pub mod receipt;
pub mod types;

pub use jobs::AiJobs;
pub use receipt::{verify_receipt, ReceiptError};
pub use types::{
    AiJob, JobStats, JobStatus, ProviderReputation, VcrVerification, VerifiableComputeReceipt,
};
