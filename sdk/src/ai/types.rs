//! AI marketplace value types: jobs, lifecycle states, and the Verifiable
//! Compute Receipt.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{hex_bytes, hex_bytes_opt, hex_bytes_seq, Address, TxHash};

// ---------------------------------------------------------------------------
// JobStatus
// ---------------------------------------------------------------------------

/// Lifecycle state of an AI compute job.
///
/// The ordered lifecycle is:
///
/// ```text
/// pending → assigned → computing → {completed | challenged} → settled
/// ```
///
/// `completed` and `settled` are the terminal states a waiting caller is
/// looking for. `challenged` is a failure-like terminal state: any wait
/// observing it short-circuits instead of running out its timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Submitted, waiting for a provider.
    Pending,
    /// A provider accepted the job.
    Assigned,
    /// The provider is computing.
    Computing,
    /// A result (and VCR) has been submitted.
    Completed,
    /// The result is under challenge.
    Challenged,
    /// Payment released; the job is finished for good.
    Settled,
}

impl JobStatus {
    /// `true` for the states a completion wait accepts as success.
    pub fn is_complete(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Settled)
    }

    /// `true` for every state with no further transitions a waiter cares
    /// about — success states plus `challenged`.
    pub fn is_terminal(&self) -> bool {
        self.is_complete() || *self == JobStatus::Challenged
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Assigned => "assigned",
            Self::Computing => "computing",
            Self::Completed => "completed",
            Self::Challenged => "challenged",
            Self::Settled => "settled",
        };
        write!(f, "{s}")
    }
}

// ---------------------------------------------------------------------------
// AiJob
// ---------------------------------------------------------------------------

/// An AI compute job as reported by the node.
///
/// Value object: no back-references, freely clonable, and nothing in the
/// SDK mutates one after it is fetched. A job in `completed` state may
/// legitimately carry no result bytes yet — that is still a successful
/// completion with an empty result, never reinterpreted as some other
/// state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiJob {
    /// Job identifier (hash of the submitting transaction).
    pub id: TxHash,
    /// Account that submitted and funded the job.
    pub creator: Address,
    /// Content hash of the model to run.
    pub model_hash: TxHash,
    /// Input payload handed to the model.
    #[serde(with = "hex_bytes")]
    pub input_data: Vec<u8>,
    /// Escrowed payment, locked until settlement.
    pub locked_amount: u64,
    /// Current lifecycle state.
    pub status: JobStatus,
    /// Assigned provider, present from `assigned` onward.
    pub provider: Option<Address>,
    /// Computed result, present once submitted.
    #[serde(with = "hex_bytes_opt", default)]
    pub result: Option<Vec<u8>>,
    /// The compute receipt, present once submitted.
    #[serde(default)]
    pub vcr: Option<VerifiableComputeReceipt>,
}

// ---------------------------------------------------------------------------
// VerifiableComputeReceipt
// ---------------------------------------------------------------------------

/// A Verifiable Compute Receipt: the provider's proof that a job's result
/// was computed correctly (KZG commitments over the execution trace) and on
/// approved hardware (TEE attestation).
///
/// A VCR is bound 1:1 to the job it references. Verifying one in isolation
/// — without checking `job_id` against the job at hand — is a protocol
/// error; [`verify_receipt`](super::receipt::verify_receipt) enforces the
/// pairing before anything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiableComputeReceipt {
    /// The job this receipt attests.
    pub job_id: TxHash,
    /// Provider that produced the result.
    pub provider: Address,
    /// The result bytes the receipt commits to.
    #[serde(with = "hex_bytes")]
    pub result: Vec<u8>,
    /// Hash of the execution trace the commitments open against.
    pub execution_trace: TxHash,
    /// KZG commitment byte-strings over the trace polynomial.
    #[serde(with = "hex_bytes_seq")]
    pub kzg_commitments: Vec<Vec<u8>>,
    /// Hardware attestation blob from the provider's TEE.
    #[serde(with = "hex_bytes")]
    pub tee_attestation: Vec<u8>,
    /// Unix timestamp (seconds) when the receipt was produced.
    pub timestamp: u64,
}

// ---------------------------------------------------------------------------
// Verifier / reputation responses
// ---------------------------------------------------------------------------

/// Outcome of `ai_verifyVCR`.
///
/// Three independent booleans, never collapsed into one: `kzg_valid` says
/// the execution-correctness math checks out, `tee_valid` says the hardware
/// attestation does, and `valid` is the node's overall judgement. Keeping
/// them separate lets a caller distinguish "math is right but the
/// attestation is missing" from full invalidity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VcrVerification {
    /// The node's overall verdict.
    pub valid: bool,
    /// KZG commitment proofs verified against the execution trace.
    pub kzg_valid: bool,
    /// TEE attestation verified.
    pub tee_valid: bool,
}

/// Reputation summary for a compute provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderReputation {
    /// Aggregate score in `[0, 1]`.
    pub score: f64,
    /// Jobs completed and settled.
    pub completed_jobs: u64,
    /// Mean seconds from assignment to result.
    pub average_time: f64,
}

/// Marketplace-wide job counters from `ai_getJobStats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStats {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub pending: u64,
    #[serde(default)]
    pub completed: u64,
    #[serde(default)]
    pub challenged: u64,
    #[serde(default)]
    pub settled: u64,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
