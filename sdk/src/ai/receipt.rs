//! Receipt verification: local cross-checks, then delegated proof checking.
//!
//! A Verifiable Compute Receipt means nothing on its own — it has to be
//! checked *against the job it claims to attest*. This module defines what
//! "valid" means for the SDK:
//!
//! 1. `vcr.job_id` equals the job's id;
//! 2. `vcr.provider` equals the job's assigned provider (when assigned);
//! 3. the receipt's result bytes hash-match the result already recorded on
//!    the job, when one exists;
//! 4. only then, the KZG/TEE proof math — delegated to the node's verifier
//!    service via `ai_verifyVCR`.
//!
//! A receipt failing any of checks 1–3 is rejected locally, before the
//! verifier is ever contacted: the failure boundary stays sharp (local
//! cross-check vs remote proof math) and no verification cost is spent on
//! a receipt that cannot belong to the job. The remote result keeps its
//! three independent booleans; the SDK never collapses them.

use thiserror::Error;

use crate::ai::types::{AiJob, VcrVerification, VerifiableComputeReceipt};
use crate::crypto::hash::digest;
use crate::error::Result;
use crate::rpc::LedgerRpc;
use crate::types::{Address, TxHash};

/// A receipt rejected by the local cross-checks.
///
/// Each variant names exactly which pairing broke, so the caller knows
/// whether it is holding the wrong receipt, talking to the wrong provider,
/// or looking at a result the ledger disagrees with.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReceiptError {
    /// The receipt references a different job.
    #[error("receipt is for job {receipt}, not job {job}")]
    JobMismatch { receipt: TxHash, job: TxHash },

    /// The receipt names a provider other than the one assigned.
    #[error("receipt provider {receipt} does not match assigned provider {assigned}")]
    ProviderMismatch {
        receipt: Address,
        assigned: Address,
    },

    /// The receipt's result bytes do not hash-match the job's recorded
    /// result.
    #[error("receipt result does not match the result recorded for job {job}")]
    ResultMismatch { job: TxHash },
}

/// Verify a compute receipt against its job.
///
/// Runs the local cross-checks first and rejects without any RPC on the
/// first failure; otherwise forwards the receipt to the node's verifier
/// and returns its structured [`VcrVerification`] untouched.
pub async fn verify_receipt<R>(
    rpc: &R,
    job: &AiJob,
    vcr: &VerifiableComputeReceipt,
) -> Result<VcrVerification>
where
    R: LedgerRpc + ?Sized,
{
    if vcr.job_id != job.id {
        return Err(ReceiptError::JobMismatch {
            receipt: vcr.job_id,
            job: job.id,
        }
        .into());
    }

    if let Some(assigned) = job.provider {
        if vcr.provider != assigned {
            return Err(ReceiptError::ProviderMismatch {
                receipt: vcr.provider,
                assigned,
            }
            .into());
        }
    }

    if let Some(recorded) = &job.result {
        if digest(&vcr.result) != digest(recorded) {
            return Err(ReceiptError::ResultMismatch { job: job.id }.into());
        }
    }

    tracing::debug!(job = %job.id, "local receipt cross-checks passed; delegating proof verification");
    rpc.ai_verify_vcr(vcr).await
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::types::{JobStatus, ProviderReputation};
    use crate::error::SdkError;
    use crate::rpc::{Account, TxEnvelope};
    use crate::transaction::types::TransactionReceipt;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Verifier stub: counts calls and returns a canned verdict. Every
    /// other trait method is unreachable in these tests.
    struct StubVerifier {
        calls: AtomicUsize,
        verdict: VcrVerification,
    }

    impl StubVerifier {
        fn new(verdict: VcrVerification) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                verdict,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LedgerRpc for StubVerifier {
        async fn get_account(&self, _: Address) -> Result<Account> {
            unreachable!("not exercised")
        }
        async fn send_transaction(&self, _: &TxEnvelope) -> Result<TxHash> {
            unreachable!("not exercised")
        }
        async fn get_transaction_receipt(&self, _: TxHash) -> Result<Option<TransactionReceipt>> {
            unreachable!("not exercised")
        }
        async fn ai_get_job(&self, _: TxHash) -> Result<Option<AiJob>> {
            unreachable!("not exercised")
        }
        async fn ai_verify_vcr(&self, _: &VerifiableComputeReceipt) -> Result<VcrVerification> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.verdict)
        }
        async fn ai_get_provider_reputation(&self, _: Address) -> Result<ProviderReputation> {
            unreachable!("not exercised")
        }
    }

    fn provider() -> Address {
        Address::from_bytes([0x04; 20])
    }

    fn job() -> AiJob {
        AiJob {
            id: TxHash::from_bytes([0x01; 32]),
            creator: Address::from_bytes([0x02; 20]),
            model_hash: TxHash::from_bytes([0x03; 32]),
            input_data: b"prompt".to_vec(),
            locked_amount: 1_000,
            status: JobStatus::Completed,
            provider: Some(provider()),
            result: Some(b"42".to_vec()),
            vcr: None,
        }
    }

    fn matching_vcr() -> VerifiableComputeReceipt {
        VerifiableComputeReceipt {
            job_id: TxHash::from_bytes([0x01; 32]),
            provider: provider(),
            result: b"42".to_vec(),
            execution_trace: TxHash::from_bytes([0x05; 32]),
            kzg_commitments: vec![vec![0x10; 48]],
            tee_attestation: vec![0xA7; 64],
            timestamp: 1_700_000_000,
        }
    }

    fn all_valid() -> VcrVerification {
        VcrVerification {
            valid: true,
            kzg_valid: true,
            tee_valid: true,
        }
    }

    #[tokio::test]
    async fn matching_receipt_is_forwarded_and_verdict_returned() {
        let stub = StubVerifier::new(all_valid());
        let verdict = verify_receipt(&stub, &job(), &matching_vcr()).await.unwrap();
        assert!(verdict.valid && verdict.kzg_valid && verdict.tee_valid);
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn partial_validity_is_preserved() {
        // Math right, attestation missing — the caller gets the split
        // verdict, never a single collapsed boolean.
        let stub = StubVerifier::new(VcrVerification {
            valid: false,
            kzg_valid: true,
            tee_valid: false,
        });
        let verdict = verify_receipt(&stub, &job(), &matching_vcr()).await.unwrap();
        assert!(!verdict.valid);
        assert!(verdict.kzg_valid);
        assert!(!verdict.tee_valid);
    }

    #[tokio::test]
    async fn job_id_mismatch_is_rejected_without_rpc() {
        let stub = StubVerifier::new(all_valid());
        let mut vcr = matching_vcr();
        vcr.job_id = TxHash::from_bytes([0xFF; 32]);

        match verify_receipt(&stub, &job(), &vcr).await {
            Err(SdkError::Receipt(ReceiptError::JobMismatch { .. })) => {}
            other => panic!("expected JobMismatch, got {other:?}"),
        }
        assert_eq!(stub.calls(), 0, "verifier must not be contacted");
    }

    #[tokio::test]
    async fn provider_mismatch_is_rejected_without_rpc() {
        let stub = StubVerifier::new(all_valid());
        let mut vcr = matching_vcr();
        vcr.provider = Address::from_bytes([0xEE; 20]);

        match verify_receipt(&stub, &job(), &vcr).await {
            Err(SdkError::Receipt(ReceiptError::ProviderMismatch { .. })) => {}
            other => panic!("expected ProviderMismatch, got {other:?}"),
        }
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn result_mismatch_is_rejected_without_rpc() {
        let stub = StubVerifier::new(all_valid());
        let mut vcr = matching_vcr();
        vcr.result = b"43".to_vec();

        match verify_receipt(&stub, &job(), &vcr).await {
            Err(SdkError::Receipt(ReceiptError::ResultMismatch { .. })) => {}
            other => panic!("expected ResultMismatch, got {other:?}"),
        }
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn unassigned_job_skips_provider_check() {
        let stub = StubVerifier::new(all_valid());
        let mut j = job();
        j.provider = None;
        // Any provider on the receipt is acceptable until assignment is
        // known; the remaining checks still run.
        assert!(verify_receipt(&stub, &j, &matching_vcr()).await.is_ok());
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn job_without_recorded_result_skips_result_check() {
        let stub = StubVerifier::new(all_valid());
        let mut j = job();
        j.result = None;
        let mut vcr = matching_vcr();
        vcr.result = b"anything".to_vec();
        assert!(verify_receipt(&stub, &j, &vcr).await.is_ok());
        assert_eq!(stub.calls(), 1);
    }
}
