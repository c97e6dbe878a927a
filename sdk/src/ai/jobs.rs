//! The AI job helper: submit, accept, resolve, challenge, settle, wait.
//!
//! [`AiJobs`] builds the escrow-contract transactions for the job
//! lifecycle and runs completion waits. It is generic over [`LedgerRpc`],
//! so it works identically against the HTTP client and an in-memory mock.
//!
//! The transaction-building methods return the signed [`Transaction`]
//! without submitting it — submission stays the caller's decision (batch
//! it, inspect it, estimate gas first). Pair them with
//! [`AetherClient::submit`](crate::rpc::AetherClient::submit).

use std::time::Duration;

use crate::ai::receipt;
use crate::ai::types::{AiJob, ProviderReputation, VcrVerification, VerifiableComputeReceipt};
use crate::config;
use crate::contracts::{CallData, JOB_ESCROW_CONTRACT};
use crate::crypto::keys::Keypair;
use crate::error::{Result, SdkError};
use crate::rpc::LedgerRpc;
use crate::tracker::Tracker;
use crate::transaction::builder::TransactionBuilder;
use crate::transaction::types::Transaction;
use crate::types::{Address, TxHash};

/// AI marketplace operations over any [`LedgerRpc`] backend.
///
/// # Examples
///
/// ```no_run
/// use aether_sdk::ai::AiJobs;
/// use aether_sdk::crypto::keys::Keypair;
/// use aether_sdk::rpc::AetherClient;
/// use aether_sdk::types::TxHash;
///
/// # async fn demo() -> aether_sdk::error::Result<()> {
/// let client = AetherClient::new("http://localhost:8545")?;
/// let keypair = Keypair::from_seed("demo");
/// let jobs = AiJobs::new(&client);
///
/// let tx = jobs
///     .submit_job(&keypair, TxHash::zero(), b"prompt".to_vec(), 5_000)
///     .await?;
/// let job_id = client.submit(&tx).await?;
/// let job = jobs.wait_for_completion(job_id).await?;
/// println!("job finished as {}", job.status);
/// # Ok(())
/// # }
/// ```
pub struct AiJobs<'a, R: LedgerRpc + ?Sized> {
    rpc: &'a R,
    fee: u64,
    gas_limit: u64,
    poll_interval: Duration,
    timeout: Duration,
}

impl<'a, R: LedgerRpc + ?Sized> AiJobs<'a, R> {
    /// A helper with the default fee, gas limit, and wait budget.
    pub fn new(rpc: &'a R) -> Self {
        Self {
            rpc,
            fee: config::DEFAULT_FEE,
            gas_limit: config::DEFAULT_GAS_LIMIT,
            poll_interval: config::JOB_POLL_INTERVAL,
            timeout: config::JOB_TIMEOUT,
        }
    }

    /// Override the fee attached to built transactions.
    pub fn fee(mut self, fee: u64) -> Self {
        self.fee = fee;
        self
    }

    /// Override the gas limit attached to built transactions.
    pub fn gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    /// Override the completion-wait poll interval.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Override the completion-wait timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    // -- queries ------------------------------------------------------------

    /// Fetch a job by id. `None` if the node has no such job.
    pub async fn get_job(&self, job_id: TxHash) -> Result<Option<AiJob>> {
        self.rpc.ai_get_job(job_id).await
    }

    /// A provider's reputation summary.
    pub async fn provider_reputation(&self, provider: Address) -> Result<ProviderReputation> {
        self.rpc.ai_get_provider_reputation(provider).await
    }

    // -- lifecycle transactions ---------------------------------------------

    /// Build the transaction that submits a new job, locking
    /// `lock_amount` in escrow.
    pub async fn submit_job(
        &self,
        keypair: &Keypair,
        model_hash: TxHash,
        input_data: Vec<u8>,
        lock_amount: u64,
    ) -> Result<Transaction> {
        if lock_amount == 0 {
            return Err(SdkError::invalid("lock amount must be positive"));
        }
        let data = CallData::new("submitJob")
            .hash(&model_hash)
            .bytes(&input_data)
            .build();
        self.escrow_call(keypair, data, lock_amount).await
    }

    /// Build the transaction that accepts a pending job as its provider.
    pub async fn accept_job(&self, keypair: &Keypair, job_id: TxHash) -> Result<Transaction> {
        let data = CallData::new("acceptJob").hash(&job_id).build();
        self.escrow_call(keypair, data, 0).await
    }

    /// Build the transaction that submits a computed result.
    ///
    /// The receipt is cross-checked against `job_id` before anything is
    /// built — a receipt for a different job cannot be submitted by
    /// accident.
    pub async fn submit_result(
        &self,
        keypair: &Keypair,
        job_id: TxHash,
        result: Vec<u8>,
        vcr: &VerifiableComputeReceipt,
    ) -> Result<Transaction> {
        if vcr.job_id != job_id {
            return Err(receipt::ReceiptError::JobMismatch {
                receipt: vcr.job_id,
                job: job_id,
            }
            .into());
        }
        let data = CallData::new("submitResult")
            .hash(&job_id)
            .bytes(&result)
            .build();
        self.escrow_call(keypair, data, 0).await
    }

    /// Build the transaction that challenges a submitted result, staking
    /// `challenge_stake` on the dispute.
    pub async fn challenge_result(
        &self,
        keypair: &Keypair,
        job_id: TxHash,
        challenge_stake: u64,
    ) -> Result<Transaction> {
        if challenge_stake == 0 {
            return Err(SdkError::invalid("challenge stake must be positive"));
        }
        let data = CallData::new("challengeResult").hash(&job_id).build();
        self.escrow_call(keypair, data, challenge_stake).await
    }

    /// Build the transaction that claims payment for a settled job.
    pub async fn claim_payment(&self, keypair: &Keypair, job_id: TxHash) -> Result<Transaction> {
        let data = CallData::new("claimPayment").hash(&job_id).build();
        self.escrow_call(keypair, data, 0).await
    }

    async fn escrow_call(
        &self,
        keypair: &Keypair,
        data: Vec<u8>,
        amount: u64,
    ) -> Result<Transaction> {
        let nonce = self.rpc.get_account(keypair.address()).await?.nonce;
        let tx = TransactionBuilder::call(JOB_ESCROW_CONTRACT, data)
            .amount(amount)
            .fee(self.fee)
            .gas_limit(self.gas_limit)
            .nonce(nonce)
            .build(keypair)?;
        Ok(tx)
    }

    // -- completion + verification ------------------------------------------

    /// Wait for a job to reach `completed` or `settled`.
    ///
    /// A job observed in `challenged` state fails the wait immediately as
    /// a remote failure; a vanished job id is `NotFound`; exceeding the
    /// budget is a timeout. Each call owns its own loop and deadline, so
    /// any number of waits may run concurrently.
    pub async fn wait_for_completion(&self, job_id: TxHash) -> Result<AiJob> {
        Tracker::new(self.poll_interval, self.timeout)
            .job_completion(self.rpc, job_id)
            .await
    }

    /// Verify a compute receipt against a job: local cross-checks first,
    /// then the node's verifier. See [`receipt::verify_receipt`].
    pub async fn verify_receipt(
        &self,
        job: &AiJob,
        vcr: &VerifiableComputeReceipt,
    ) -> Result<VcrVerification> {
        receipt::verify_receipt(self.rpc, job, vcr).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
