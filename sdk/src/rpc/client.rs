//! The HTTP JSON-RPC client.
//!
//! [`AetherClient`] is the one piece of the SDK that owns a network
//! connection. It implements [`LedgerRpc`] (the narrow surface the core
//! uses) and layers the wider convenience surface on top: chain queries,
//! gas estimation, submission helpers, the AI marketplace queries that are
//! plain forwarding, and accessors for the staking and governance helpers.
//!
//! Error mapping is strict: a transport problem is [`SdkError::Transport`],
//! an error object from the node is [`SdkError::Rpc`] (or
//! [`SdkError::NotFound`] for the node's not-found codes), and a `null`
//! result is only ever `None` for queries where absence is meaningful.
//! Nothing is swallowed into an empty answer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::ai::types::{
    AiJob, JobStats, ProviderReputation, VcrVerification, VerifiableComputeReceipt,
};
use crate::config;
use crate::error::{Result, SdkError};
use crate::governance::Governance;
use crate::rpc::jsonrpc::{RpcMethod, RpcRequest, RpcResponse};
use crate::rpc::{Account, Block, LedgerRpc, TxEnvelope};
use crate::staking::Staking;
use crate::tracker::Tracker;
use crate::transaction::types::{Transaction, TransactionReceipt};
use crate::types::{Address, TxHash};

// ---------------------------------------------------------------------------
// ClientConfig
// ---------------------------------------------------------------------------

/// Tunables for an [`AetherClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Chain id, echoed into envelopes that need it.
    pub chain_id: u64,
    /// HTTP timeout per JSON-RPC round trip.
    pub rpc_timeout: Duration,
    /// Fee the convenience helpers attach.
    pub default_fee: u64,
    /// Gas limit the convenience helpers attach.
    pub default_gas_limit: u64,
    /// Poll interval for receipt waits.
    pub receipt_poll_interval: Duration,
    /// Budget for receipt waits.
    pub receipt_timeout: Duration,
    /// Poll interval for job waits.
    pub job_poll_interval: Duration,
    /// Budget for job waits.
    pub job_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            chain_id: config::CHAIN_ID_MAINNET,
            rpc_timeout: config::DEFAULT_RPC_TIMEOUT,
            default_fee: config::DEFAULT_FEE,
            default_gas_limit: config::DEFAULT_GAS_LIMIT,
            receipt_poll_interval: config::RECEIPT_POLL_INTERVAL,
            receipt_timeout: config::RECEIPT_TIMEOUT,
            job_poll_interval: config::JOB_POLL_INTERVAL,
            job_timeout: config::JOB_TIMEOUT,
        }
    }
}

// ---------------------------------------------------------------------------
// AetherClient
// ---------------------------------------------------------------------------

/// Async JSON-RPC client for an Aether node.
///
/// # Examples
///
/// ```no_run
/// use aether_sdk::rpc::AetherClient;
///
/// # async fn demo() -> aether_sdk::error::Result<()> {
/// let client = AetherClient::new("http://localhost:8545")?;
/// let slot = client.get_slot().await?;
/// println!("chain is at slot {slot}");
/// # Ok(())
/// # }
/// ```
pub struct AetherClient {
    http: reqwest::Client,
    endpoint: String,
    config: ClientConfig,
    next_id: AtomicU64,
}

impl AetherClient {
    /// A client for `endpoint` with default configuration.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::with_config(endpoint, ClientConfig::default())
    }

    /// A client with explicit configuration.
    pub fn with_config(endpoint: impl Into<String>, config: ClientConfig) -> Result<Self> {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        let http = reqwest::Client::builder()
            .timeout(config.rpc_timeout)
            .build()
            .map_err(|e| SdkError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            endpoint,
            config,
            next_id: AtomicU64::new(1),
        })
    }

    /// The node endpoint this client talks to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The active configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The staking helper bound to this client.
    pub fn staking(&self) -> Staking<'_> {
        Staking::new(self)
    }

    /// The governance helper bound to this client.
    pub fn governance(&self) -> Governance<'_> {
        Governance::new(self)
    }

    // -- low-level dispatch -------------------------------------------------

    /// Issue one JSON-RPC call and decode the result.
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        method: RpcMethod,
        params: Value,
    ) -> Result<T> {
        let value = self.call_raw(method, params).await?;
        serde_json::from_value(value)
            .map_err(|e| SdkError::Transport(format!("malformed {method} result: {e}")))
    }

    /// Issue one JSON-RPC call where a `null` result means "no such
    /// record".
    pub(crate) async fn call_opt<T: DeserializeOwned>(
        &self,
        method: RpcMethod,
        params: Value,
    ) -> Result<Option<T>> {
        let value = self.call_raw(method, params).await?;
        if value.is_null() {
            return Ok(None);
        }
        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| SdkError::Transport(format!("malformed {method} result: {e}")))
    }

    async fn call_raw(&self, method: RpcMethod, params: Value) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = RpcRequest::new(id, method, params);
        tracing::debug!(%method, id, "rpc call");

        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| SdkError::Transport(e.to_string()))?
            .error_for_status()
            .map_err(|e| SdkError::Transport(e.to_string()))?;

        let response: RpcResponse = response
            .json()
            .await
            .map_err(|e| SdkError::Transport(format!("invalid JSON-RPC response: {e}")))?;
        response.into_result()
    }

    // -- chain queries ------------------------------------------------------

    /// Current chain slot.
    pub async fn get_slot(&self) -> Result<u64> {
        self.call(RpcMethod::GetSlot, json!([])).await
    }

    /// Block at `slot`.
    pub async fn get_block(&self, slot: u64, include_transactions: bool) -> Result<Block> {
        self.call(RpcMethod::GetBlock, json!([slot, include_transactions]))
            .await
    }

    /// Block by hash.
    pub async fn get_block_by_hash(
        &self,
        hash: TxHash,
        include_transactions: bool,
    ) -> Result<Block> {
        self.call(RpcMethod::GetBlockByHash, json!([hash, include_transactions]))
            .await
    }

    /// Latest finalized block.
    pub async fn get_latest_block(&self) -> Result<Block> {
        self.call(RpcMethod::GetLatestBlock, json!([])).await
    }

    /// Fetch a transaction by hash; `None` if the node has never seen it.
    pub async fn get_transaction(&self, hash: TxHash) -> Result<Option<Transaction>> {
        self.call_opt(RpcMethod::GetTransaction, json!([hash])).await
    }

    /// Spendable balance of `address`.
    pub async fn get_balance(&self, address: Address) -> Result<u128> {
        Ok(self.get_account(address).await?.balance)
    }

    /// Next expected nonce for `address`.
    pub async fn get_nonce(&self, address: Address) -> Result<u64> {
        Ok(self.get_account(address).await?.nonce)
    }

    /// Gas estimate for an envelope.
    pub async fn estimate_gas(&self, envelope: &TxEnvelope) -> Result<u64> {
        self.call(RpcMethod::EstimateGas, json!([envelope])).await
    }

    /// Submit a pre-serialized raw transaction (hex).
    pub async fn send_raw_transaction(&self, raw_tx_hex: &str) -> Result<TxHash> {
        self.call(RpcMethod::SendRawTransaction, json!([raw_tx_hex]))
            .await
    }

    /// `true` when the node answers a trivial query.
    pub async fn is_healthy(&self) -> bool {
        self.get_slot().await.is_ok()
    }

    // -- submission + tracking ----------------------------------------------

    /// Wrap a signed transaction in its envelope and submit it.
    pub async fn submit(&self, tx: &Transaction) -> Result<TxHash> {
        let envelope = TxEnvelope::from_transaction(tx);
        self.send_transaction(&envelope).await
    }

    /// Wait for a submitted transaction's receipt using the configured
    /// poll interval and timeout.
    pub async fn wait_for_transaction(&self, hash: TxHash) -> Result<TransactionReceipt> {
        Tracker::new(
            self.config.receipt_poll_interval,
            self.config.receipt_timeout,
        )
        .transaction_receipt(self, hash)
        .await
    }

    /// Submit and wait in one step.
    pub async fn submit_and_wait(&self, tx: &Transaction) -> Result<TransactionReceipt> {
        let hash = self.submit(tx).await?;
        tracing::info!(%hash, "transaction submitted; waiting for receipt");
        self.wait_for_transaction(hash).await
    }

    // -- AI marketplace forwarding ------------------------------------------

    /// The compute receipt recorded for a job, if any.
    pub async fn ai_get_vcr(&self, job_id: TxHash) -> Result<Option<VerifiableComputeReceipt>> {
        self.call_opt(RpcMethod::AiGetVcr, json!([job_id])).await
    }

    /// All jobs submitted by `creator`.
    pub async fn ai_get_jobs_by_creator(&self, creator: Address) -> Result<Vec<AiJob>> {
        self.call(RpcMethod::AiGetJobsByCreator, json!([creator]))
            .await
    }

    /// All jobs assigned to `provider`.
    pub async fn ai_get_jobs_by_provider(&self, provider: Address) -> Result<Vec<AiJob>> {
        self.call(RpcMethod::AiGetJobsByProvider, json!([provider]))
            .await
    }

    /// Jobs still waiting for a provider.
    pub async fn ai_get_pending_jobs(&self) -> Result<Vec<AiJob>> {
        self.call(RpcMethod::AiGetPendingJobs, json!([])).await
    }

    /// Marketplace-wide job counters.
    pub async fn ai_get_job_stats(&self) -> Result<JobStats> {
        self.call(RpcMethod::AiGetJobStats, json!([])).await
    }

    /// Register a model in the registry.
    pub async fn ai_register_model(&self, model_hash: TxHash, metadata: Value) -> Result<()> {
        // The node returns null on success; nothing to decode.
        self.call_raw(RpcMethod::AiRegisterModel, json!([model_hash, metadata]))
            .await?;
        Ok(())
    }

    /// Metadata for a registered model, if any.
    pub async fn ai_get_model(&self, model_hash: TxHash) -> Result<Option<Value>> {
        self.call_opt(RpcMethod::AiGetModel, json!([model_hash]))
            .await
    }

    /// All registered model hashes.
    pub async fn ai_list_models(&self) -> Result<Vec<TxHash>> {
        self.call(RpcMethod::AiListModels, json!([])).await
    }
}

#[async_trait]
impl LedgerRpc for AetherClient {
    async fn get_account(&self, address: Address) -> Result<Account> {
        self.call(RpcMethod::GetAccount, json!([address])).await
    }

    async fn send_transaction(&self, envelope: &TxEnvelope) -> Result<TxHash> {
        self.call(RpcMethod::SendTransaction, json!([envelope]))
            .await
    }

    async fn get_transaction_receipt(&self, hash: TxHash) -> Result<Option<TransactionReceipt>> {
        self.call_opt(RpcMethod::GetTransactionReceipt, json!([hash]))
            .await
    }

    async fn ai_get_job(&self, job_id: TxHash) -> Result<Option<AiJob>> {
        self.call_opt(RpcMethod::AiGetJob, json!([job_id])).await
    }

    async fn ai_verify_vcr(&self, vcr: &VerifiableComputeReceipt) -> Result<VcrVerification> {
        self.call(RpcMethod::AiVerifyVcr, json!([vcr])).await
    }

    async fn ai_get_provider_reputation(&self, provider: Address) -> Result<ProviderReputation> {
        self.call(RpcMethod::AiGetProviderReputation, json!([provider]))
            .await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_normalized() {
        let client = AetherClient::new("http://localhost:8545///").unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8545");
    }

    #[test]
    fn default_config_matches_constants() {
        let client = AetherClient::new("http://localhost:8545").unwrap();
        let cfg = client.config();
        assert_eq!(cfg.default_fee, config::DEFAULT_FEE);
        assert_eq!(cfg.default_gas_limit, config::DEFAULT_GAS_LIMIT);
        assert_eq!(cfg.receipt_poll_interval, config::RECEIPT_POLL_INTERVAL);
        assert_eq!(cfg.job_timeout, config::JOB_TIMEOUT);
    }

    #[tokio::test]
    async fn unreachable_node_surfaces_as_transport_error() {
        // A port nothing listens on; the request must fail at the
        // transport layer, not as an RPC or not-found error.
        let client = AetherClient::new("http://127.0.0.1:1").unwrap();
        match client.get_slot().await {
            Err(SdkError::Transport(_)) => {}
            other => panic!("expected Transport error, got {other:?}"),
        }
    }
}
