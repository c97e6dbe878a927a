//! # Staking
//!
//! Validator and delegation operations: thin typed forwarding over the
//! `staking_*` RPC namespace plus transaction builders for the staking
//! system contract.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::MAX_COMMISSION_BPS;
use crate::contracts::{CallData, STAKING_CONTRACT};
use crate::crypto::keys::Keypair;
use crate::error::{Result, SdkError};
use crate::rpc::jsonrpc::RpcMethod;
use crate::rpc::AetherClient;
use crate::transaction::builder::TransactionBuilder;
use crate::transaction::types::Transaction;
use crate::types::Address;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A registered validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Validator {
    /// Validator account address.
    pub address: Address,
    /// Self-bonded stake.
    pub stake: u64,
    /// Stake delegated by others.
    pub delegated_stake: u64,
    /// Commission on delegation rewards, in basis points.
    pub commission: u64,
    /// `true` while in the active set.
    pub active: bool,
    /// Fraction of assigned slots actually produced.
    pub uptime: f64,
}

/// One delegator→validator stake position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delegation {
    /// The delegating account.
    pub delegator: Address,
    /// The validator delegated to.
    pub validator: Address,
    /// Delegated amount.
    pub amount: u64,
    /// Accrued, unclaimed rewards.
    pub rewards: u64,
}

// ---------------------------------------------------------------------------
// Staking helper
// ---------------------------------------------------------------------------

/// Staking operations, bound to an [`AetherClient`].
///
/// Obtained via [`AetherClient::staking`]. Query methods forward directly;
/// transaction methods build signed transactions against the staking
/// contract without submitting them.
pub struct Staking<'a> {
    client: &'a AetherClient,
}

impl<'a> Staking<'a> {
    pub(crate) fn new(client: &'a AetherClient) -> Self {
        Self { client }
    }

    // -- queries ------------------------------------------------------------

    /// A validator's registration and stake, if registered.
    pub async fn validator(&self, address: Address) -> Result<Option<Validator>> {
        self.client
            .call_opt(RpcMethod::StakingGetValidator, json!([address]))
            .await
    }

    /// The full active validator set.
    pub async fn validators(&self) -> Result<Vec<Validator>> {
        self.client
            .call(RpcMethod::StakingGetValidators, json!([]))
            .await
    }

    /// One delegation position, if it exists.
    pub async fn delegation(
        &self,
        delegator: Address,
        validator: Address,
    ) -> Result<Option<Delegation>> {
        self.client
            .call_opt(RpcMethod::StakingGetDelegation, json!([delegator, validator]))
            .await
    }

    /// Every delegation held by `delegator`.
    pub async fn delegations(&self, delegator: Address) -> Result<Vec<Delegation>> {
        self.client
            .call(RpcMethod::StakingGetDelegations, json!([delegator]))
            .await
    }

    /// Unclaimed rewards for an address.
    pub async fn pending_rewards(&self, address: Address) -> Result<u64> {
        self.client
            .call(RpcMethod::StakingGetPendingRewards, json!([address]))
            .await
    }

    /// Total stake bonded across the network.
    pub async fn total_stake(&self) -> Result<u64> {
        self.client
            .call(RpcMethod::StakingGetTotalStake, json!([]))
            .await
    }

    /// The minimum self-bond for validator registration.
    pub async fn minimum_stake(&self) -> Result<u64> {
        self.client
            .call(RpcMethod::StakingGetMinimumStake, json!([]))
            .await
    }

    // -- transactions -------------------------------------------------------

    /// Build the transaction registering the keypair's account as a
    /// validator with `stake` self-bonded and `commission_bps` commission.
    ///
    /// Commission above 10 000 basis points (100%) is rejected locally.
    pub async fn register_validator(
        &self,
        keypair: &Keypair,
        stake: u64,
        commission_bps: u64,
    ) -> Result<Transaction> {
        if commission_bps > MAX_COMMISSION_BPS {
            return Err(SdkError::invalid(format!(
                "commission must be at most {MAX_COMMISSION_BPS} basis points, got {commission_bps}"
            )));
        }
        let data = CallData::new("registerValidator")
            .u64(commission_bps)
            .build();
        self.staking_call(keypair, data, stake).await
    }

    /// Build the transaction delegating `amount` to `validator`.
    pub async fn delegate(
        &self,
        keypair: &Keypair,
        validator: Address,
        amount: u64,
    ) -> Result<Transaction> {
        let data = CallData::new("delegate").address(&validator).build();
        self.staking_call(keypair, data, amount).await
    }

    /// Build the transaction undelegating `amount` from `validator`.
    pub async fn undelegate(
        &self,
        keypair: &Keypair,
        validator: Address,
        amount: u64,
    ) -> Result<Transaction> {
        let data = CallData::new("undelegate")
            .address(&validator)
            .u64(amount)
            .build();
        self.staking_call(keypair, data, 0).await
    }

    /// Build the transaction claiming all accrued rewards.
    pub async fn claim_rewards(&self, keypair: &Keypair) -> Result<Transaction> {
        let data = CallData::new("claimRewards").build();
        self.staking_call(keypair, data, 0).await
    }

    async fn staking_call(
        &self,
        keypair: &Keypair,
        data: Vec<u8>,
        amount: u64,
    ) -> Result<Transaction> {
        let nonce = self.client.get_nonce(keypair.address()).await?;
        let cfg = self.client.config();
        let tx = TransactionBuilder::call(STAKING_CONTRACT, data)
            .amount(amount)
            .fee(cfg.default_fee)
            .gas_limit(cfg.default_gas_limit)
            .nonce(nonce)
            .build(keypair)?;
        Ok(tx)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
