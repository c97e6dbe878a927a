//! # Governance
//!
//! Proposal and voting operations: typed forwarding over the
//! `governance_*` RPC namespace plus transaction builders for the
//! governance system contract.

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;

use crate::config::{
    DEFAULT_PROPOSAL_DURATION_SLOTS, PROPOSAL_DESCRIPTION_MAX, PROPOSAL_TITLE_MAX,
};
use crate::contracts::{CallData, GOVERNANCE_CONTRACT};
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

/// Where a proposal stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    /// Voting window open.
    Active,
    /// Quorum reached, majority in favor; awaiting execution.
    Passed,
    /// Voting ended without passing.
    Rejected,
    /// Passed and executed.
    Executed,
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Active => "active",
            Self::Passed => "passed",
            Self::Rejected => "rejected",
            Self::Executed => "executed",
        };
        write!(f, "{s}")
    }
}

/// A governance proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Sequential proposal id.
    pub id: u64,
    /// Proposing account.
    pub proposer: Address,
    /// Short title.
    pub title: String,
    /// Full description.
    pub description: String,
    /// Voting power in favor.
    pub votes_for: u64,
    /// Voting power against.
    pub votes_against: u64,
    /// Current status.
    pub status: ProposalStatus,
    /// First slot of the voting window.
    pub start_slot: u64,
    /// Last slot of the voting window.
    pub end_slot: u64,
}

/// One cast vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    /// The proposal voted on.
    pub proposal_id: u64,
    /// The voting account.
    pub voter: Address,
    /// `true` for yes.
    pub support: bool,
    /// Voting power applied.
    pub voting_power: u64,
}

/// A proposal together with derived context for display and decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalSummary {
    /// The proposal itself.
    pub proposal: Proposal,
    /// Whether total votes have reached quorum.
    pub has_quorum: bool,
    /// Slots left in the voting window (0 once closed).
    pub slots_remaining: u64,
    /// Whether `executeProposal` would be accepted right now.
    pub can_execute: bool,
}

// ---------------------------------------------------------------------------
// Governance helper
// ---------------------------------------------------------------------------

/// Governance operations, bound to an [`AetherClient`].
///
/// Obtained via [`AetherClient::governance`].
pub struct Governance<'a> {
    client: &'a AetherClient,
}

impl<'a> Governance<'a> {
    pub(crate) fn new(client: &'a AetherClient) -> Self {
        Self { client }
    }

    // -- queries ------------------------------------------------------------

    /// A proposal by id, if it exists.
    pub async fn proposal(&self, proposal_id: u64) -> Result<Option<Proposal>> {
        self.client
            .call_opt(RpcMethod::GovernanceGetProposal, json!([proposal_id]))
            .await
    }

    /// Proposals currently open for voting.
    pub async fn active_proposals(&self) -> Result<Vec<Proposal>> {
        self.client
            .call(RpcMethod::GovernanceGetActiveProposals, json!([]))
            .await
    }

    /// Every proposal ever made.
    pub async fn all_proposals(&self) -> Result<Vec<Proposal>> {
        self.client
            .call(RpcMethod::GovernanceGetAllProposals, json!([]))
            .await
    }

    /// `voter`'s vote on a proposal, if cast.
    pub async fn vote_of(&self, proposal_id: u64, voter: Address) -> Result<Option<Vote>> {
        self.client
            .call_opt(RpcMethod::GovernanceGetVote, json!([proposal_id, voter]))
            .await
    }

    /// Voting power of an address.
    pub async fn voting_power(&self, address: Address) -> Result<u64> {
        self.client
            .call(RpcMethod::GovernanceGetVotingPower, json!([address]))
            .await
    }

    /// The network quorum threshold.
    pub async fn quorum(&self) -> Result<u64> {
        self.client
            .call(RpcMethod::GovernanceGetQuorum, json!([]))
            .await
    }

    /// Whether a proposal has reached quorum. `NotFound` for an unknown
    /// proposal id — absence is an answer the caller must see, not a
    /// silent `false`.
    pub async fn has_quorum(&self, proposal_id: u64) -> Result<bool> {
        let proposal = self
            .proposal(proposal_id)
            .await?
            .ok_or_else(|| SdkError::not_found(format!("proposal {proposal_id}")))?;
        let quorum = self.quorum().await?;
        Ok(proposal.votes_for + proposal.votes_against >= quorum)
    }

    /// A proposal with its quorum state, remaining window, and
    /// executability.
    pub async fn proposal_status(&self, proposal_id: u64) -> Result<ProposalSummary> {
        let proposal = self
            .proposal(proposal_id)
            .await?
            .ok_or_else(|| SdkError::not_found(format!("proposal {proposal_id}")))?;
        let quorum = self.quorum().await?;
        let current_slot = self.client.get_slot().await?;

        let has_quorum = proposal.votes_for + proposal.votes_against >= quorum;
        let slots_remaining = proposal.end_slot.saturating_sub(current_slot);
        let can_execute = proposal.status == ProposalStatus::Passed;

        Ok(ProposalSummary {
            proposal,
            has_quorum,
            slots_remaining,
            can_execute,
        })
    }

    // -- transactions -------------------------------------------------------

    /// Build the transaction creating a proposal.
    ///
    /// Title must be 1–256 characters and description 1–10 000; both are
    /// checked locally. `duration_slots` defaults to about one week.
    pub async fn create_proposal(
        &self,
        keypair: &Keypair,
        title: &str,
        description: &str,
        duration_slots: Option<u64>,
    ) -> Result<Transaction> {
        if title.is_empty() || title.len() > PROPOSAL_TITLE_MAX {
            return Err(SdkError::invalid(format!(
                "title must be between 1 and {PROPOSAL_TITLE_MAX} characters"
            )));
        }
        if description.is_empty() || description.len() > PROPOSAL_DESCRIPTION_MAX {
            return Err(SdkError::invalid(format!(
                "description must be between 1 and {PROPOSAL_DESCRIPTION_MAX} characters"
            )));
        }

        let duration = duration_slots.unwrap_or(DEFAULT_PROPOSAL_DURATION_SLOTS);
        let data = CallData::new("createProposal")
            .text(title)
            .text(description)
            .u64(duration)
            .build();
        self.governance_call(keypair, data).await
    }

    /// Build the transaction voting on a proposal.
    pub async fn vote(
        &self,
        keypair: &Keypair,
        proposal_id: u64,
        support: bool,
    ) -> Result<Transaction> {
        let data = CallData::new("vote")
            .u64(proposal_id)
            .bool(support)
            .build();
        self.governance_call(keypair, data).await
    }

    /// Build the transaction executing a passed proposal.
    ///
    /// The proposal is looked up first: an unknown id is `NotFound`, and a
    /// proposal not in `passed` state is rejected locally instead of
    /// burning a fee on a doomed submission.
    pub async fn execute_proposal(
        &self,
        keypair: &Keypair,
        proposal_id: u64,
    ) -> Result<Transaction> {
        let proposal = self
            .proposal(proposal_id)
            .await?
            .ok_or_else(|| SdkError::not_found(format!("proposal {proposal_id}")))?;
        if proposal.status != ProposalStatus::Passed {
            return Err(SdkError::invalid(format!(
                "proposal {proposal_id} is {}, not passed",
                proposal.status
            )));
        }

        let data = CallData::new("executeProposal").u64(proposal_id).build();
        self.governance_call(keypair, data).await
    }

    async fn governance_call(&self, keypair: &Keypair, data: Vec<u8>) -> Result<Transaction> {
        let nonce = self.client.get_nonce(keypair.address()).await?;
        let cfg = self.client.config();
        let tx = TransactionBuilder::call(GOVERNANCE_CONTRACT, data)
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
