//! JSON-RPC 2.0 wire shapes.
//!
//! The Aether node speaks JSON-RPC 2.0 over HTTP POST. This module defines
//! the request/response envelopes, the typed method enumeration, and the
//! error object with the node's error-code conventions. The HTTP plumbing
//! lives in [`super::client`].
//!
//! ## Method index (abridged)
//!
//! | Method                      | Description                             |
//! |-----------------------------|-----------------------------------------|
//! | `getSlot`                   | Current chain slot                      |
//! | `getAccount`                | Account state (balance, nonce)          |
//! | `sendTransaction`           | Submit a signed transaction envelope    |
//! | `getTransactionReceipt`     | Inclusion receipt, `null` until included|
//! | `staking_*`                 | Validator and delegation queries        |
//! | `governance_*`              | Proposal and vote queries               |
//! | `ai_getJob`                 | AI job state, `null` if unknown         |
//! | `ai_verifyVCR`              | Delegated compute-receipt verification  |
//!
//! Error codes follow the JSON-RPC 2.0 specification (`-32700…-32603`) plus
//! the node's application range: `-32000` transaction not found, `-32001`
//! block not found, `-32002` account not found, `-32003` rejected by
//! mempool, `-32004` node syncing.

use serde::{Deserialize, Serialize, Serializer};

use crate::error::SdkError;

// ---------------------------------------------------------------------------
// RPC method enumeration
// ---------------------------------------------------------------------------

/// Every JSON-RPC method the SDK issues.
///
/// The wire name is the string produced by [`as_str`](RpcMethod::as_str);
/// serialization goes through it, so the table below is the single source
/// of truth for method names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RpcMethod {
    // Chain queries
    GetSlot,
    GetBlock,
    GetBlockByHash,
    GetLatestBlock,
    GetTransaction,
    GetAccount,
    SendTransaction,
    SendRawTransaction,
    GetTransactionReceipt,
    EstimateGas,
    // Staking
    StakingGetValidator,
    StakingGetValidators,
    StakingGetDelegation,
    StakingGetDelegations,
    StakingGetPendingRewards,
    StakingGetTotalStake,
    StakingGetMinimumStake,
    // Governance
    GovernanceGetProposal,
    GovernanceGetActiveProposals,
    GovernanceGetAllProposals,
    GovernanceGetVote,
    GovernanceGetVotingPower,
    GovernanceGetQuorum,
    // AI marketplace
    AiGetJob,
    AiGetJobsByCreator,
    AiGetJobsByProvider,
    AiGetPendingJobs,
    AiGetVcr,
    AiVerifyVcr,
    AiGetJobStats,
    AiGetProviderReputation,
    AiRegisterModel,
    AiGetModel,
    AiListModels,
}

impl RpcMethod {
    /// The method name on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GetSlot => "getSlot",
            Self::GetBlock => "getBlock",
            Self::GetBlockByHash => "getBlockByHash",
            Self::GetLatestBlock => "getLatestBlock",
            Self::GetTransaction => "getTransaction",
            Self::GetAccount => "getAccount",
            Self::SendTransaction => "sendTransaction",
            Self::SendRawTransaction => "sendRawTransaction",
            Self::GetTransactionReceipt => "getTransactionReceipt",
            Self::EstimateGas => "estimateGas",
            Self::StakingGetValidator => "staking_getValidator",
            Self::StakingGetValidators => "staking_getValidators",
            Self::StakingGetDelegation => "staking_getDelegation",
            Self::StakingGetDelegations => "staking_getDelegations",
            Self::StakingGetPendingRewards => "staking_getPendingRewards",
            Self::StakingGetTotalStake => "staking_getTotalStake",
            Self::StakingGetMinimumStake => "staking_getMinimumStake",
            Self::GovernanceGetProposal => "governance_getProposal",
            Self::GovernanceGetActiveProposals => "governance_getActiveProposals",
            Self::GovernanceGetAllProposals => "governance_getAllProposals",
            Self::GovernanceGetVote => "governance_getVote",
            Self::GovernanceGetVotingPower => "governance_getVotingPower",
            Self::GovernanceGetQuorum => "governance_getQuorum",
            Self::AiGetJob => "ai_getJob",
            Self::AiGetJobsByCreator => "ai_getJobsByCreator",
            Self::AiGetJobsByProvider => "ai_getJobsByProvider",
            Self::AiGetPendingJobs => "ai_getPendingJobs",
            Self::AiGetVcr => "ai_getVCR",
            Self::AiVerifyVcr => "ai_verifyVCR",
            Self::AiGetJobStats => "ai_getJobStats",
            Self::AiGetProviderReputation => "ai_getProviderReputation",
            Self::AiRegisterModel => "ai_registerModel",
            Self::AiGetModel => "ai_getModel",
            Self::AiListModels => "ai_listModels",
        }
    }
}

impl Serialize for RpcMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl std::fmt::Display for RpcMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Request / response envelopes
// ---------------------------------------------------------------------------

/// A JSON-RPC 2.0 request.
#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest {
    /// Always `"2.0"`.
    pub jsonrpc: &'static str,
    /// Request id, echoed back by the node.
    pub id: u64,
    /// The method to invoke.
    pub method: RpcMethod,
    /// Positional parameters.
    pub params: serde_json::Value,
}

impl RpcRequest {
    /// A request with positional parameters.
    pub fn new(id: u64, method: RpcMethod, params: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method,
            params,
        }
    }
}

/// A JSON-RPC 2.0 error object.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorObject {
    /// Numeric error code.
    pub code: i64,
    /// Human-readable message.
    pub message: String,
    /// Optional extra context.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl RpcErrorObject {
    /// `true` for the node's "no such record" code range: transaction,
    /// block, or account not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self.code, -32002..=-32000)
    }
}

/// A JSON-RPC 2.0 response.
///
/// A conforming node sets exactly one of `result` and `error`; a `null`
/// result is a legitimate answer (e.g. a receipt that does not exist yet),
/// not an error.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse {
    /// Version echoed by the node. Always `"2.0"`.
    pub jsonrpc: String,
    /// The id of the request this answers.
    pub id: u64,
    /// The result payload, when the call succeeded.
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    /// The error object, when it failed.
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
}

impl RpcResponse {
    /// Fold the response into the SDK error taxonomy.
    ///
    /// Node-side "not found" codes become [`SdkError::NotFound`]; every
    /// other error object becomes [`SdkError::Rpc`]. A missing `result`
    /// is `null` — the caller decides whether `null` is meaningful.
    pub fn into_result(self) -> Result<serde_json::Value, SdkError> {
        if let Some(err) = self.error {
            if err.is_not_found() {
                return Err(SdkError::NotFound { what: err.message });
            }
            return Err(SdkError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        Ok(self.result.unwrap_or(serde_json::Value::Null))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_with_wire_method_name() {
        let req = RpcRequest::new(7, RpcMethod::AiVerifyVcr, json!([{"job_id": "0x00"}]));
        let encoded = serde_json::to_value(&req).unwrap();

        assert_eq!(encoded["jsonrpc"], "2.0");
        assert_eq!(encoded["id"], 7);
        assert_eq!(encoded["method"], "ai_verifyVCR");
        assert!(encoded["params"].is_array());
    }

    #[test]
    fn method_names_keep_their_namespaces() {
        assert_eq!(RpcMethod::GetSlot.as_str(), "getSlot");
        assert_eq!(RpcMethod::StakingGetValidators.as_str(), "staking_getValidators");
        assert_eq!(RpcMethod::GovernanceGetQuorum.as_str(), "governance_getQuorum");
        assert_eq!(RpcMethod::AiGetJob.as_str(), "ai_getJob");
    }

    #[test]
    fn success_response_folds_to_value() {
        let resp: RpcResponse =
            serde_json::from_value(json!({"jsonrpc": "2.0", "id": 1, "result": {"slot": 42}}))
                .unwrap();
        let value = resp.into_result().unwrap();
        assert_eq!(value["slot"], 42);
    }

    #[test]
    fn null_result_is_not_an_error() {
        let resp: RpcResponse =
            serde_json::from_value(json!({"jsonrpc": "2.0", "id": 1, "result": null})).unwrap();
        assert_eq!(resp.into_result().unwrap(), serde_json::Value::Null);
    }

    #[test]
    fn not_found_codes_map_to_not_found() {
        for code in [-32000i64, -32001, -32002] {
            let resp: RpcResponse = serde_json::from_value(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": {"code": code, "message": "missing"}
            }))
            .unwrap();
            assert!(matches!(
                resp.into_result(),
                Err(SdkError::NotFound { .. })
            ));
        }
    }

    #[test]
    fn other_codes_map_to_rpc_error() {
        let resp: RpcResponse = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": -32603, "message": "boom"}
        }))
        .unwrap();
        match resp.into_result() {
            Err(SdkError::Rpc { code, message }) => {
                assert_eq!(code, -32603);
                assert_eq!(message, "boom");
            }
            other => panic!("expected Rpc error, got {other:?}"),
        }
    }
}
