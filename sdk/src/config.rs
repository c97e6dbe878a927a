//! # SDK Constants
//!
//! Every default and protocol magic number the SDK uses lives here.
//! Hardcoding one of these at a call site instead is how two parts of the
//! SDK end up disagreeing about a timeout.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Network
// ---------------------------------------------------------------------------

/// Chain id of the Aether main network.
pub const CHAIN_ID_MAINNET: u64 = 1;

/// Chain id of the public test network.
pub const CHAIN_ID_TESTNET: u64 = 2;

/// Default HTTP timeout for a single JSON-RPC round trip.
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Transaction defaults
// ---------------------------------------------------------------------------

/// Default fee attached by the convenience helpers, in the smallest
/// denomination. Callers building transactions directly set their own.
pub const DEFAULT_FEE: u64 = 2_000_000;

/// Default gas limit attached by the convenience helpers.
pub const DEFAULT_GAS_LIMIT: u64 = 500_000;

// ---------------------------------------------------------------------------
// Wait budgets
// ---------------------------------------------------------------------------

/// Poll interval while waiting for a transaction receipt.
pub const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Total budget for a transaction-receipt wait.
pub const RECEIPT_TIMEOUT: Duration = Duration::from_secs(30);

/// Poll interval while waiting for an AI job.
pub const JOB_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Total budget for an AI-job wait. Compute jobs are slow; five minutes
/// covers the marketplace's assignment plus typical inference time.
pub const JOB_TIMEOUT: Duration = Duration::from_secs(300);

// ---------------------------------------------------------------------------
// Governance / staking bounds
// ---------------------------------------------------------------------------

/// Validator commission ceiling, in basis points (100% = 10_000).
pub const MAX_COMMISSION_BPS: u64 = 10_000;

/// Proposal title length bounds, in characters.
pub const PROPOSAL_TITLE_MAX: usize = 256;

/// Proposal description length bound, in characters.
pub const PROPOSAL_DESCRIPTION_MAX: usize = 10_000;

/// Default proposal voting window, in slots (about one week).
pub const DEFAULT_PROPOSAL_DURATION_SLOTS: u64 = 100_800;
