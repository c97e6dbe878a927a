//! # Completion Tracker
//!
//! One generic bounded-polling state machine, instantiated twice: waiting
//! for a transaction receipt and waiting for an AI job to finish. The
//! mechanism is the same in both cases — probe remote state, classify it,
//! sleep, repeat until a terminal state or the deadline — so it lives here
//! once instead of being duplicated per domain.
//!
//! ## Timing
//!
//! All time flows through the [`Clock`] trait. Production code uses
//! [`SystemClock`] (tokio timers); tests use [`ManualClock`] and advance
//! time explicitly, so every tracker test is deterministic and instant.
//! Suspension happens only inside the clock's sleep — probes themselves are
//! the only other await points, and they are the caller's RPC futures.
//!
//! ## Outcome discipline
//!
//! - A classified failure (a challenged job, a failed execution) surfaces
//!   immediately as [`SdkError::Remote`] — the ledger said no.
//! - Running out the deadline surfaces as [`SdkError::Timeout`] — we
//!   stopped asking. The two are never mapped into each other.
//! - The deadline is re-checked before any probe result is examined, so a
//!   success that arrives after expiry does not win.
//! - A probe returning `None` means "not found yet" and counts as still
//!   pending; instantiations where the identifier must exist (job waits)
//!   translate `None` into [`SdkError::NotFound`] in their probe instead.
//!
//! Each wait owns its loop, its deadline, and its clock reading. There is
//! no shared mutable state between concurrent waits; fan out as many as you
//! like and join them.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::ai::types::{AiJob, JobStatus};
use crate::error::SdkError;
use crate::rpc::LedgerRpc;
use crate::transaction::types::{TransactionReceipt, TransactionStatus};
use crate::types::TxHash;

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Source of monotonic time and sleeps for the tracker.
///
/// `now()` readings are relative to an arbitrary origin; only differences
/// are meaningful.
#[async_trait]
pub trait Clock: Send + Sync {
    /// Monotonic reading.
    fn now(&self) -> Duration;

    /// Suspend for `dur`.
    async fn sleep(&self, dur: Duration);
}

/// The production clock: monotonic `Instant` readings and tokio sleeps.
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: std::time::Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    async fn sleep(&self, dur: Duration) {
        tokio::time::sleep(dur).await;
    }
}

/// A hand-cranked clock for deterministic tests.
///
/// `sleep` advances time instantly (yielding once to the scheduler), and
/// [`advance`](ManualClock::advance) lets a test move time from outside —
/// e.g. to simulate a probe that straddles the deadline. Clones share the
/// same underlying time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
}

impl ManualClock {
    /// A manual clock starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward without sleeping.
    pub fn advance(&self, dur: Duration) {
        self.nanos
            .fetch_add(dur.as_nanos() as u64, Ordering::SeqCst);
    }
}

#[async_trait]
impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::SeqCst))
    }

    async fn sleep(&self, dur: Duration) {
        self.advance(dur);
        tokio::task::yield_now().await;
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// What a probed state means for the wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Not terminal; keep polling.
    Pending,
    /// Terminal success; the wait yields the probed state.
    Complete,
    /// Terminal failure; the wait raises [`SdkError::Remote`] with this
    /// reason.
    Failed(String),
}

// ---------------------------------------------------------------------------
// Tracker
// ---------------------------------------------------------------------------

/// A configured polling wait: interval, timeout, and a clock.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use aether_sdk::tracker::Tracker;
///
/// let tracker = Tracker::new(Duration::from_secs(1), Duration::from_secs(30));
/// # let _ = tracker;
/// ```
#[derive(Debug, Clone)]
pub struct Tracker<C: Clock = SystemClock> {
    clock: C,
    interval: Duration,
    timeout: Duration,
}

impl Tracker<SystemClock> {
    /// A tracker on the system clock.
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self::with_clock(SystemClock::default(), interval, timeout)
    }
}

impl<C: Clock> Tracker<C> {
    /// A tracker on an explicit clock. Tests pass a [`ManualClock`].
    pub fn with_clock(clock: C, interval: Duration, timeout: Duration) -> Self {
        Self {
            clock,
            interval,
            timeout,
        }
    }

    /// The configured poll interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// The configured timeout budget.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run the generic wait loop.
    ///
    /// `probe` fetches the current remote state (`Ok(None)` = not found
    /// yet = still pending; an `Err` aborts the wait unchanged). `classify`
    /// maps a fetched state to [`Classification`]. On `Complete` the most
    /// recently probed state is returned — never a stale one.
    ///
    /// `what` labels the wait in log output.
    pub async fn track<S, P, Fut, F>(
        &self,
        what: &str,
        mut probe: P,
        classify: F,
    ) -> Result<S, SdkError>
    where
        P: FnMut() -> Fut,
        Fut: Future<Output = Result<Option<S>, SdkError>>,
        F: Fn(&S) -> Classification,
    {
        let start = self.clock.now();
        let deadline = start + self.timeout;

        loop {
            let now = self.clock.now();
            if now >= deadline {
                let waited = now - start;
                tracing::warn!(what, ?waited, "wait timed out");
                return Err(SdkError::Timeout { waited });
            }

            let probed = probe().await?;

            // The probe may have taken arbitrarily long; if the deadline
            // passed while it was in flight, timeout wins even over a
            // terminal result.
            let now = self.clock.now();
            if now >= deadline {
                let waited = now - start;
                tracing::warn!(what, ?waited, "wait timed out");
                return Err(SdkError::Timeout { waited });
            }

            match probed {
                None => {
                    tracing::debug!(what, "not found yet; still waiting");
                }
                Some(state) => match classify(&state) {
                    Classification::Complete => {
                        tracing::debug!(what, waited = ?(now - start), "wait complete");
                        return Ok(state);
                    }
                    Classification::Failed(reason) => {
                        tracing::debug!(what, %reason, "wait hit remote failure");
                        return Err(SdkError::Remote { reason });
                    }
                    Classification::Pending => {
                        tracing::debug!(what, "still pending");
                    }
                },
            }

            self.clock.sleep(self.interval).await;
        }
    }

    /// Wait for a submitted transaction's receipt.
    ///
    /// Instantiation one of the tracker: an absent receipt means "not
    /// included yet" and the loop keeps polling. A receipt with `failed`
    /// execution status is a remote failure, not a timeout and not a
    /// success. Structural validity of the hash is guaranteed by the
    /// [`TxHash`] type, so there is nothing to fail fast on here — a
    /// malformed textual hash never parses in the first place.
    pub async fn transaction_receipt<R>(
        &self,
        rpc: &R,
        hash: TxHash,
    ) -> Result<TransactionReceipt, SdkError>
    where
        R: LedgerRpc + ?Sized,
    {
        self.track(
            "transaction receipt",
            || rpc.get_transaction_receipt(hash),
            |receipt: &TransactionReceipt| match receipt.status {
                TransactionStatus::Success => Classification::Complete,
                TransactionStatus::Failed => Classification::Failed(format!(
                    "transaction {} failed in block slot {}",
                    receipt.transaction_hash, receipt.block_slot
                )),
            },
        )
        .await
    }

    /// Wait for an AI job to reach `completed` or `settled`.
    ///
    /// Instantiation two of the tracker: the job id was handed out by the
    /// ledger, so a probe finding nothing is [`SdkError::NotFound`], not
    /// "still pending". A job observed in `challenged` state fails the
    /// wait immediately. A `completed` job with absent result bytes is a
    /// success with an empty result — returned as-is.
    pub async fn job_completion<R>(&self, rpc: &R, job_id: TxHash) -> Result<AiJob, SdkError>
    where
        R: LedgerRpc + ?Sized,
    {
        self.track(
            "job completion",
            move || async move {
                match rpc.ai_get_job(job_id).await? {
                    Some(job) => Ok(Some(job)),
                    None => Err(SdkError::not_found(format!("job {job_id}"))),
                }
            },
            |job: &AiJob| {
                if job.status.is_complete() {
                    Classification::Complete
                } else if job.status == JobStatus::Challenged {
                    Classification::Failed(format!("job {} was challenged", job.id))
                } else {
                    Classification::Pending
                }
            },
        )
        .await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn tracker(clock: &ManualClock, interval_ms: u64, timeout_ms: u64) -> Tracker<ManualClock> {
        Tracker::with_clock(
            clock.clone(),
            Duration::from_millis(interval_ms),
            Duration::from_millis(timeout_ms),
        )
    }

    #[tokio::test]
    async fn pending_forever_times_out_within_one_interval_of_budget() {
        let clock = ManualClock::new();
        let t = tracker(&clock, 10, 95);
        let probes = Arc::new(AtomicUsize::new(0));

        let result: Result<(), SdkError> = t
            .track(
                "stub",
                {
                    let probes = probes.clone();
                    move || {
                        let probes = probes.clone();
                        async move {
                            probes.fetch_add(1, Ordering::SeqCst);
                            Ok(Some(()))
                        }
                    }
                },
                |_| Classification::Pending,
            )
            .await;

        match result {
            Err(SdkError::Timeout { waited }) => {
                assert!(waited >= Duration::from_millis(95));
                // No later than timeout + one poll interval.
                assert!(waited <= Duration::from_millis(105));
            }
            other => panic!("expected Timeout, got {other:?}"),
        }
        // Probes at t = 0, 10, …, 90.
        assert_eq!(probes.load(Ordering::SeqCst), 10);
    }

    #[tokio::test]
    async fn success_on_third_probe_returns_after_two_intervals() {
        let clock = ManualClock::new();
        let t = tracker(&clock, 10, 10_000);
        let probes = Arc::new(AtomicUsize::new(0));

        let result = t
            .track(
                "stub",
                {
                    let probes = probes.clone();
                    move || {
                        let probes = probes.clone();
                        async move { Ok(Some(probes.fetch_add(1, Ordering::SeqCst) + 1)) }
                    }
                },
                |n: &usize| {
                    if *n >= 3 {
                        Classification::Complete
                    } else {
                        Classification::Pending
                    }
                },
            )
            .await
            .unwrap();

        assert_eq!(result, 3);
        assert_eq!(probes.load(Ordering::SeqCst), 3);
        // Two sleeps happened before the deciding probe; not earlier.
        assert_eq!(clock.now(), Duration::from_millis(20));
    }

    #[tokio::test]
    async fn classified_failure_short_circuits() {
        let clock = ManualClock::new();
        let t = tracker(&clock, 10, 60_000);
        let probes = Arc::new(AtomicUsize::new(0));

        let result: Result<u32, SdkError> = t
            .track(
                "stub",
                {
                    let probes = probes.clone();
                    move || {
                        let probes = probes.clone();
                        async move {
                            probes.fetch_add(1, Ordering::SeqCst);
                            Ok(Some(7))
                        }
                    }
                },
                |_| Classification::Failed("challenged".into()),
            )
            .await;

        match result {
            Err(SdkError::Remote { reason }) => assert_eq!(reason, "challenged"),
            other => panic!("expected Remote, got {other:?}"),
        }
        // Failure on the very first observation, no further polling.
        assert_eq!(probes.load(Ordering::SeqCst), 1);
        assert_eq!(clock.now(), Duration::ZERO);
    }

    #[tokio::test]
    async fn timeout_wins_over_late_success() {
        let clock = ManualClock::new();
        let t = tracker(&clock, 10, 50);

        // The probe "takes" 60ms and then reports success. The deadline
        // passed mid-probe, so the wait must still time out.
        let result: Result<&str, SdkError> = t
            .track(
                "stub",
                {
                    let clock = clock.clone();
                    move || {
                        let clock = clock.clone();
                        async move {
                            clock.advance(Duration::from_millis(60));
                            Ok(Some("late"))
                        }
                    }
                },
                |_| Classification::Complete,
            )
            .await;

        assert!(matches!(result, Err(SdkError::Timeout { .. })));
    }

    #[tokio::test]
    async fn none_counts_as_pending_not_error() {
        let clock = ManualClock::new();
        let t = tracker(&clock, 10, 10_000);
        let probes = Arc::new(AtomicUsize::new(0));

        let result = t
            .track(
                "stub",
                {
                    let probes = probes.clone();
                    move || {
                        let probes = probes.clone();
                        async move {
                            let n = probes.fetch_add(1, Ordering::SeqCst) + 1;
                            if n < 3 {
                                Ok(None)
                            } else {
                                Ok(Some(n))
                            }
                        }
                    }
                },
                |_: &usize| Classification::Complete,
            )
            .await
            .unwrap();

        assert_eq!(result, 3);
    }

    #[tokio::test]
    async fn probe_errors_propagate_unchanged() {
        let clock = ManualClock::new();
        let t = tracker(&clock, 10, 10_000);

        let result: Result<(), SdkError> = t
            .track(
                "stub",
                || async { Err(SdkError::not_found("job 0xdead")) },
                |_: &()| Classification::Complete,
            )
            .await;

        // NotFound stays NotFound — not Remote, not Timeout.
        assert!(matches!(result, Err(SdkError::NotFound { .. })));
    }

    #[tokio::test]
    async fn zero_timeout_never_probes() {
        let clock = ManualClock::new();
        let t = tracker(&clock, 10, 0);
        let probes = Arc::new(AtomicUsize::new(0));

        let result: Result<(), SdkError> = t
            .track(
                "stub",
                {
                    let probes = probes.clone();
                    move || {
                        let probes = probes.clone();
                        async move {
                            probes.fetch_add(1, Ordering::SeqCst);
                            Ok(Some(()))
                        }
                    }
                },
                |_| Classification::Complete,
            )
            .await;

        assert!(matches!(result, Err(SdkError::Timeout { .. })));
        assert_eq!(probes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn system_clock_wait_lands_in_expected_window() {
        // Real-time sanity check of the same third-probe scenario: with a
        // 10ms interval, success on the third probe arrives after ~20ms of
        // sleeping, well before the 1s budget.
        let t = Tracker::new(Duration::from_millis(10), Duration::from_secs(1));
        let probes = Arc::new(AtomicUsize::new(0));
        let started = std::time::Instant::now();

        let result = t
            .track(
                "stub",
                {
                    let probes = probes.clone();
                    move || {
                        let probes = probes.clone();
                        async move { Ok(Some(probes.fetch_add(1, Ordering::SeqCst) + 1)) }
                    }
                },
                |n: &usize| {
                    if *n >= 3 {
                        Classification::Complete
                    } else {
                        Classification::Pending
                    }
                },
            )
            .await
            .unwrap();

        let elapsed = started.elapsed();
        assert_eq!(result, 3);
        assert!(elapsed >= Duration::from_millis(15), "returned too early");
        assert!(elapsed < Duration::from_millis(500), "took far too long");
    }

    #[tokio::test]
    async fn concurrent_waits_are_independent() {
        let clock = ManualClock::new();
        let fast = tracker(&clock, 10, 10_000);
        let doomed = tracker(&clock, 10, 35);

        let fast_wait = fast.track(
            "fast",
            || async { Ok(Some(1u32)) },
            |_| Classification::Complete,
        );
        let doomed_wait = doomed.track(
            "doomed",
            || async { Ok(Some(2u32)) },
            |_| Classification::Pending,
        );

        let (a, b) = tokio::join!(fast_wait, doomed_wait);
        assert_eq!(a.unwrap(), 1);
        assert!(matches!(b, Err(SdkError::Timeout { .. })));
    }
}
