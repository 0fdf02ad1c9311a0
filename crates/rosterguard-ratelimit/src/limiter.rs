use crate::identity::RequestIdentity;
use crate::observe;
use crate::policy::RateLimitPolicy;
use crate::store::WindowStore;
use rosterguard_types::prelude::{Clock, SystemClock};
use std::sync::Arc;
#[cfg(feature = "sweeper")]
use std::time::Duration;
use tracing::{debug, warn};

/// Throttling metadata for an admitted request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateLimitInfo {
    pub limit: u32,
    pub remaining: u32,
    pub reset_at_ms: i64,
}

/// Throttling metadata for a rejected request. `remaining` is always 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rejection {
    pub retry_after_secs: u64,
    pub limit: u32,
    pub remaining: u32,
    pub reset_at_ms: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Admit(RateLimitInfo),
    Reject(Rejection),
}

impl Decision {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Decision::Admit(_))
    }

    pub fn reset_at_ms(&self) -> i64 {
        match self {
            Decision::Admit(info) => info.reset_at_ms,
            Decision::Reject(rejection) => rejection.reset_at_ms,
        }
    }
}

/// When the limiter drops expired windows on its own.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SweepTrigger {
    /// Sweep after a `decide` call with the given probability (clamped to `0.0..=1.0`).
    Probabilistic(f64),
    /// Only explicit `sweep` calls or a spawned sweeper task remove records.
    Never,
}

impl SweepTrigger {
    pub const DEFAULT_PROBABILITY: f64 = 0.01;

    fn fires(self) -> bool {
        match self {
            SweepTrigger::Never => false,
            SweepTrigger::Probabilistic(p) if p >= 1.0 => true,
            SweepTrigger::Probabilistic(p) if p <= 0.0 || p.is_nan() => false,
            SweepTrigger::Probabilistic(p) => rand::random::<f64>() < p,
        }
    }
}

impl Default for SweepTrigger {
    fn default() -> Self {
        SweepTrigger::Probabilistic(Self::DEFAULT_PROBABILITY)
    }
}

pub struct RateLimiter {
    store: Arc<WindowStore>,
    clock: Arc<dyn Clock>,
    sweep: SweepTrigger,
}

impl RateLimiter {
    pub fn new(clock: Arc<dyn Clock>, sweep: SweepTrigger) -> Self {
        Self::with_store(Arc::new(WindowStore::new()), clock, sweep)
    }

    pub fn with_store(store: Arc<WindowStore>, clock: Arc<dyn Clock>, sweep: SweepTrigger) -> Self {
        Self {
            store,
            clock,
            sweep,
        }
    }

    /// Wall-clock limiter with the default probabilistic sweep.
    pub fn system() -> Self {
        Self::new(Arc::new(SystemClock), SweepTrigger::default())
    }

    pub fn store(&self) -> &Arc<WindowStore> {
        &self.store
    }

    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    /// Admission decision for `identity` under `policy` at the limiter's current time.
    pub fn check(&self, policy: &RateLimitPolicy, identity: &RequestIdentity) -> Decision {
        self.decide(policy, identity, self.clock.now_ms())
    }

    /// The first `max_requests` observations in a window are admitted; every
    /// later one in the same window is rejected.
    pub fn decide(
        &self,
        policy: &RateLimitPolicy,
        identity: &RequestIdentity,
        now_ms: i64,
    ) -> Decision {
        let key = policy.key_for(identity);
        let snapshot = self.store.observe(&key, now_ms, policy.window_ms());
        let limit = policy.max_requests();

        let decision = if snapshot.count > u64::from(limit) {
            let wait_ms = snapshot.reset_at_ms.saturating_sub(now_ms).max(0) as u64;
            Decision::Reject(Rejection {
                retry_after_secs: wait_ms.div_ceil(1_000).max(1),
                limit,
                remaining: 0,
                reset_at_ms: snapshot.reset_at_ms,
            })
        } else {
            Decision::Admit(RateLimitInfo {
                limit,
                remaining: limit.saturating_sub(snapshot.count as u32),
                reset_at_ms: snapshot.reset_at_ms,
            })
        };

        if !decision.is_admitted() {
            warn!(
                key = %key,
                count = snapshot.count,
                labels = ?observe::labels(policy, &decision),
                "rate limit exceeded"
            );
        }

        if self.sweep.fires() {
            self.sweep(now_ms);
        }

        decision
    }

    pub fn sweep(&self, now_ms: i64) -> usize {
        let removed = self.store.sweep(now_ms);
        if removed > 0 {
            debug!(removed, remaining = self.store.len(), "swept expired rate-limit windows");
        }
        removed
    }

    /// Sweep on a fixed interval from a tokio task. The task stops once the
    /// limiter is dropped.
    #[cfg(feature = "sweeper")]
    pub fn spawn_sweeper(self: &Arc<Self>, every: Duration) -> tokio::task::JoinHandle<()> {
        let weak = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let Some(limiter) = weak.upgrade() else {
                    break;
                };
                limiter.sweep(limiter.now_ms());
            }
        })
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("records", &self.store.len())
            .field("sweep", &self.sweep)
            .finish()
    }
}
