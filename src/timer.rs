// src/timer.rs
use crate::billing::BillingPolicy;
use crate::clock::Clock;
use crate::error::AppError;
use crate::models::CallSummary;
use chrono::{DateTime, Local};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Lifecycle of the single tracked call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallPhase {
    /// No call in flight.
    Idle,
    /// Call in progress, elapsed time advancing.
    Running,
    /// Call in progress, elapsed time frozen.
    Paused,
    /// Call finished; holds until the record is saved or skipped.
    Ended,
}

/// Call timing state machine.
///
/// Elapsed time is derived arithmetically from monotonic timestamps on every
/// query; the live display and the end-of-call bill read the same value. The
/// wall clock is captured only for the human-readable start/end timestamps.
pub struct CallTimer<C: Clock> {
    clock: C,
    phase: CallPhase,
    monotonic_start: Option<Instant>,
    wall_start: Option<DateTime<Local>>,
    paused_accumulated: Duration,
    pause_started_at: Option<Instant>,
    final_elapsed: Duration,
}

impl<C: Clock> CallTimer<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            phase: CallPhase::Idle,
            monotonic_start: None,
            wall_start: None,
            paused_accumulated: Duration::ZERO,
            pause_started_at: None,
            final_elapsed: Duration::ZERO,
        }
    }

    pub fn phase(&self) -> CallPhase {
        self.phase
    }

    /// Start a new call. Refuses while a session is active (including an
    /// ended one awaiting save/skip) so the caller can ask the operator for
    /// confirmation before discarding it.
    pub fn start(&mut self) -> Result<(), AppError> {
        if self.phase != CallPhase::Idle {
            return Err(AppError::CallInProgress);
        }
        self.begin();
        Ok(())
    }

    /// Start a new call, discarding any active session without emitting a
    /// record for it. Call only after the operator has confirmed.
    pub fn force_start(&mut self) {
        if self.phase != CallPhase::Idle {
            info!("Discarding active session, starting over");
        }
        self.begin();
    }

    fn begin(&mut self) {
        let now = self.clock.monotonic();
        self.phase = CallPhase::Running;
        self.monotonic_start = Some(now);
        self.wall_start = Some(self.clock.wall());
        self.paused_accumulated = Duration::ZERO;
        self.pause_started_at = None;
        self.final_elapsed = Duration::ZERO;
        info!("Call started");
    }

    /// Toggle between Running and Paused. No-op in any other phase.
    pub fn pause(&mut self) {
        match self.phase {
            CallPhase::Running => {
                self.pause_started_at = Some(self.clock.monotonic());
                self.phase = CallPhase::Paused;
                debug!("Call paused");
            }
            CallPhase::Paused => {
                self.fold_open_pause();
                self.phase = CallPhase::Running;
                debug!("Call resumed");
            }
            CallPhase::Idle | CallPhase::Ended => {}
        }
    }

    /// End the call and produce its summary. The phase stays Ended until
    /// [`reset`](Self::reset) so the summary can be annotated and saved (or
    /// skipped) before a new call may begin.
    pub fn end(&mut self, policy: &BillingPolicy) -> Result<CallSummary, AppError> {
        match self.phase {
            CallPhase::Running | CallPhase::Paused => {}
            CallPhase::Idle | CallPhase::Ended => return Err(AppError::NoActiveCall),
        }

        self.fold_open_pause();
        self.final_elapsed = self.live_elapsed();
        self.phase = CallPhase::Ended;

        let ended_at = self.clock.wall();
        let started_at = self.wall_start.unwrap_or(ended_at);
        let summary = CallSummary::new(policy, self.final_elapsed.as_secs(), started_at, ended_at);
        info!(
            "Call ended: {}s elapsed, charge {}",
            summary.elapsed_seconds, summary.final_charge
        );
        Ok(summary)
    }

    /// Return to Idle once the ended call's record has been saved or
    /// explicitly skipped.
    pub fn reset(&mut self) {
        self.phase = CallPhase::Idle;
        self.monotonic_start = None;
        self.wall_start = None;
        self.paused_accumulated = Duration::ZERO;
        self.pause_started_at = None;
        self.final_elapsed = Duration::ZERO;
    }

    /// Active call duration excluding paused intervals. Pure query, valid in
    /// every phase: zero while Idle, advancing while Running, frozen while
    /// Paused and after Ended. Both the live display and the final bill read
    /// this.
    pub fn elapsed(&self) -> Duration {
        match self.phase {
            CallPhase::Idle => Duration::ZERO,
            CallPhase::Ended => self.final_elapsed,
            CallPhase::Running | CallPhase::Paused => self.live_elapsed(),
        }
    }

    /// Time left inside the free minimum, `None` once charging applies (or
    /// when no minimum is configured).
    pub fn remaining_free(&self, policy: &BillingPolicy) -> Option<Duration> {
        if policy.minimum_seconds <= 0 {
            return None;
        }
        let elapsed = self.elapsed().as_secs() as i64;
        if elapsed > policy.minimum_seconds {
            None
        } else {
            Some(Duration::from_secs((policy.minimum_seconds - elapsed) as u64))
        }
    }

    /// Suggested refresh cadence for a polling display: fast while the timer
    /// is advancing, relaxed otherwise.
    pub fn poll_interval(&self) -> Duration {
        match self.phase {
            CallPhase::Running => Duration::from_millis(200),
            _ => Duration::from_millis(700),
        }
    }

    fn fold_open_pause(&mut self) {
        if let Some(pause_started) = self.pause_started_at.take() {
            let now = self.clock.monotonic();
            self.paused_accumulated += now.duration_since(pause_started);
        }
    }

    fn live_elapsed(&self) -> Duration {
        let start = match self.monotonic_start {
            Some(start) => start,
            None => return Duration::ZERO,
        };
        let now = self.clock.monotonic();
        let mut elapsed = now
            .duration_since(start)
            .saturating_sub(self.paused_accumulated);
        if let Some(pause_started) = self.pause_started_at {
            elapsed = elapsed.saturating_sub(now.duration_since(pause_started));
        }
        elapsed
    }
}
