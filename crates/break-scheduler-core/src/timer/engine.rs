//! Break-cycle scheduler.
//!
//! A tick-driven state machine. It does not use internal threads or read the
//! clock - the caller invokes `tick()` once per elapsed second while the
//! countdown is running, and issues user commands in between.
//!
//! ## Phase transitions
//!
//! ```text
//! Working(n) --(n % sessions_before_long_break != 0)--> ShortBreak
//! Working(n) --(n % sessions_before_long_break == 0)--> LongBreak
//! ShortBreak | LongBreak --> Working(n + 1), completed_cycles += 1
//! ```
//!
//! Breaks start enforced. The enforcement surface clears the flag through
//! `set_enforced(false)`; `skip()` overrides it unconditionally.
//!
//! ## Usage
//!
//! ```
//! use break_scheduler_core::{BreakScheduler, CycleConfig};
//!
//! let mut scheduler = BreakScheduler::new(CycleConfig::default());
//! scheduler.start();
//! // Once per second:
//! if let Some(event) = scheduler.tick() {
//!     println!("{event:?}");
//! }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::{CycleConfig, Phase};
use crate::events::Event;

/// Read-only view of the scheduler handed to the host each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub time_left: u64,
    pub is_break: bool,
    pub is_long_break: bool,
    pub current_session: u32,
    pub completed_cycles: u32,
    pub total_cycles: u32,
    pub is_running: bool,
    pub enforced: bool,
    pub halted: bool,
}

/// Persistable scheduler record, enough to resume after a reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerState {
    pub phase: Phase,
    pub time_left: u64,
    pub current_session: u32,
    pub completed_cycles: u32,
    pub is_running: bool,
    #[serde(default)]
    pub enforced: bool,
    #[serde(default)]
    pub halted: bool,
}

/// The countdown state machine.
///
/// Owns all mutable scheduler state; every operation is synchronous and total.
#[derive(Debug, Clone)]
pub struct BreakScheduler {
    config: CycleConfig,
    phase: Phase,
    /// Seconds remaining in the current phase.
    time_left: u64,
    current_session: u32,
    completed_cycles: u32,
    is_running: bool,
    enforced: bool,
    /// Set while the cycle limit holds back an expired phase.
    halted: bool,
}

impl BreakScheduler {
    /// Create a scheduler at the start of the first work session, paused.
    pub fn new(config: CycleConfig) -> Self {
        Self {
            config,
            phase: Phase::Working { session: 1 },
            time_left: config.work_duration,
            current_session: 1,
            completed_cycles: 0,
            is_running: false,
            enforced: false,
            halted: false,
        }
    }

    /// Rebuild a scheduler from a stored record.
    ///
    /// Out-of-range values are clamped so that a record read back verbatim,
    /// or one written under a different configuration, cannot break the
    /// scheduler's invariants.
    pub fn restore(config: CycleConfig, state: SchedulerState) -> Self {
        let current_session = state.current_session.max(1);
        let phase = match state.phase {
            Phase::Working { .. } => Phase::Working {
                session: current_session,
            },
            other => other,
        };
        let time_left = state.time_left.min(config.duration_of(phase));
        Self {
            config,
            phase,
            time_left,
            current_session,
            completed_cycles: state.completed_cycles,
            is_running: state.is_running,
            enforced: phase.is_break() && state.enforced,
            // A halt always parks the countdown at zero.
            halted: state.halted && time_left == 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn config(&self) -> &CycleConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn time_left(&self) -> u64 {
        self.time_left
    }

    pub fn current_session(&self) -> u32 {
        self.current_session
    }

    pub fn completed_cycles(&self) -> u32 {
        self.completed_cycles
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    /// Whether the current break forbids returning to work.
    pub fn enforced(&self) -> bool {
        self.enforced
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Whether the configured cycle limit has been reached.
    pub fn cycles_exhausted(&self) -> bool {
        self.config.is_bounded() && self.completed_cycles >= self.config.total_cycles
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            time_left: self.time_left,
            is_break: self.phase.is_break(),
            is_long_break: self.phase.is_long_break(),
            current_session: self.current_session,
            completed_cycles: self.completed_cycles,
            total_cycles: self.config.total_cycles,
            is_running: self.is_running,
            enforced: self.enforced,
            halted: self.halted,
        }
    }

    pub fn state(&self) -> SchedulerState {
        SchedulerState {
            phase: self.phase,
            time_left: self.time_left,
            current_session: self.current_session,
            completed_cycles: self.completed_cycles,
            is_running: self.is_running,
            enforced: self.enforced,
            halted: self.halted,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if self.is_running {
            return None;
        }
        self.is_running = true;
        Some(Event::TimerStarted {
            phase: self.phase,
            time_left: self.time_left,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.is_running {
            return None;
        }
        self.is_running = false;
        Some(Event::TimerPaused {
            time_left: self.time_left,
            at: Utc::now(),
        })
    }

    /// Restart from the first work session. `completed_cycles` is kept.
    pub fn reset(&mut self) -> Option<Event> {
        self.phase = Phase::Working { session: 1 };
        self.current_session = 1;
        self.time_left = self.config.work_duration;
        self.is_running = false;
        self.enforced = false;
        self.halted = false;
        Some(Event::TimerReset {
            completed_cycles: self.completed_cycles,
            at: Utc::now(),
        })
    }

    /// Advance the countdown by one second.
    ///
    /// Returns an event when the phase expired. At most one transition
    /// happens per tick, so a zero-length phase expires on the next tick.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.is_running {
            return None;
        }
        if self.halted {
            if self.cycles_exhausted() {
                self.is_running = false;
                return None;
            }
            // The limit was raised or lifted: run the held-back transition.
            return Some(self.transition(false));
        }

        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left > 0 {
            return None;
        }
        Some(self.expire())
    }

    /// Force a phase transition now, regardless of the time left.
    pub fn switch_mode(&mut self) -> Option<Event> {
        Some(self.transition(true))
    }

    /// Record the enforcement surface's verdict. Ignored outside breaks.
    pub fn set_enforced(&mut self, enforced: bool) -> Option<Event> {
        if !self.phase.is_break() || self.enforced == enforced {
            return None;
        }
        self.enforced = enforced;
        Some(Event::EnforcementChanged {
            enforced,
            at: Utc::now(),
        })
    }

    /// Explicit override: re-arm enforcement, then switch phase.
    pub fn skip(&mut self) -> Option<Event> {
        self.enforced = true;
        self.switch_mode()
    }

    /// Return to work early, only if the current break is no longer enforced.
    pub fn leave_break(&mut self) -> Option<Event> {
        if !self.phase.is_break() || self.enforced {
            return None;
        }
        Some(self.transition(true))
    }

    /// Swap in a new configuration.
    ///
    /// An untouched countdown (paused at its full length) picks up the new
    /// length; otherwise the time left is only clamped to it.
    pub fn set_config(&mut self, config: CycleConfig) -> Option<Event> {
        let untouched = !self.is_running
            && !self.halted
            && self.time_left == self.config.duration_of(self.phase);
        self.config = config;

        let full = config.duration_of(self.phase);
        self.time_left = if untouched {
            full
        } else {
            self.time_left.min(full)
        };
        Some(Event::ConfigChanged {
            config,
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn expire(&mut self) -> Event {
        if self.cycles_exhausted() {
            return self.halt();
        }
        if self.phase.is_break()
            && self.config.is_bounded()
            && self.completed_cycles + 1 >= self.config.total_cycles
        {
            // The final break ends the run; no further work session starts.
            self.completed_cycles += 1;
            return self.halt();
        }
        self.transition(false)
    }

    fn halt(&mut self) -> Event {
        self.halted = true;
        self.is_running = false;
        self.enforced = false;
        self.time_left = 0;
        tracing::debug!(
            completed_cycles = self.completed_cycles,
            "cycle limit reached, halting"
        );
        Event::CyclesCompleted {
            completed_cycles: self.completed_cycles,
            at: Utc::now(),
        }
    }

    fn transition(&mut self, manual: bool) -> Event {
        let from = self.phase;
        match from {
            Phase::Working { session } => {
                let every = self.config.sessions_before_long_break.max(1);
                self.phase = if session % every == 0 {
                    Phase::LongBreak
                } else {
                    Phase::ShortBreak
                };
                self.enforced = true;
            }
            Phase::ShortBreak | Phase::LongBreak => {
                // A halted break was already counted when it halted.
                if !self.halted {
                    self.completed_cycles = self.completed_cycles.saturating_add(1);
                }
                self.current_session = self.current_session.saturating_add(1);
                self.phase = Phase::Working {
                    session: self.current_session,
                };
                self.enforced = false;
            }
        }
        self.halted = false;
        self.time_left = self.config.duration_of(self.phase);

        tracing::debug!(
            ?from,
            to = ?self.phase,
            session = self.current_session,
            completed_cycles = self.completed_cycles,
            manual,
            "phase transition"
        );
        Event::PhaseChanged {
            from,
            to: self.phase,
            session: self.current_session,
            completed_cycles: self.completed_cycles,
            manual,
            at: Utc::now(),
        }
    }
}

impl Default for BreakScheduler {
    fn default() -> Self {
        Self::new(CycleConfig::default())
    }
}
