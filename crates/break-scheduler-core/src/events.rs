use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{CycleConfig, Phase};

/// Every state change the scheduler makes produces an Event.
/// The host decides what to do with them (print, log, notify).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        time_left: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        time_left: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        completed_cycles: u32,
        at: DateTime<Utc>,
    },
    /// The phase changed, either because the countdown expired or because
    /// the user forced it (`manual`).
    PhaseChanged {
        from: Phase,
        to: Phase,
        session: u32,
        completed_cycles: u32,
        manual: bool,
        at: DateTime<Utc>,
    },
    /// The break-enforcement surface changed its verdict.
    EnforcementChanged {
        enforced: bool,
        at: DateTime<Utc>,
    },
    /// The cycle limit was reached; the countdown is halted.
    CyclesCompleted {
        completed_cycles: u32,
        at: DateTime<Utc>,
    },
    ConfigChanged {
        config: CycleConfig,
        at: DateTime<Utc>,
    },
}
