use serde::{Deserialize, Serialize};

use super::Phase;
use crate::error::ValidationError;

/// Durations and cycle bounds the scheduler runs with.
///
/// Replaced wholesale whenever the user commits an edit. Serialized with the
/// camelCase field names of the stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleConfig {
    /// Work session length in seconds.
    #[serde(default = "default_work_duration")]
    pub work_duration: u64,
    /// Short break length in seconds.
    #[serde(default = "default_short_break")]
    pub short_break_duration: u64,
    /// Long break length in seconds.
    #[serde(default = "default_long_break")]
    pub long_break_duration: u64,
    /// Every Nth work session is followed by a long break.
    #[serde(default = "default_sessions_before_long_break")]
    pub sessions_before_long_break: u32,
    /// Stop after this many cycles; `0` runs forever.
    #[serde(default)]
    pub total_cycles: u32,
}

fn default_work_duration() -> u64 {
    24 * 60
}
fn default_short_break() -> u64 {
    5 * 60
}
fn default_long_break() -> u64 {
    15 * 60
}
fn default_sessions_before_long_break() -> u32 {
    4
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            work_duration: default_work_duration(),
            short_break_duration: default_short_break(),
            long_break_duration: default_long_break(),
            sessions_before_long_break: default_sessions_before_long_break(),
            total_cycles: 0,
        }
    }
}

impl CycleConfig {
    /// Check the invariants the scheduler relies on.
    ///
    /// # Errors
    ///
    /// Returns an error if `sessions_before_long_break` is zero.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.sessions_before_long_break < 1 {
            return Err(ValidationError::InvalidValue {
                field: "sessionsBeforeLongBreak".into(),
                message: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Configured length of `phase` in seconds.
    pub fn duration_of(&self, phase: Phase) -> u64 {
        match phase {
            Phase::Working { .. } => self.work_duration,
            Phase::ShortBreak => self.short_break_duration,
            Phase::LongBreak => self.long_break_duration,
        }
    }

    /// Whether a cycle limit is set.
    pub fn is_bounded(&self) -> bool {
        self.total_cycles > 0
    }
}
