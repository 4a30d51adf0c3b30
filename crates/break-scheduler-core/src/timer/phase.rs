use serde::{Deserialize, Serialize};

/// The scheduler's current mode.
///
/// Whether the countdown is running is tracked separately, so a paused break
/// and a paused work session are both representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Phase {
    Working { session: u32 },
    ShortBreak,
    LongBreak,
}

impl Phase {
    pub fn is_break(self) -> bool {
        matches!(self, Phase::ShortBreak | Phase::LongBreak)
    }

    pub fn is_long_break(self) -> bool {
        self == Phase::LongBreak
    }
}
