//! Text projections of a [`Snapshot`] for the host to render.
//!
//! Stateless; nothing here feeds back into the scheduler.

use crate::duration::format_clock;
use crate::timer::Snapshot;

/// `"Work Session 3"`, `"Short Break"` or `"Long Break"`.
pub fn phase_label(snapshot: &Snapshot) -> String {
    if snapshot.is_long_break {
        "Long Break".into()
    } else if snapshot.is_break {
        "Short Break".into()
    } else {
        format!("Work Session {}", snapshot.current_session)
    }
}

/// Window/tab title, e.g. `"23:59 - Work Session 1"`.
pub fn window_title(snapshot: &Snapshot) -> String {
    format!(
        "{} - {}",
        format_clock(snapshot.time_left),
        phase_label(snapshot)
    )
}

/// `"Completed Cycles: 2"`, or `"Completed Cycles: 2 / 4"` when bounded.
pub fn cycles_label(snapshot: &Snapshot) -> String {
    if snapshot.total_cycles > 0 {
        format!(
            "Completed Cycles: {} / {}",
            snapshot.completed_cycles, snapshot.total_cycles
        )
    } else {
        format!("Completed Cycles: {}", snapshot.completed_cycles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::{BreakScheduler, CycleConfig};

    #[test]
    fn work_title() {
        let scheduler = BreakScheduler::new(CycleConfig::default());
        assert_eq!(
            window_title(&scheduler.snapshot()),
            "24:00 - Work Session 1"
        );
    }

    #[test]
    fn break_labels() {
        let mut scheduler = BreakScheduler::new(CycleConfig {
            sessions_before_long_break: 1,
            long_break_duration: 3600,
            ..CycleConfig::default()
        });
        scheduler.switch_mode();
        let snap = scheduler.snapshot();
        assert_eq!(phase_label(&snap), "Long Break");
        assert_eq!(window_title(&snap), "01:00:00 - Long Break");

        let mut scheduler = BreakScheduler::default();
        scheduler.switch_mode();
        assert_eq!(phase_label(&scheduler.snapshot()), "Short Break");
    }

    #[test]
    fn cycles_label_shows_bound() {
        let unbounded = BreakScheduler::default().snapshot();
        assert_eq!(cycles_label(&unbounded), "Completed Cycles: 0");

        let bounded = BreakScheduler::new(CycleConfig {
            total_cycles: 4,
            ..CycleConfig::default()
        })
        .snapshot();
        assert_eq!(cycles_label(&bounded), "Completed Cycles: 0 / 4");
    }
}
