use std::time::Duration;

use clap::Subcommand;
use tokio::time::MissedTickBehavior;

use crate::session::{CliResult, HostSession};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start (or resume) the countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Back to work session 1; completed cycles are kept
    Reset,
    /// Switch phase immediately
    Switch,
    /// Leave the break, overriding enforcement
    Skip,
    /// Leave the break, only if enforcement has been lifted
    Next,
    /// Report the break-enforcement verdict (true = stay on break)
    Enforce {
        #[arg(action = clap::ArgAction::Set)]
        enforced: bool,
    },
    /// Advance the countdown by hand
    Tick {
        /// Number of seconds to advance
        #[arg(long, default_value = "1")]
        count: u64,
    },
    /// Print current timer state as JSON
    Status,
    /// Run the countdown in the foreground until Ctrl-C
    Run {
        /// Stop after this many ticks
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        ticks: Option<u64>,
    },
}

pub async fn run(action: TimerAction) -> CliResult {
    let mut session = HostSession::open()?;

    let event = match action {
        TimerAction::Start => session.scheduler.start(),
        TimerAction::Pause => session.scheduler.pause(),
        TimerAction::Reset => session.scheduler.reset(),
        TimerAction::Switch => session.scheduler.switch_mode(),
        TimerAction::Skip => session.scheduler.skip(),
        TimerAction::Next => {
            if !session.scheduler.phase().is_break() {
                return Err("not on a break".into());
            }
            match session.scheduler.leave_break() {
                Some(event) => Some(event),
                None => {
                    return Err(
                        "break is still enforced; use `timer skip` to override".into()
                    )
                }
            }
        }
        TimerAction::Enforce { enforced } => session.scheduler.set_enforced(enforced),
        TimerAction::Tick { count } => {
            let mut last = None;
            for _ in 0..count {
                // Ticks only advance a running countdown.
                if let Some(event) = session.scheduler.tick() {
                    last = Some(event);
                }
            }
            last
        }
        TimerAction::Status => None,
        TimerAction::Run { ticks } => return run_foreground(&mut session, ticks).await,
    };

    session.persist()?;
    session.print_report(event.as_ref())
}

/// The host tick source: one scheduler tick per interval, persisting after
/// each, serialised with Ctrl-C on a single task.
async fn run_foreground(session: &mut HostSession, ticks: Option<u64>) -> CliResult {
    if let Some(event) = session.scheduler.start() {
        println!("{}", serde_json::to_string(&event)?);
    }
    session.persist()?;

    let period = Duration::from_millis(session.settings.tick_interval_ms.max(1));
    let mut interval = tokio::time::interval(period);
    // Drift is tolerated; missed ticks are not replayed.
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval.tick().await;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut remaining = ticks;
    loop {
        tokio::select! {
            _ = interval.tick() => {
                let event = session.scheduler.tick();
                session.persist()?;
                println!("{}", session.title());
                if let Some(event) = event {
                    println!("{}", serde_json::to_string(&event)?);
                }
                if !session.scheduler.is_running() {
                    break;
                }
                if let Some(n) = remaining.as_mut() {
                    *n = n.saturating_sub(1);
                    if *n == 0 {
                        break;
                    }
                }
            }
            _ = &mut ctrl_c => {
                tracing::debug!("interrupted");
                break;
            }
        }
    }

    // Leaving the foreground loop pauses the countdown.
    session.scheduler.pause();
    session.persist()?;
    session.print_report(None)
}
