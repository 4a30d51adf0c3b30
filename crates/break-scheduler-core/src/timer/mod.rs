mod config;
mod engine;
mod phase;

pub use config::CycleConfig;
pub use engine::{BreakScheduler, SchedulerState, Snapshot};
pub use phase::Phase;
