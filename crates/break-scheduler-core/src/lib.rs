//! # Break Scheduler Core Library
//!
//! This library provides the core logic for the Break Scheduler work/break
//! interval timer. The binary in `break-scheduler-cli` is a thin host over
//! the same library: it supplies the tick source and the persistence store.
//!
//! ## Architecture
//!
//! - **Scheduler**: A tick-driven state machine; the caller invokes `tick()`
//!   once per second and persists a snapshot after every change
//! - **Duration parser**: Free-form duration edits (`"1m30s"`, `"+5m"`) to seconds
//! - **Editor**: Validated configuration commits with a text mirror
//! - **Storage**: SQLite key-value records and TOML host settings
//!
//! ## Key Components
//!
//! - [`BreakScheduler`]: Core break-cycle state machine
//! - [`ConfigEditor`]: Configuration commit boundary
//! - [`StateStore`]: Snapshot persistence over any [`KvStore`]
//! - [`parse_duration_expr`]: Duration expression parser

pub mod display;
pub mod duration;
pub mod editor;
pub mod error;
pub mod events;
pub mod storage;
pub mod timer;

pub use duration::{format_clock, format_duration_text, parse_duration_expr};
pub use editor::{CommitOutcome, ConfigEditor, ConfigField, RawInputs};
pub use error::{ConfigError, CoreError, DatabaseError, ParseError, ValidationError};
pub use events::Event;
pub use storage::{Database, KvStore, MemoryStore, Settings, StateStore, StoredSession};
pub use timer::{BreakScheduler, CycleConfig, Phase, SchedulerState, Snapshot};
