mod database;
mod settings;
mod state;

pub use database::Database;
pub use settings::Settings;
pub use state::{
    KvStore, MemoryStore, StateStore, StoredSession, CONFIG_KEY, RAW_INPUTS_KEY, STATE_KEY,
};

use std::path::PathBuf;

/// Returns `~/.config/break-scheduler[-dev]/` based on BREAK_SCHEDULER_ENV.
///
/// Set BREAK_SCHEDULER_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> crate::error::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("BREAK_SCHEDULER_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("break-scheduler-dev")
    } else {
        base_dir.join("break-scheduler")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
