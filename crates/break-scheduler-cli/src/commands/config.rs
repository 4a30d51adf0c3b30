use break_scheduler_core::{CommitOutcome, ConfigField};
use clap::Subcommand;
use serde_json::json;

use crate::session::{CliResult, HostSession};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Field (work, short-break, long-break, sessions, total-cycles)
        field: ConfigField,
    },
    /// Set a config value
    Set {
        /// Field (work, short-break, long-break, sessions, total-cycles)
        field: ConfigField,
        /// New value; durations accept expressions like "1m30s", "+5m", "-30s"
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
}

pub fn run(action: ConfigAction) -> CliResult {
    let mut session = HostSession::open()?;

    match action {
        ConfigAction::Get { field } => {
            println!("{}", session.editor.display(field));
        }
        ConfigAction::Set { field, value } => match session.commit(field, &value) {
            CommitOutcome::Applied { value, .. } => {
                session.persist()?;
                println!("{field} = {} ({value} seconds)", session.editor.display(field));
            }
            CommitOutcome::Reverted { shown, reason, .. } => {
                return Err(format!("invalid value for {field}: {reason}; keeping {shown}").into());
            }
        },
        ConfigAction::List => {
            let listing = json!({
                "config": session.editor.config(),
                "raw": session.editor.raw(),
            });
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
        ConfigAction::Reset => {
            session.reset_config();
            session.persist()?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
