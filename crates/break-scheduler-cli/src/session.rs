//! Host-side glue: loads the stored records, owns the editor and the
//! scheduler for the lifetime of one command, and persists after changes.

use break_scheduler_core::display::{cycles_label, window_title};
use break_scheduler_core::{
    BreakScheduler, CommitOutcome, ConfigEditor, ConfigField, Database, Event, Settings,
    Snapshot, StateStore,
};
use serde::Serialize;

pub type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

pub struct HostSession {
    store: StateStore<Database>,
    pub editor: ConfigEditor,
    pub scheduler: BreakScheduler,
    pub settings: Settings,
}

/// What one-shot commands print.
#[derive(Serialize)]
struct Report<'a> {
    title: String,
    cycles: String,
    snapshot: Snapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    event: Option<&'a Event>,
}

impl HostSession {
    pub fn open() -> CliResult<Self> {
        let settings = Settings::load_or_default();
        let store = StateStore::new(Database::open()?);
        let stored = store.load();
        let mut scheduler = stored.scheduler();

        if !settings.resume_running && scheduler.pause().is_some() {
            tracing::info!("stored countdown was running; paused on reload");
        }

        Ok(Self {
            store,
            editor: stored.editor,
            scheduler,
            settings,
        })
    }

    pub fn persist(&self) -> CliResult {
        self.store.persist(&self.editor, &self.scheduler)?;
        Ok(())
    }

    /// Commit an edit and hand the resulting configuration to the scheduler.
    pub fn commit(&mut self, field: ConfigField, text: &str) -> CommitOutcome {
        let outcome = self.editor.commit_text(field, text);
        if outcome.is_applied() {
            self.scheduler.set_config(*self.editor.config());
        }
        outcome
    }

    /// Replace the whole configuration with defaults.
    pub fn reset_config(&mut self) {
        self.editor = ConfigEditor::default();
        self.scheduler.set_config(*self.editor.config());
    }

    pub fn title(&self) -> String {
        window_title(&self.scheduler.snapshot())
    }

    pub fn print_report(&self, event: Option<&Event>) -> CliResult {
        let snapshot = self.scheduler.snapshot();
        let report = Report {
            title: window_title(&snapshot),
            cycles: cycles_label(&snapshot),
            snapshot,
            event,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        Ok(())
    }
}
