//! Persisted scheduler records.
//!
//! Three JSON records are kept in a key-value store: the configuration, the
//! duration text mirror, and the scheduler state. They are always written
//! together as whole snapshots, so the store never needs read-modify-write.
//! Reading never fails: anything missing or unreadable falls back to
//! defaults.

use std::cell::RefCell;
use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::editor::{ConfigEditor, RawInputs};
use crate::error::Result;
use crate::timer::{BreakScheduler, CycleConfig, SchedulerState};

pub const CONFIG_KEY: &str = "break_timer_config";
pub const RAW_INPUTS_KEY: &str = "break_timer_raw_inputs";
pub const STATE_KEY: &str = "break_timer_state";

/// Minimal string key-value store.
pub trait KvStore {
    fn kv_get(&self, key: &str) -> Result<Option<String>>;

    fn kv_set(&self, key: &str, value: &str) -> Result<()>;

    fn kv_set_all(&self, entries: &[(&str, String)]) -> Result<()> {
        for (key, value) in entries {
            self.kv_set(key, value)?;
        }
        Ok(())
    }
}

/// In-process store, for embedding without a database and for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn kv_get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn kv_set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<T: KvStore + ?Sized> KvStore for &T {
    fn kv_get(&self, key: &str) -> Result<Option<String>> {
        (**self).kv_get(key)
    }

    fn kv_set(&self, key: &str, value: &str) -> Result<()> {
        (**self).kv_set(key, value)
    }

    fn kv_set_all(&self, entries: &[(&str, String)]) -> Result<()> {
        (**self).kv_set_all(entries)
    }
}

/// Everything recovered from the store at startup.
#[derive(Debug, Clone)]
pub struct StoredSession {
    pub editor: ConfigEditor,
    pub state: Option<SchedulerState>,
}

impl StoredSession {
    /// Build the scheduler, resuming the stored state when there is one.
    pub fn scheduler(&self) -> BreakScheduler {
        let config = *self.editor.config();
        match self.state {
            Some(state) => BreakScheduler::restore(config, state),
            None => BreakScheduler::new(config),
        }
    }
}

/// Reads and writes the three scheduler records.
pub struct StateStore<S> {
    store: S,
}

impl<S: KvStore> StateStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Load the stored records, falling back to defaults for anything
    /// missing or corrupt.
    pub fn load(&self) -> StoredSession {
        let stored_config = self
            .read_record::<CycleConfig>(CONFIG_KEY)
            .filter(|config| match config.validate() {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(error = %e, "stored configuration is invalid, using defaults");
                    false
                }
            });

        let editor = match stored_config {
            Some(config) => {
                let raw = self
                    .read_record::<RawInputs>(RAW_INPUTS_KEY)
                    .unwrap_or_else(|| RawInputs::from_config(&config));
                ConfigEditor::with_raw(config, raw)
            }
            None => ConfigEditor::default(),
        };

        StoredSession {
            editor,
            state: self.read_record::<SchedulerState>(STATE_KEY),
        }
    }

    /// Write all three records as one snapshot.
    ///
    /// # Errors
    /// Returns an error if serialization or the underlying store fails.
    pub fn persist(&self, editor: &ConfigEditor, scheduler: &BreakScheduler) -> Result<()> {
        let entries = [
            (CONFIG_KEY, serde_json::to_string(editor.config())?),
            (RAW_INPUTS_KEY, serde_json::to_string(editor.raw())?),
            (STATE_KEY, serde_json::to_string(&scheduler.state())?),
        ];
        self.store.kv_set_all(&entries)
    }

    fn read_record<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let json = match self.store.kv_get(key) {
            Ok(Some(json)) => json,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read stored record");
                return None;
            }
        };
        match serde_json::from_str(&json) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(key, error = %e, "stored record is corrupt, ignoring");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::ConfigField;
    use crate::timer::Phase;

    #[test]
    fn empty_store_loads_defaults() {
        let store = StateStore::new(MemoryStore::new());
        let session = store.load();
        assert_eq!(session.editor, ConfigEditor::default());
        assert!(session.state.is_none());
        assert_eq!(
            session.scheduler().snapshot(),
            BreakScheduler::default().snapshot()
        );
    }

    #[test]
    fn persist_then_load_resumes() {
        let store = StateStore::new(MemoryStore::new());
        let mut editor = ConfigEditor::default();
        editor.commit_text(ConfigField::WorkDuration, "10s");
        let mut scheduler = BreakScheduler::new(*editor.config());
        scheduler.start();
        for _ in 0..12 {
            scheduler.tick();
        }
        store.persist(&editor, &scheduler).unwrap();

        let session = store.load();
        assert_eq!(session.editor.config().work_duration, 10);
        assert_eq!(session.editor.raw().work_duration, "10s");
        let resumed = session.scheduler();
        assert_eq!(resumed.snapshot(), scheduler.snapshot());
        assert_eq!(resumed.phase(), Phase::ShortBreak);
    }

    #[test]
    fn corrupt_records_fall_back() {
        let mem = MemoryStore::new();
        mem.kv_set(CONFIG_KEY, "{not json").unwrap();
        mem.kv_set(STATE_KEY, r#"{"phase": 7}"#).unwrap();
        let session = StateStore::new(&mem).load();
        assert_eq!(*session.editor.config(), CycleConfig::default());
        assert!(session.state.is_none());
    }

    #[test]
    fn invalid_stored_config_is_replaced() {
        let mem = MemoryStore::new();
        mem.kv_set(CONFIG_KEY, r#"{"sessionsBeforeLongBreak": 0}"#)
            .unwrap();
        let session = StateStore::new(&mem).load();
        assert_eq!(session.editor.config().sessions_before_long_break, 4);
    }

    #[test]
    fn missing_mirror_is_rederived() {
        let mem = MemoryStore::new();
        mem.kv_set(CONFIG_KEY, r#"{"workDuration": 3723}"#).unwrap();
        let session = StateStore::new(&mem).load();
        assert_eq!(session.editor.raw().work_duration, "1h 2m 3s");
    }

    #[test]
    fn persist_overwrites_whole_records() {
        let mem = MemoryStore::new();
        let store = StateStore::new(&mem);
        let editor = ConfigEditor::default();
        let mut scheduler = BreakScheduler::default();
        store.persist(&editor, &scheduler).unwrap();
        scheduler.switch_mode();
        store.persist(&editor, &scheduler).unwrap();

        let json = mem.kv_get(STATE_KEY).unwrap().unwrap();
        let state: SchedulerState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, scheduler.state());
    }
}
