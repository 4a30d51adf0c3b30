//! Configuration editing.
//!
//! The host edits durations as free text and counts as integers. Edits are
//! committed through [`ConfigEditor`], which keeps the validated
//! [`CycleConfig`] and a per-field text mirror of the durations. A rejected
//! edit never reaches the configuration; the mirror snaps back to the last
//! valid value instead.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::duration::{format_duration_text, parse_duration_expr};
use crate::error::ValidationError;
use crate::timer::CycleConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigField {
    WorkDuration,
    ShortBreakDuration,
    LongBreakDuration,
    SessionsBeforeLongBreak,
    TotalCycles,
}

impl ConfigField {
    pub const ALL: [ConfigField; 5] = [
        ConfigField::WorkDuration,
        ConfigField::ShortBreakDuration,
        ConfigField::LongBreakDuration,
        ConfigField::SessionsBeforeLongBreak,
        ConfigField::TotalCycles,
    ];

    /// Field name in the stored configuration record.
    pub fn record_name(self) -> &'static str {
        match self {
            ConfigField::WorkDuration => "workDuration",
            ConfigField::ShortBreakDuration => "shortBreakDuration",
            ConfigField::LongBreakDuration => "longBreakDuration",
            ConfigField::SessionsBeforeLongBreak => "sessionsBeforeLongBreak",
            ConfigField::TotalCycles => "totalCycles",
        }
    }

    /// Durations are edited as text expressions; counts as plain integers.
    pub fn is_duration(self) -> bool {
        matches!(
            self,
            ConfigField::WorkDuration
                | ConfigField::ShortBreakDuration
                | ConfigField::LongBreakDuration
        )
    }
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConfigField::WorkDuration => "work",
            ConfigField::ShortBreakDuration => "short-break",
            ConfigField::LongBreakDuration => "long-break",
            ConfigField::SessionsBeforeLongBreak => "sessions",
            ConfigField::TotalCycles => "total-cycles",
        };
        f.write_str(name)
    }
}

impl FromStr for ConfigField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigField::ALL
            .into_iter()
            .find(|field| field.to_string() == s || field.record_name() == s)
            .ok_or_else(|| ValidationError::UnknownField(s.to_string()))
    }
}

/// Text mirror of the duration fields, kept for editing only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInputs {
    pub work_duration: String,
    pub short_break_duration: String,
    pub long_break_duration: String,
}

impl RawInputs {
    pub fn from_config(config: &CycleConfig) -> Self {
        Self {
            work_duration: format_duration_text(config.work_duration),
            short_break_duration: format_duration_text(config.short_break_duration),
            long_break_duration: format_duration_text(config.long_break_duration),
        }
    }

    pub fn get(&self, field: ConfigField) -> Option<&str> {
        match field {
            ConfigField::WorkDuration => Some(&self.work_duration),
            ConfigField::ShortBreakDuration => Some(&self.short_break_duration),
            ConfigField::LongBreakDuration => Some(&self.long_break_duration),
            _ => None,
        }
    }

    fn slot_mut(&mut self, field: ConfigField) -> Option<&mut String> {
        match field {
            ConfigField::WorkDuration => Some(&mut self.work_duration),
            ConfigField::ShortBreakDuration => Some(&mut self.short_break_duration),
            ConfigField::LongBreakDuration => Some(&mut self.long_break_duration),
            _ => None,
        }
    }
}

/// Result of committing a text edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The edit was valid and the configuration now holds `value`.
    Applied { field: ConfigField, value: u64 },
    /// The edit was rejected; the field shows its last valid value again.
    Reverted {
        field: ConfigField,
        shown: String,
        reason: String,
    },
}

impl CommitOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, CommitOutcome::Applied { .. })
    }
}

/// Validated configuration plus its editable text mirror.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEditor {
    config: CycleConfig,
    raw: RawInputs,
}

impl ConfigEditor {
    pub fn new(config: CycleConfig) -> Self {
        Self {
            raw: RawInputs::from_config(&config),
            config,
        }
    }

    /// Resume with a previously stored text mirror.
    pub fn with_raw(config: CycleConfig, raw: RawInputs) -> Self {
        Self { config, raw }
    }

    pub fn config(&self) -> &CycleConfig {
        &self.config
    }

    pub fn raw(&self) -> &RawInputs {
        &self.raw
    }

    pub fn value(&self, field: ConfigField) -> u64 {
        match field {
            ConfigField::WorkDuration => self.config.work_duration,
            ConfigField::ShortBreakDuration => self.config.short_break_duration,
            ConfigField::LongBreakDuration => self.config.long_break_duration,
            ConfigField::SessionsBeforeLongBreak => {
                u64::from(self.config.sessions_before_long_break)
            }
            ConfigField::TotalCycles => u64::from(self.config.total_cycles),
        }
    }

    /// Canonical display text for a field.
    pub fn display(&self, field: ConfigField) -> String {
        let value = self.value(field);
        if field.is_duration() {
            format_duration_text(value)
        } else {
            value.to_string()
        }
    }

    /// Store uncommitted edit text. Returns `false` for fields without a
    /// text mirror.
    pub fn set_raw(&mut self, field: ConfigField, text: &str) -> bool {
        match self.raw.slot_mut(field) {
            Some(slot) => {
                *slot = text.to_string();
                true
            }
            None => false,
        }
    }

    /// Commit whatever text is currently in the mirror for `field`.
    pub fn commit_raw(&mut self, field: ConfigField) -> CommitOutcome {
        let text = self
            .raw
            .get(field)
            .map(str::to_string)
            .unwrap_or_else(|| self.display(field));
        self.commit_text(field, &text)
    }

    /// Parse `text` and apply it if it yields a valid value.
    ///
    /// Duration fields accept full duration expressions, relative to the
    /// current value. Count fields accept a plain integer. Empty text keeps
    /// the current value.
    pub fn commit_text(&mut self, field: ConfigField, text: &str) -> CommitOutcome {
        let previous = i64::try_from(self.value(field)).unwrap_or(i64::MAX);
        let parsed = if field.is_duration() {
            parse_duration_expr(text, previous).map_err(|e| e.to_string())
        } else {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                Ok(previous)
            } else {
                trimmed.parse::<i64>().map_err(|e| e.to_string())
            }
        };

        match parsed.and_then(|value| self.commit_value(field, value).map_err(|e| e.to_string())) {
            Ok(value) => CommitOutcome::Applied { field, value },
            Err(reason) => {
                tracing::warn!(%field, input = text, %reason, "rejected configuration edit");
                let shown = self.revert(field);
                CommitOutcome::Reverted {
                    field,
                    shown,
                    reason,
                }
            }
        }
    }

    /// Apply an integer value to a field.
    ///
    /// # Errors
    ///
    /// Returns an error for negative values, counts that do not fit, or a
    /// configuration that fails validation. The configuration is unchanged
    /// on error.
    pub fn commit_value(&mut self, field: ConfigField, value: i64) -> Result<u64, ValidationError> {
        let invalid = |message: &str| ValidationError::InvalidValue {
            field: field.record_name().to_string(),
            message: message.to_string(),
        };

        let value = u64::try_from(value).map_err(|_| invalid("must not be negative"))?;

        let mut next = self.config;
        match field {
            ConfigField::WorkDuration => next.work_duration = value,
            ConfigField::ShortBreakDuration => next.short_break_duration = value,
            ConfigField::LongBreakDuration => next.long_break_duration = value,
            ConfigField::SessionsBeforeLongBreak => {
                next.sessions_before_long_break =
                    u32::try_from(value).map_err(|_| invalid("is too large"))?;
            }
            ConfigField::TotalCycles => {
                next.total_cycles = u32::try_from(value).map_err(|_| invalid("is too large"))?;
            }
        }
        next.validate()?;

        self.config = next;
        self.revert(field);
        tracing::debug!(%field, value, "configuration updated");
        Ok(value)
    }

    /// Re-display the canonical value of `field`, discarding edit text.
    pub fn revert(&mut self, field: ConfigField) -> String {
        let shown = self.display(field);
        if let Some(slot) = self.raw.slot_mut(field) {
            slot.clone_from(&shown);
        }
        shown
    }
}

impl Default for ConfigEditor {
    fn default() -> Self {
        Self::new(CycleConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_parse_both_ways() {
        assert_eq!("work".parse::<ConfigField>(), Ok(ConfigField::WorkDuration));
        assert_eq!(
            "shortBreakDuration".parse::<ConfigField>(),
            Ok(ConfigField::ShortBreakDuration)
        );
        assert_eq!(
            "sessions".parse::<ConfigField>(),
            Ok(ConfigField::SessionsBeforeLongBreak)
        );
        assert!("theme".parse::<ConfigField>().is_err());
    }

    #[test]
    fn default_mirror_is_formatted_config() {
        let editor = ConfigEditor::default();
        assert_eq!(editor.raw().work_duration, "24m");
        assert_eq!(editor.raw().short_break_duration, "5m");
        assert_eq!(editor.raw().long_break_duration, "15m");
    }

    #[test]
    fn text_commit_applies_and_reformats() {
        let mut editor = ConfigEditor::default();
        let outcome = editor.commit_text(ConfigField::WorkDuration, "1m30s");
        assert_eq!(
            outcome,
            CommitOutcome::Applied {
                field: ConfigField::WorkDuration,
                value: 90
            }
        );
        assert_eq!(editor.config().work_duration, 90);
        assert_eq!(editor.raw().work_duration, "1m 30s");
    }

    #[test]
    fn relative_commit_uses_current_value() {
        let mut editor = ConfigEditor::default();
        editor.commit_text(ConfigField::ShortBreakDuration, "+5m");
        assert_eq!(editor.config().short_break_duration, 600);
        editor.commit_text(ConfigField::ShortBreakDuration, "-30s");
        assert_eq!(editor.config().short_break_duration, 570);
    }

    #[test]
    fn negative_result_reverts() {
        let mut editor = ConfigEditor::default();
        editor.set_raw(ConfigField::ShortBreakDuration, "-1h");
        let outcome = editor.commit_raw(ConfigField::ShortBreakDuration);
        assert!(!outcome.is_applied());
        assert_eq!(editor.config().short_break_duration, 300);
        assert_eq!(editor.raw().short_break_duration, "5m");
    }

    #[test]
    fn malformed_text_reverts_to_last_valid() {
        let mut editor = ConfigEditor::default();
        editor.set_raw(ConfigField::LongBreakDuration, "ten minutes");
        match editor.commit_raw(ConfigField::LongBreakDuration) {
            CommitOutcome::Reverted { shown, .. } => assert_eq!(shown, "15m"),
            other => panic!("expected revert, got {other:?}"),
        }
        assert_eq!(editor.raw().long_break_duration, "15m");
        assert_eq!(editor.config().long_break_duration, 900);
    }

    #[test]
    fn blur_discards_uncommitted_text() {
        let mut editor = ConfigEditor::default();
        editor.set_raw(ConfigField::WorkDuration, "2h");
        assert_eq!(editor.revert(ConfigField::WorkDuration), "24m");
        assert_eq!(editor.raw().work_duration, "24m");
    }

    #[test]
    fn count_fields_take_integers() {
        let mut editor = ConfigEditor::default();
        assert!(editor.commit_text(ConfigField::TotalCycles, "3").is_applied());
        assert_eq!(editor.config().total_cycles, 3);
        assert!(!editor.commit_text(ConfigField::TotalCycles, "3m").is_applied());
        assert_eq!(editor.config().total_cycles, 3);
        assert!(!editor.set_raw(ConfigField::TotalCycles, "9"));
    }

    #[test]
    fn sessions_before_long_break_must_be_positive() {
        let mut editor = ConfigEditor::default();
        let err = editor
            .commit_value(ConfigField::SessionsBeforeLongBreak, 0)
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { .. }));
        assert_eq!(editor.config().sessions_before_long_break, 4);
        assert_eq!(
            editor.commit_value(ConfigField::SessionsBeforeLongBreak, 2),
            Ok(2)
        );
    }

    #[test]
    fn negative_integer_commit_rejected() {
        let mut editor = ConfigEditor::default();
        assert!(editor.commit_value(ConfigField::WorkDuration, -1).is_err());
        assert_eq!(editor.config().work_duration, 1440);
    }

    #[test]
    fn empty_text_is_a_no_op_commit() {
        let mut editor = ConfigEditor::default();
        assert_eq!(
            editor.commit_text(ConfigField::WorkDuration, "  "),
            CommitOutcome::Applied {
                field: ConfigField::WorkDuration,
                value: 1440
            }
        );
    }
}
