//! Essay length rules
//!
//! Lengths are counted in UTF-16 code units, the same unit a browser
//! reports for `textarea.value.length`.

use serde::{Deserialize, Serialize};

/// Minimum essay length, inclusive
pub const MIN_ESSAY_LENGTH: usize = 100;

/// Maximum essay length, inclusive
pub const MAX_ESSAY_LENGTH: usize = 10_000;

/// Count characters the way the browser does for a text control's value
pub fn character_count(value: &str) -> usize {
    value.encode_utf16().count()
}

/// Inclusive length bounds applied to every essay field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthConstraint {
    pub min: usize,
    pub max: usize,
}

impl Default for LengthConstraint {
    fn default() -> Self {
        Self {
            min: MIN_ESSAY_LENGTH,
            max: MAX_ESSAY_LENGTH,
        }
    }
}

/// Result of checking one value against a constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum LengthOutcome {
    Valid,
    TooShort { min: usize },
    TooLong { max: usize },
    /// The field could not be found, so there was nothing to check
    Missing,
}

impl LengthOutcome {
    pub fn is_violation(&self) -> bool {
        matches!(self, Self::TooShort { .. } | Self::TooLong { .. })
    }
}

/// Live counter state for one field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterState {
    pub length: usize,
    /// `max - length`, negative once the field is over the limit
    pub remaining: i64,
    pub over_limit: bool,
}

impl LengthConstraint {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn check_length(&self, length: usize) -> LengthOutcome {
        if length < self.min {
            LengthOutcome::TooShort { min: self.min }
        } else if length > self.max {
            LengthOutcome::TooLong { max: self.max }
        } else {
            LengthOutcome::Valid
        }
    }

    pub fn check(&self, value: &str) -> LengthOutcome {
        self.check_length(character_count(value))
    }

    pub fn counter_state(&self, length: usize) -> CounterState {
        let remaining = self.max as i64 - length as i64;
        CounterState {
            length,
            remaining,
            over_limit: remaining < 0,
        }
    }

    /// Counter display text, e.g. "42/10000 characters"
    pub fn counter_text(&self, length: usize) -> String {
        format!("{}/{} characters", length, self.max)
    }

    /// Inline message shown next to a field that fails the check
    pub fn default_message(&self) -> String {
        format!(
            "Essay must be between {} and {} characters.",
            self.min, self.max
        )
    }
}
