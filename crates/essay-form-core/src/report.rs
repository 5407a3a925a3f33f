//! DOM-free validation of essay values

use crate::config::FormConfig;
use crate::rules::{character_count, LengthOutcome};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldCheck {
    pub field: String,
    pub length: usize,
    pub outcome: LengthOutcome,
}

/// Per-field results, in configuration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub checks: Vec<FieldCheck>,
    pub message: String,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        !self.checks.iter().any(|check| check.outcome.is_violation())
    }

    pub fn invalid_fields(&self) -> Vec<&str> {
        self.checks
            .iter()
            .filter(|check| check.outcome.is_violation())
            .map(|check| check.field.as_str())
            .collect()
    }

    /// Message to show for an invalid report
    pub fn error_message(&self) -> Option<&str> {
        if self.is_valid() {
            None
        } else {
            Some(&self.message)
        }
    }
}

/// Check every configured field. Every essay is required: a field absent
/// from `values` is checked as empty text.
pub fn validate_values(config: &FormConfig, values: &HashMap<String, String>) -> ValidationReport {
    let constraint = config.constraint();
    let checks = config
        .field_ids
        .iter()
        .map(|field| {
            let length = values.get(field).map_or(0, |value| character_count(value));
            FieldCheck {
                field: field.clone(),
                length,
                outcome: constraint.check_length(length),
            }
        })
        .collect();

    ValidationReport {
        checks,
        message: config.message(),
    }
}
