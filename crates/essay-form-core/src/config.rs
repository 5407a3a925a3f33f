//! Form configuration
//!
//! Every key is optional when deserialized; the defaults describe the
//! application form (`application-form` with `essay1`..`essay3`).

use crate::error::FormError;
use crate::rules::{LengthConstraint, MAX_ESSAY_LENGTH, MIN_ESSAY_LENGTH};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const DEFAULT_FORM_ID: &str = "application-form";
pub const DEFAULT_FIELD_IDS: [&str; 3] = ["essay1", "essay2", "essay3"];
pub const DEFAULT_COUNTER_SUFFIX: &str = "-counter";
pub const DEFAULT_DANGER_CLASS: &str = "text-danger";

/// What happens to earlier error annotations when a field fails again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnnotationPolicy {
    /// Every failed submission appends another message
    #[default]
    Accumulate,
    /// Messages this validator added are removed before re-checking
    Replace,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormConfig {
    pub form_id: String,
    pub field_ids: Vec<String>,
    pub counter_suffix: String,
    pub min_length: usize,
    pub max_length: usize,
    pub danger_class: String,
    pub error_class: String,
    pub error_tag: String,
    /// Overrides the message derived from the bounds
    pub error_message: Option<String>,
    pub annotations: AnnotationPolicy,
    pub log_level: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            form_id: DEFAULT_FORM_ID.to_string(),
            field_ids: DEFAULT_FIELD_IDS.iter().map(|id| id.to_string()).collect(),
            counter_suffix: DEFAULT_COUNTER_SUFFIX.to_string(),
            min_length: MIN_ESSAY_LENGTH,
            max_length: MAX_ESSAY_LENGTH,
            danger_class: DEFAULT_DANGER_CLASS.to_string(),
            error_class: DEFAULT_DANGER_CLASS.to_string(),
            error_tag: "span".to_string(),
            error_message: None,
            annotations: AnnotationPolicy::Accumulate,
            log_level: "warn".to_string(),
        }
    }
}

impl FormConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self, FormError> {
        let config: FormConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), FormError> {
        if self.min_length > self.max_length {
            return Err(FormError::InvalidConfig(format!(
                "minLength {} > maxLength {}",
                self.min_length, self.max_length
            )));
        }

        if self.field_ids.is_empty() {
            return Err(FormError::InvalidConfig(
                "fieldIds must name at least one field".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for id in &self.field_ids {
            if id.trim().is_empty() {
                return Err(FormError::InvalidConfig(
                    "fieldIds contains an empty identifier".to_string(),
                ));
            }
            if !seen.insert(id.as_str()) {
                return Err(FormError::InvalidConfig(format!(
                    "duplicate field id: {}",
                    id
                )));
            }
        }

        if self.error_tag.trim().is_empty() {
            return Err(FormError::InvalidConfig("errorTag is empty".to_string()));
        }

        Ok(())
    }

    pub fn constraint(&self) -> LengthConstraint {
        LengthConstraint::new(self.min_length, self.max_length)
    }

    pub fn counter_id(&self, field_id: &str) -> String {
        format!("{}{}", field_id, self.counter_suffix)
    }

    pub fn message(&self) -> String {
        self.error_message
            .clone()
            .unwrap_or_else(|| self.constraint().default_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_json_gives_defaults() {
        let config = FormConfig::from_json("{}").unwrap();
        assert_eq!(config, FormConfig::default());
    }

    #[test]
    fn test_partial_json_overrides() {
        let config =
            FormConfig::from_json(r#"{"maxLength": 500, "annotations": "replace"}"#).unwrap();
        assert_eq!(config.max_length, 500);
        assert_eq!(config.min_length, 100);
        assert_eq!(config.annotations, AnnotationPolicy::Replace);
        assert_eq!(config.message(), "Essay must be between 100 and 500 characters.");
    }

    #[test]
    fn test_counter_id() {
        let config = FormConfig::default();
        assert_eq!(config.counter_id("essay2"), "essay2-counter");
    }

    #[test]
    fn test_custom_message_wins() {
        let config = FormConfig {
            error_message: Some("Too short or too long".to_string()),
            ..FormConfig::default()
        };
        assert_eq!(config.message(), "Too short or too long");
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let err = FormConfig::from_json(r#"{"minLength": 200, "maxLength": 100}"#).unwrap_err();
        assert!(matches!(err, FormError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_empty_and_duplicate_fields() {
        let empty = FormConfig {
            field_ids: vec![],
            ..FormConfig::default()
        };
        assert!(empty.validate().is_err());

        let blank = FormConfig {
            field_ids: vec!["essay1".into(), " ".into()],
            ..FormConfig::default()
        };
        assert!(blank.validate().is_err());

        let dup = FormConfig {
            field_ids: vec!["essay1".into(), "essay1".into()],
            ..FormConfig::default()
        };
        assert!(dup.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        let err = FormConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, FormError::Config(_)));
    }
}
