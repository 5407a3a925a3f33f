//! Form validator
//!
//! Keeps the counters in sync with the essay fields and decides whether a
//! submission may proceed. The host wires events to these methods:
//!
//! - once the document is ready: [`FormValidator::initialize`]
//! - on every `input` event of a bound field: [`FormValidator::on_input`]
//! - on the form's `submit` event: [`FormValidator::on_submit`], cancelling
//!   the default action when the outcome is not allowed

use crate::config::{AnnotationPolicy, FormConfig};
use crate::dom::FormDom;
use crate::error::FormError;
use crate::report::{FieldCheck, ValidationReport};
use crate::rules::{character_count, CounterState, LengthConstraint, LengthOutcome};
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;

/// Which fields were bound by [`FormValidator::initialize`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitSummary {
    pub bound_fields: Vec<String>,
    pub skipped_fields: Vec<String>,
    pub form_found: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOutcome {
    /// False when the default submit action must be cancelled
    pub allowed: bool,
    pub report: ValidationReport,
}

pub struct FormValidator<D: FormDom> {
    dom: D,
    config: FormConfig,
    constraint: LengthConstraint,
    message: String,
    /// Annotations added per field, tracked only for `AnnotationPolicy::Replace`
    annotations: RefCell<HashMap<String, Vec<D::Element>>>,
}

impl<D: FormDom> FormValidator<D> {
    pub fn new(dom: D, config: FormConfig) -> Result<Self, FormError> {
        config.validate()?;
        Ok(Self {
            dom,
            constraint: config.constraint(),
            message: config.message(),
            config,
            annotations: RefCell::new(HashMap::new()),
        })
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Find the fields that have both an input and a counter, and populate
    /// their counters. Fields missing either element are skipped.
    pub fn initialize(&self) -> InitSummary {
        let mut summary = InitSummary {
            form_found: self.dom.element_by_id(&self.config.form_id).is_some(),
            ..InitSummary::default()
        };

        for field_id in &self.config.field_ids {
            if self.on_input(field_id).is_some() {
                summary.bound_fields.push(field_id.clone());
            } else {
                summary.skipped_fields.push(field_id.clone());
            }
        }

        tracing::debug!(
            bound = summary.bound_fields.len(),
            skipped = summary.skipped_fields.len(),
            form_found = summary.form_found,
            "essay form initialized"
        );

        summary
    }

    /// Refresh the counter for `field_id`. Returns `None` when the field or
    /// its counter is not in the document.
    pub fn on_input(&self, field_id: &str) -> Option<CounterState> {
        let field = self.dom.element_by_id(field_id)?;
        let counter = self.dom.element_by_id(&self.config.counter_id(field_id))?;

        let length = character_count(&self.dom.value(&field));
        let state = self.constraint.counter_state(length);

        self.dom
            .set_text(&counter, &self.constraint.counter_text(length));
        if let Err(e) = self
            .dom
            .toggle_class(&counter, &self.config.danger_class, state.over_limit)
        {
            tracing::warn!("Failed to update counter class for {}: {}", field_id, e);
        }

        Some(state)
    }

    /// Check every field and annotate the ones out of bounds
    pub fn on_submit(&self) -> SubmitOutcome {
        let mut checks = Vec::with_capacity(self.config.field_ids.len());

        for field_id in &self.config.field_ids {
            let Some(field) = self.dom.element_by_id(field_id) else {
                checks.push(FieldCheck {
                    field: field_id.clone(),
                    length: 0,
                    outcome: LengthOutcome::Missing,
                });
                continue;
            };

            if self.config.annotations == AnnotationPolicy::Replace {
                self.clear_annotations(field_id);
            }

            let length = character_count(&self.dom.value(&field));
            let outcome = self.constraint.check_length(length);
            if outcome.is_violation() {
                self.annotate(field_id, &field);
            }

            checks.push(FieldCheck {
                field: field_id.clone(),
                length,
                outcome,
            });
        }

        let report = ValidationReport {
            checks,
            message: self.message.clone(),
        };
        let allowed = report.is_valid();

        tracing::debug!(
            allowed,
            invalid = ?report.invalid_fields(),
            "essay form submitted"
        );

        SubmitOutcome { allowed, report }
    }

    fn annotate(&self, field_id: &str, field: &D::Element) {
        match self.dom.append_annotation(
            field,
            &self.config.error_tag,
            &self.config.error_class,
            &self.message,
        ) {
            Ok(node) => {
                if self.config.annotations == AnnotationPolicy::Replace {
                    self.annotations
                        .borrow_mut()
                        .entry(field_id.to_string())
                        .or_default()
                        .push(node);
                }
            }
            Err(e) => tracing::warn!("Failed to annotate {}: {}", field_id, e),
        }
    }

    fn clear_annotations(&self, field_id: &str) {
        let previous = self.annotations.borrow_mut().remove(field_id);
        for node in previous.into_iter().flatten() {
            self.dom.remove(&node);
        }
    }
}
