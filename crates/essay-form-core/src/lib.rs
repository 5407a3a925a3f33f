//! Essay length validation for the application form
//!
//! This crate holds the browser-independent part of the essay form:
//! - `rules`: length bounds, character counting, counter text
//! - `config`: form configuration with defaults for the application form
//! - `validator`: `FormValidator`, driven by input and submit events
//! - `dom` / `memory`: the DOM abstraction and an in-memory implementation
//! - `report`: validation of plain values without a DOM

pub mod config;
pub mod dom;
pub mod error;
pub mod memory;
pub mod report;
pub mod rules;
pub mod validator;

pub use config::{AnnotationPolicy, FormConfig};
pub use dom::FormDom;
pub use error::FormError;
pub use memory::{MemoryDom, NodeId};
pub use report::{validate_values, FieldCheck, ValidationReport};
pub use rules::{
    character_count, CounterState, LengthConstraint, LengthOutcome, MAX_ESSAY_LENGTH,
    MIN_ESSAY_LENGTH,
};
pub use validator::{FormValidator, InitSummary, SubmitOutcome};
