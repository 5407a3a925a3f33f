//! WASM bindings for the essay application form
//!
//! Live character counters and submit-time length checks for the essay
//! fields. The rules live in `essay-form-core`; this crate only connects
//! them to the page.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { attachEssayForm } from './pkg/essay_form_wasm.js';
//!
//! await init();
//!
//! document.addEventListener('DOMContentLoaded', () => {
//!     // Defaults: form "application-form", fields essay1..essay3.
//!     // Listeners stay registered even if the returned handle is dropped;
//!     // keep it only to call `detach()` later.
//!     const binding = attachEssayForm();
//!     console.log(binding.boundFields);
//!
//!     // Optional overrides
//!     // attachEssayForm({ annotations: "replace", logLevel: "debug" });
//! });
//! ```

pub mod binding;
pub mod logging;
pub mod web_dom;

use essay_form_core::{validate_values, FormConfig, FormValidator, LengthConstraint};
use std::collections::HashMap;
use wasm_bindgen::prelude::*;

pub use binding::EssayFormBinding;
pub use web_dom::WebDom;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&"Essay form WASM initialized".into());
}

/// Get the library version
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Read an optional JS config object; `undefined` or `null` gives defaults
fn parse_config(config: JsValue) -> Result<FormConfig, JsValue> {
    let config: FormConfig = if config.is_undefined() || config.is_null() {
        FormConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?
    };
    config
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(config)
}

/// Bind counters and submit validation to the current document.
/// Call once the page's DOM is ready.
#[wasm_bindgen(js_name = attachEssayForm)]
pub fn attach_essay_form(config: JsValue) -> Result<EssayFormBinding, JsValue> {
    let config = parse_config(config)?;
    logging::init(&config.log_level);

    let dom = WebDom::from_window()?;
    let validator =
        FormValidator::new(dom, config).map_err(|e| JsValue::from_str(&e.to_string()))?;
    EssayFormBinding::attach(validator).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Check essay values without touching the page.
/// `values` maps field id to text; returns the per-field report.
#[wasm_bindgen(js_name = validateEssays)]
pub fn validate_essays(values: JsValue, config: JsValue) -> Result<JsValue, JsValue> {
    let config = parse_config(config)?;
    let values: HashMap<String, String> = serde_wasm_bindgen::from_value(values)
        .map_err(|e| JsValue::from_str(&format!("Invalid values: {}", e)))?;

    let report = validate_values(&config, &values);
    serde_wasm_bindgen::to_value(&report)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Counter text for a length under the default bounds
#[wasm_bindgen(js_name = counterText)]
pub fn counter_text(length: usize) -> String {
    LengthConstraint::default().counter_text(length)
}
