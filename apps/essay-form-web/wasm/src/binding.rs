//! Event listener wiring
//!
//! Registered listeners are owned by the page: each closure is handed to
//! JavaScript as a `Function`, so it stays alive while the element holds
//! it, independent of the `EssayFormBinding` handle. The binding keeps a
//! reference to each `Function` only so `detach()` can remove it.

use crate::web_dom::{js_error, WebDom};
use essay_form_core::{FormDom, FormError, FormValidator, InitSummary};
use js_sys::Function;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget};

struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Function,
}

impl Listener {
    fn register(
        target: EventTarget,
        event: &'static str,
        closure: Closure<dyn FnMut(Event)>,
    ) -> Result<Self, FormError> {
        let callback: Function = closure.into_js_value().unchecked_into();
        target
            .add_event_listener_with_callback(event, &callback)
            .map_err(js_error)?;
        Ok(Self {
            target,
            event,
            callback,
        })
    }

    fn unregister(&self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, &self.callback);
    }
}

/// Validator attached to a form
#[wasm_bindgen]
pub struct EssayFormBinding {
    summary: InitSummary,
    listeners: Vec<Listener>,
    detached: bool,
}

impl EssayFormBinding {
    /// Populate the counters, then listen for input on every bound field
    /// and for submit on the form when it exists.
    pub fn attach(validator: FormValidator<WebDom>) -> Result<Self, FormError> {
        let validator = Rc::new(validator);
        let summary = validator.initialize();
        let bound_fields = summary.bound_fields.clone();
        let mut binding = Self {
            listeners: Vec::with_capacity(bound_fields.len() + 1),
            summary,
            detached: false,
        };

        for field_id in &bound_fields {
            let Some(field) = validator.dom().element_by_id(field_id) else {
                continue;
            };

            let handler = Rc::clone(&validator);
            let id = field_id.clone();
            let closure = Closure::wrap(Box::new(move |_event: Event| {
                handler.on_input(&id);
            }) as Box<dyn FnMut(Event)>);

            let listener = Listener::register(field.into(), "input", closure);
            binding.push(listener)?;
        }

        if let Some(form) = validator.dom().element_by_id(&validator.config().form_id) {
            let handler = Rc::clone(&validator);
            let closure = Closure::wrap(Box::new(move |event: Event| {
                if !handler.on_submit().allowed {
                    event.prevent_default();
                }
            }) as Box<dyn FnMut(Event)>);

            let listener = Listener::register(form.into(), "submit", closure);
            binding.push(listener)?;
        }

        Ok(binding)
    }

    /// Keep a registered listener; on failure undo everything registered so far
    fn push(&mut self, listener: Result<Listener, FormError>) -> Result<(), FormError> {
        match listener {
            Ok(listener) => {
                self.listeners.push(listener);
                Ok(())
            }
            Err(e) => {
                self.detach();
                Err(e)
            }
        }
    }
}

#[wasm_bindgen]
impl EssayFormBinding {
    /// Field ids that have both an input and a counter
    #[wasm_bindgen(getter, js_name = boundFields)]
    pub fn bound_fields(&self) -> Vec<String> {
        self.summary.bound_fields.clone()
    }

    #[wasm_bindgen(getter, js_name = formFound)]
    pub fn form_found(&self) -> bool {
        self.summary.form_found
    }

    /// False once `detach()` has been called
    #[wasm_bindgen(getter, js_name = isAttached)]
    pub fn is_attached(&self) -> bool {
        !self.detached
    }

    /// Remove every listener this binding registered
    #[wasm_bindgen]
    pub fn detach(&mut self) {
        let count = self.listeners.len();
        for listener in self.listeners.drain(..) {
            listener.unregister();
        }
        self.detached = true;
        tracing::debug!(count, "essay form listeners removed");
    }
}
