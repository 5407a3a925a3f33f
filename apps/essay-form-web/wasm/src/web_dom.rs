//! `FormDom` over the browser document

use essay_form_core::{FormDom, FormError};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement, HtmlTextAreaElement};

#[derive(Clone)]
pub struct WebDom {
    document: Document,
}

impl WebDom {
    /// Use the document of the current window
    pub fn from_window() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or("No window")?;
        let document = window.document().ok_or("No document")?;
        Ok(Self { document })
    }
}

pub(crate) fn js_error(value: JsValue) -> FormError {
    FormError::Dom(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

impl FormDom for WebDom {
    type Element = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn value(&self, element: &Element) -> String {
        if let Some(textarea) = element.dyn_ref::<HtmlTextAreaElement>() {
            textarea.value()
        } else if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else {
            element.text_content().unwrap_or_default()
        }
    }

    fn set_text(&self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }

    fn toggle_class(&self, element: &Element, class: &str, present: bool) -> Result<(), FormError> {
        element
            .class_list()
            .toggle_with_force(class, present)
            .map(|_| ())
            .map_err(js_error)
    }

    fn append_annotation(
        &self,
        field: &Element,
        tag: &str,
        class: &str,
        text: &str,
    ) -> Result<Element, FormError> {
        let parent = field
            .parent_node()
            .ok_or_else(|| FormError::Dom("field has no parent node".to_string()))?;

        let node = self.document.create_element(tag).map_err(js_error)?;
        node.set_class_name(class);
        node.set_text_content(Some(text));
        parent.append_child(&node).map_err(js_error)?;

        Ok(node)
    }

    fn remove(&self, element: &Element) {
        element.remove();
    }
}
