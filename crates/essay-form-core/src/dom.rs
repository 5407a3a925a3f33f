//! DOM abstraction the validator runs against
//!
//! Methods take `&self`: a browser document is mutated through shared
//! handles, and the in-memory implementation follows the same shape so
//! the validator can be shared between event listeners.

use crate::error::FormError;

pub trait FormDom {
    /// Handle to a node; cheap to clone
    type Element: Clone;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Current value of a text control
    fn value(&self, element: &Self::Element) -> String;

    fn set_text(&self, element: &Self::Element, text: &str);

    /// Add `class` when `present` is true, remove it otherwise
    fn toggle_class(
        &self,
        element: &Self::Element,
        class: &str,
        present: bool,
    ) -> Result<(), FormError>;

    /// Create a `<tag class=..>text</tag>` node and append it as the last
    /// child of `field`'s parent. Returns the new node.
    fn append_annotation(
        &self,
        field: &Self::Element,
        tag: &str,
        class: &str,
        text: &str,
    ) -> Result<Self::Element, FormError>;

    /// Detach a node from its parent; no-op if already detached
    fn remove(&self, element: &Self::Element);
}
