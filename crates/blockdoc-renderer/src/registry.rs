//! Block renderer registry.
//!
//! A [`RendererRegistry`] answers two questions for a [`Document`]:
//! which [`BlockRenderer`] handles a block type, and which [`Validator`]
//! checks the document as a whole. [`Registry`] is the map-backed
//! implementation; it is built up front and read-only afterwards, so it can
//! be shared between threads behind an `Arc`.
//!
//! Adding a block type means registering another [`BlockRenderer`]:
//!
//! ```
//! use blockdoc_renderer::{
//!     BlockRenderer, DocumentValidator, Registry, RenderError, SafeHtml, TypedValidator,
//!     Validator,
//! };
//! use serde_json::Value;
//!
//! struct Divider(TypedValidator<serde_json::Map<String, Value>>);
//!
//! impl BlockRenderer for Divider {
//!     fn validator(&self) -> &dyn Validator {
//!         &self.0
//!     }
//!
//!     fn render(&self, _data: &Value) -> Result<SafeHtml, RenderError> {
//!         Ok(SafeHtml::from_trusted("<hr class=\"divider\">"))
//!     }
//! }
//!
//! let registry = Registry::new(DocumentValidator)
//!     .with_block("divider", Divider(TypedValidator::new()));
//! assert!(registry.contains("divider"));
//! ```
//!
//! [`Document`]: crate::Document

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::error::RenderError;
use crate::html::SafeHtml;
use crate::validator::Validator;

/// Renders and validates one block type.
pub trait BlockRenderer: Send + Sync {
    /// Validator for this block type's `data`.
    fn validator(&self) -> &dyn Validator;

    /// Render block `data` into a trusted fragment.
    ///
    /// # Errors
    ///
    /// Returns `RenderError` if the data cannot be rendered safely.
    fn render(&self, data: &Value) -> Result<SafeHtml, RenderError>;
}

/// Lookup of block renderers plus the root document validator.
pub trait RendererRegistry: Send + Sync {
    /// Renderer for `block_type`, or `None` for unsupported types.
    fn block_renderer(&self, block_type: &str) -> Option<&dyn BlockRenderer>;

    /// Validator for the whole document.
    fn document_validator(&self) -> &dyn Validator;
}

/// Map-backed [`RendererRegistry`].
pub struct Registry {
    renderers: HashMap<String, Box<dyn BlockRenderer>>,
    document_validator: Box<dyn Validator>,
}

impl Registry {
    /// Create an empty registry with the given root validator.
    #[must_use]
    pub fn new(document_validator: impl Validator + 'static) -> Self {
        Self {
            renderers: HashMap::new(),
            document_validator: Box::new(document_validator),
        }
    }

    /// Register a renderer, replacing any previous one for the same type.
    pub fn register(
        &mut self,
        block_type: impl Into<String>,
        renderer: impl BlockRenderer + 'static,
    ) {
        self.register_boxed(block_type, Box::new(renderer));
    }

    /// Register an already boxed renderer.
    pub fn register_boxed(
        &mut self,
        block_type: impl Into<String>,
        renderer: Box<dyn BlockRenderer>,
    ) {
        self.renderers.insert(block_type.into(), renderer);
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with_block(
        mut self,
        block_type: impl Into<String>,
        renderer: impl BlockRenderer + 'static,
    ) -> Self {
        self.register(block_type, renderer);
        self
    }

    /// Remove the renderer for `block_type`. Returns whether one was registered.
    pub fn unregister(&mut self, block_type: &str) -> bool {
        self.renderers.remove(block_type).is_some()
    }

    /// Check whether a block type is registered.
    #[must_use]
    pub fn contains(&self, block_type: &str) -> bool {
        self.renderers.contains_key(block_type)
    }

    /// Registered block types, sorted.
    #[must_use]
    pub fn block_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.renderers.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("block_types", &self.block_types())
            .finish_non_exhaustive()
    }
}

impl RendererRegistry for Registry {
    fn block_renderer(&self, block_type: &str) -> Option<&dyn BlockRenderer> {
        self.renderers.get(block_type).map(|r| r.as_ref())
    }

    fn document_validator(&self) -> &dyn Validator {
        self.document_validator.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DocumentValidator;
    use crate::validator::TypedValidator;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use static_assertions::assert_impl_all;

    assert_impl_all!(Registry: Send, Sync);

    struct Echo(TypedValidator<String>);

    impl BlockRenderer for Echo {
        fn validator(&self) -> &dyn Validator {
            &self.0
        }

        fn render(&self, data: &Value) -> Result<SafeHtml, RenderError> {
            Ok(SafeHtml::escape(data.as_str().unwrap_or_default()))
        }
    }

    fn echo() -> Echo {
        Echo(TypedValidator::new())
    }

    #[test]
    fn test_empty_registry() {
        let registry = Registry::new(DocumentValidator);
        assert!(registry.is_empty());
        assert!(registry.block_renderer("paragraph").is_none());
    }

    #[test]
    fn test_register_and_lookup() {
        let registry = Registry::new(DocumentValidator).with_block("echo", echo());

        let renderer = registry.block_renderer("echo").unwrap();
        assert_eq!(renderer.render(&json!("<b>")).unwrap().as_str(), "&lt;b&gt;");
        assert!(renderer.validator().validate(&json!("ok")).is_valid());
        assert!(!renderer.validator().validate(&json!(1)).is_valid());
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let registry = Registry::new(DocumentValidator).with_block("echo", echo());
        assert!(registry.block_renderer("Echo").is_none());
    }

    #[test]
    fn test_unregister() {
        let mut registry = Registry::new(DocumentValidator).with_block("echo", echo());
        assert!(registry.unregister("echo"));
        assert!(!registry.unregister("echo"));
        assert!(!registry.contains("echo"));
    }

    #[test]
    fn test_block_types_sorted() {
        let registry = Registry::new(DocumentValidator)
            .with_block("b", echo())
            .with_block("a", echo());
        assert_eq!(registry.block_types(), vec!["a", "b"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_document_validator() {
        let registry = Registry::new(DocumentValidator);
        let validator = registry.document_validator();
        assert!(validator.validate(&json!({"blocks": []})).is_valid());
        assert!(!validator.validate(&Value::Null).is_valid());
    }
}
