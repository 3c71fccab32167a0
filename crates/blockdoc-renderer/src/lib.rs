//! Validate and render Editor.js block documents to safe HTML.
//!
//! A [`Document`] takes raw JSON (text or a decoded [`serde_json::Value`]),
//! validates its structure and every block it knows, and renders known
//! blocks to HTML. Rendering runs in three stages:
//!
//! 1. The registry's root [`Validator`] checks the document shape.
//! 2. Each block is dispatched by its `type` to a [`BlockRenderer`], which
//!    returns a [`SafeHtml`] fragment. Unknown types are skipped.
//! 3. The concatenated output passes through the [`LinkSanitizer`], which
//!    drops anchor `href` values with dangerous or disallowed schemes.
//!
//! # Architecture
//!
//! - [`RendererRegistry`]: block type lookup plus the root validator.
//!   [`Registry`] is the map-backed implementation and [`DefaultRenderer`]
//!   registers the standard blocks.
//! - [`Validator`]: pluggable schema checks returning a [`Validation`] report.
//! - [`SafeHtml`]: marker for markup that is already escaped or sanitized.
//!
//! Behavior is configured through [`blockdoc_config::Config`]: allowed link
//! schemes, disabled block types and per-block options.
//!
//! # Example
//!
//! ```
//! use blockdoc_renderer::Document;
//! use serde_json::json;
//!
//! let mut document = Document::new(json!({
//!     "blocks": [
//!         {"type": "header", "data": {"text": "Hello", "level": 2}},
//!         {"type": "paragraph", "data": {"text": "<b>Bold</b> text"}},
//!         {"type": "unsupported", "data": {}}
//!     ]
//! }));
//!
//! assert!(document.validate());
//! assert_eq!(document.render(), "<h2>Hello</h2><p><b>Bold</b> text</p>");
//! ```

pub mod blocks;
mod document;
mod entities;
mod error;
mod html;
mod registry;
mod sanitize;
mod schema;
mod validator;

pub use blocks::{DefaultRenderer, default_renderer};
pub use document::{Block, Document, RawContent};
pub use error::RenderError;
pub use html::{SafeHtml, escape_html};
pub use registry::{BlockRenderer, Registry, RendererRegistry};
pub use sanitize::{LinkPolicy, LinkRejection, LinkSanitizer, sanitize_links};
pub use schema::DocumentValidator;
pub use validator::{SchemaError, TypedValidator, Validation, Validator, validate_with};
