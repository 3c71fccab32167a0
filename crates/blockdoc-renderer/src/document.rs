//! Block document ingestion, validation and rendering.

use std::sync::Arc;

use blockdoc_config::Config;
use serde_json::Value;

use crate::blocks::{DefaultRenderer, default_renderer};
use crate::html::SafeHtml;
use crate::registry::RendererRegistry;
use crate::sanitize::{LinkPolicy, LinkSanitizer};
use crate::validator::SchemaError;

/// Stand-in for absent content.
static NULL: Value = Value::Null;

/// Raw document input: JSON text or an already decoded value.
#[derive(Clone, Debug, PartialEq)]
pub enum RawContent {
    /// JSON text, decoded on ingestion.
    Text(String),
    /// Decoded JSON.
    Value(Value),
}

impl From<&str> for RawContent {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for RawContent {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Value> for RawContent {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl RawContent {
    /// Decode into a JSON value. Malformed JSON yields `None`.
    fn decode(self) -> Option<Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Text(text) => match serde_json::from_str(&text) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::debug!(error = %e, "Document content is not valid JSON");
                    None
                }
            },
        }
    }
}

/// A block in a document: its type tag and its opaque data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Block<'a> {
    pub block_type: &'a str,
    pub data: &'a Value,
}

/// A block document bound to a renderer registry.
///
/// One instance per request. [`validate`](Self::validate) accumulates
/// messages in [`errors`](Self::errors); [`render`](Self::render) never
/// touches them.
///
/// ```
/// use blockdoc_renderer::Document;
///
/// let mut document = Document::new(
///     r#"{"blocks": [{"type": "paragraph", "data": {"text": "<a href=\"javascript:x\">hi</a>"}}]}"#,
/// );
/// assert!(document.validate());
///
/// let html = document.render();
/// assert!(html.starts_with("<p>"));
/// assert!(!html.contains("javascript"));
/// ```
pub struct Document {
    content: Option<Value>,
    renderer: Arc<dyn RendererRegistry>,
    sanitizer: LinkSanitizer,
    errors: Vec<String>,
}

impl Document {
    /// Create a document using the standard block registry.
    pub fn new(raw: impl Into<RawContent>) -> Self {
        Self::with_renderer(raw, default_renderer())
    }

    /// Create a document using a specific registry.
    pub fn with_renderer(raw: impl Into<RawContent>, renderer: Arc<dyn RendererRegistry>) -> Self {
        Self {
            content: raw.into().decode(),
            renderer,
            sanitizer: LinkSanitizer::default(),
            errors: Vec::new(),
        }
    }

    /// Create a document with the standard blocks and link policy from `config`.
    pub fn with_config(raw: impl Into<RawContent>, config: &Config) -> Self {
        Self::with_renderer(raw, Arc::new(DefaultRenderer::from_config(config)))
            .with_sanitizer(LinkSanitizer::new(LinkPolicy::from_config(&config.links)))
    }

    /// Replace the link sanitizer applied to rendered output.
    #[must_use]
    pub fn with_sanitizer(mut self, sanitizer: LinkSanitizer) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    /// Decoded content, or `None` if the input was not valid JSON.
    #[must_use]
    pub fn content(&self) -> Option<&Value> {
        self.content.as_ref()
    }

    /// Messages collected by [`validate`](Self::validate).
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Blocks in document order.
    ///
    /// Entries without a string `type` are skipped; missing `data` reads as
    /// `null`.
    pub fn blocks(&self) -> impl Iterator<Item = Block<'_>> {
        self.content
            .as_ref()
            .and_then(|content| content.get("blocks"))
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|block| {
                Some(Block {
                    block_type: block.get("type")?.as_str()?,
                    data: block.get("data").unwrap_or(&NULL),
                })
            })
    }

    /// Validate the document structure and every known block.
    ///
    /// A structural failure records a single message and skips block checks.
    /// Unknown block types are not errors. Messages are appended, so repeated
    /// calls accumulate.
    pub fn validate(&mut self) -> bool {
        if let Err(e) = self.check_root() {
            self.errors.push(e.message().to_owned());
            return false;
        }

        let mut block_errors = Vec::new();
        for block in self.blocks() {
            let Some(renderer) = self.renderer.block_renderer(block.block_type) else {
                tracing::debug!(block_type = block.block_type, "Skipping unknown block type");
                continue;
            };
            block_errors.extend(renderer.validator().validate(block.data).into_errors());
        }
        self.errors.extend(block_errors);

        self.errors.is_empty()
    }

    /// Render known blocks to HTML and sanitize links.
    ///
    /// Returns an empty string if the document structure is invalid. Blocks
    /// of unknown type, and blocks whose renderer fails, are omitted.
    #[must_use]
    pub fn render(&self) -> String {
        if self.check_root().is_err() {
            return String::new();
        }

        let html: SafeHtml = self
            .blocks()
            .filter_map(|block| {
                let renderer = self.renderer.block_renderer(block.block_type)?;
                match renderer.render(block.data) {
                    Ok(fragment) => Some(fragment),
                    Err(e) => {
                        tracing::warn!(
                            block_type = block.block_type,
                            error = %e,
                            "Block renderer failed, omitting block"
                        );
                        None
                    }
                }
            })
            .collect();

        self.sanitizer.sanitize(html.as_str())
    }

    /// Validate, then render only if validation passed.
    pub fn render_if_valid(&mut self) -> Option<String> {
        self.validate().then(|| self.render())
    }

    fn check_root(&self) -> Result<(), SchemaError> {
        let content = self.content.as_ref().unwrap_or(&NULL);
        self.renderer.document_validator().validate(content).strict()
    }
}
