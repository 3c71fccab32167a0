//! Standard Editor.js block types.
//!
//! [`DefaultRenderer`] registers every block type in this module. Block text
//! is cleaned to inline formatting only, with link schemes restricted by the
//! configured [`LinkPolicy`].

mod checklist;
mod code;
mod delimiter;
mod embed;
mod header;
mod image;
mod list;
mod paragraph;
mod quote;
mod table;
mod text;

use std::sync::{Arc, LazyLock};

use blockdoc_config::Config;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

pub use checklist::ChecklistBlock;
pub use code::CodeBlock;
pub use delimiter::DelimiterBlock;
pub use embed::EmbedBlock;
pub use header::HeaderBlock;
pub use image::ImageBlock;
pub use list::ListBlock;
pub use paragraph::ParagraphBlock;
pub use quote::QuoteBlock;
pub use table::TableBlock;
pub(crate) use text::InlineText;

use crate::error::RenderError;
use crate::registry::{BlockRenderer, Registry, RendererRegistry};
use crate::sanitize::LinkPolicy;
use crate::schema::DocumentValidator;
use crate::validator::Validator;

static DEFAULT_RENDERER: LazyLock<Arc<DefaultRenderer>> =
    LazyLock::new(|| Arc::new(DefaultRenderer::new()));

/// Process-wide registry with the standard block types and default config.
#[must_use]
pub fn default_renderer() -> Arc<dyn RendererRegistry> {
    Arc::clone(&*DEFAULT_RENDERER) as Arc<dyn RendererRegistry>
}

/// Deserialize block data for rendering.
pub(crate) fn decode<T: DeserializeOwned>(
    block_type: &'static str,
    data: &Value,
) -> Result<T, RenderError> {
    T::deserialize(data).map_err(|source| RenderError::InvalidData { block_type, source })
}

/// Parse an absolute URL and require one of `schemes`.
pub(crate) fn checked_url(raw: &str, schemes: &[&str]) -> Result<Url, String> {
    let url = Url::parse(raw.trim()).map_err(|e| format!("invalid URL {raw:?}: {e}"))?;
    if !schemes.contains(&url.scheme()) {
        return Err(format!("scheme `{}` is not allowed", url.scheme()));
    }
    Ok(url)
}

/// Registry with every standard block type.
#[derive(Debug)]
pub struct DefaultRenderer {
    registry: Registry,
}

impl Default for DefaultRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultRenderer {
    /// Standard blocks with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    /// Standard blocks configured from `config`.
    ///
    /// Types listed in `blocks.disabled` are left out and behave as unknown.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let text = InlineText::new(LinkPolicy::from_config(&config.links));
        let mut registry = Registry::new(DocumentValidator);
        let mut add = |block_type: &'static str, renderer: Box<dyn BlockRenderer>| {
            if config.is_block_enabled(block_type) {
                registry.register_boxed(block_type, renderer);
            }
        };

        add(ParagraphBlock::TYPE, Box::new(ParagraphBlock::new(text.clone())));
        add(
            HeaderBlock::TYPE,
            Box::new(HeaderBlock::new(text.clone(), &config.blocks.header)),
        );
        add(ListBlock::TYPE, Box::new(ListBlock::new(text.clone())));
        add(ChecklistBlock::TYPE, Box::new(ChecklistBlock::new(text.clone())));
        add(QuoteBlock::TYPE, Box::new(QuoteBlock::new(text.clone())));
        add(CodeBlock::TYPE, Box::new(CodeBlock));
        add(DelimiterBlock::TYPE, Box::new(DelimiterBlock));
        add(ImageBlock::TYPE, Box::new(ImageBlock::new(text.clone())));
        add(TableBlock::TYPE, Box::new(TableBlock::new(text.clone())));
        add(
            EmbedBlock::TYPE,
            Box::new(EmbedBlock::new(text, &config.blocks.embed)),
        );

        Self { registry }
    }

    /// The underlying registry.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Unwrap into the underlying registry, e.g. to register custom blocks.
    #[must_use]
    pub fn into_registry(self) -> Registry {
        self.registry
    }
}

impl RendererRegistry for DefaultRenderer {
    fn block_renderer(&self, block_type: &str) -> Option<&dyn BlockRenderer> {
        self.registry.block_renderer(block_type)
    }

    fn document_validator(&self) -> &dyn Validator {
        self.registry.document_validator()
    }
}
