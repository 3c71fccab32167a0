//! Paragraph block.

use serde::Deserialize;
use serde_json::Value;

use super::{InlineText, decode};
use crate::error::RenderError;
use crate::html::SafeHtml;
use crate::registry::BlockRenderer;
use crate::validator::{Validation, Validator, validate_with};

#[derive(Deserialize)]
struct ParagraphData {
    text: String,
}

/// `paragraph`: `{ "text": "..." }` rendered as `<p>`.
#[derive(Clone, Debug, Default)]
pub struct ParagraphBlock {
    text: InlineText,
}

impl ParagraphBlock {
    pub const TYPE: &'static str = "paragraph";

    pub(crate) fn new(text: InlineText) -> Self {
        Self { text }
    }
}

impl Validator for ParagraphBlock {
    fn validate(&self, data: &Value) -> Validation {
        validate_with::<ParagraphData, _>(data, |_, _| {}).prefixed(Self::TYPE)
    }
}

impl BlockRenderer for ParagraphBlock {
    fn validator(&self) -> &dyn Validator {
        self
    }

    fn render(&self, data: &Value) -> Result<SafeHtml, RenderError> {
        let paragraph: ParagraphData = decode(Self::TYPE, data)?;
        let mut html = SafeHtml::from_trusted("<p>");
        html.push(&self.text.clean(&paragraph.text));
        html.push(&SafeHtml::from_trusted("</p>"));
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_render() {
        let html = ParagraphBlock::default()
            .render(&json!({"text": "Hello <b>world</b>"}))
            .unwrap();
        assert_eq!(html.as_str(), "<p>Hello <b>world</b></p>");
    }

    #[test]
    fn test_render_strips_unsafe_markup() {
        let html = ParagraphBlock::default()
            .render(&json!({"text": "<img src=x onerror=alert(1)>hi"}))
            .unwrap();
        assert_eq!(html.as_str(), "<p>hi</p>");
    }

    #[test]
    fn test_empty_text() {
        let html = ParagraphBlock::default().render(&json!({"text": ""})).unwrap();
        assert_eq!(html.as_str(), "<p></p>");
    }

    #[test]
    fn test_validate() {
        let block = ParagraphBlock::default();
        assert!(block.validate(&json!({"text": "ok"})).is_valid());

        let report = block.validate(&json!({}));
        assert_eq!(report.errors(), ["paragraph: missing field `text`".to_owned()]);
    }

    #[test]
    fn test_render_invalid_data() {
        let err = ParagraphBlock::default().render(&json!({"text": 1})).unwrap_err();
        assert!(matches!(err, RenderError::InvalidData { block_type: "paragraph", .. }));
    }
}
