//! Quote block.

use serde::Deserialize;
use serde_json::Value;

use super::{InlineText, decode};
use crate::error::RenderError;
use crate::html::SafeHtml;
use crate::registry::BlockRenderer;
use crate::validator::{Validation, Validator, validate_with};

#[derive(Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum Alignment {
    #[default]
    Left,
    Center,
}

#[derive(Deserialize)]
struct QuoteData {
    text: String,
    #[serde(default)]
    caption: String,
    #[serde(default)]
    alignment: Alignment,
}

/// `quote`: `{ "text": "...", "caption": "...", "alignment": "left" | "center" }`.
#[derive(Clone, Debug, Default)]
pub struct QuoteBlock {
    text: InlineText,
}

impl QuoteBlock {
    pub const TYPE: &'static str = "quote";

    pub(crate) fn new(text: InlineText) -> Self {
        Self { text }
    }
}

impl Validator for QuoteBlock {
    fn validate(&self, data: &Value) -> Validation {
        validate_with::<QuoteData, _>(data, |_, _| {}).prefixed(Self::TYPE)
    }
}

impl BlockRenderer for QuoteBlock {
    fn validator(&self) -> &dyn Validator {
        self
    }

    fn render(&self, data: &Value) -> Result<SafeHtml, RenderError> {
        let quote: QuoteData = decode(Self::TYPE, data)?;
        let mut html = SafeHtml::from_trusted(match quote.alignment {
            Alignment::Left => "<blockquote>",
            Alignment::Center => r#"<blockquote class="align-center">"#,
        });
        html.push(&SafeHtml::from_trusted("<p>"));
        html.push(&self.text.clean(&quote.text));
        html.push(&SafeHtml::from_trusted("</p>"));

        let caption = self.text.clean(&quote.caption);
        if !caption.is_empty() {
            html.push(&SafeHtml::from_trusted("<cite>"));
            html.push(&caption);
            html.push(&SafeHtml::from_trusted("</cite>"));
        }
        html.push(&SafeHtml::from_trusted("</blockquote>"));
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn render(data: &Value) -> String {
        QuoteBlock::default().render(data).unwrap().into_string()
    }

    #[test]
    fn test_render_with_caption() {
        assert_eq!(
            render(&json!({"text": "To be", "caption": "<i>Hamlet</i>"})),
            "<blockquote><p>To be</p><cite><i>Hamlet</i></cite></blockquote>"
        );
    }

    #[test]
    fn test_render_without_caption() {
        assert_eq!(
            render(&json!({"text": "To be", "caption": ""})),
            "<blockquote><p>To be</p></blockquote>"
        );
    }

    #[test]
    fn test_render_centered() {
        assert_eq!(
            render(&json!({"text": "x", "alignment": "center"})),
            r#"<blockquote class="align-center"><p>x</p></blockquote>"#
        );
    }

    #[test]
    fn test_validate_alignment() {
        let block = QuoteBlock::default();
        assert!(block.validate(&json!({"text": "x", "alignment": "left"})).is_valid());
        assert!(!block.validate(&json!({"text": "x", "alignment": "right"})).is_valid());
    }
}
