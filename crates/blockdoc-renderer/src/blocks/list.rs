//! List block, including nested lists.

use serde::Deserialize;
use serde_json::Value;

use super::{InlineText, decode};
use crate::error::RenderError;
use crate::html::SafeHtml;
use crate::registry::BlockRenderer;
use crate::validator::{Validation, Validator, validate_with};

#[derive(Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ListStyle {
    Ordered,
    Unordered,
}

impl ListStyle {
    fn tag(self) -> &'static str {
        match self {
            Self::Ordered => "ol",
            Self::Unordered => "ul",
        }
    }
}

/// A list item is either plain text or an object with nested items.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListItem {
    Text(String),
    Nested {
        content: String,
        #[serde(default)]
        items: Vec<ListItem>,
    },
}

#[derive(Deserialize)]
struct ListData {
    style: ListStyle,
    items: Vec<ListItem>,
}

/// `list`: `{ "style": "ordered" | "unordered", "items": [...] }`.
///
/// Items are strings, or `{ "content": "...", "items": [...] }` objects for
/// nested lists. Nested lists inherit the outer style.
#[derive(Clone, Debug, Default)]
pub struct ListBlock {
    text: InlineText,
}

impl ListBlock {
    pub const TYPE: &'static str = "list";

    pub(crate) fn new(text: InlineText) -> Self {
        Self { text }
    }

    fn render_items(&self, style: ListStyle, items: &[ListItem], out: &mut SafeHtml) {
        let tag = style.tag();
        out.push(&SafeHtml::from_trusted(format!("<{tag}>")));
        for item in items {
            out.push(&SafeHtml::from_trusted("<li>"));
            match item {
                ListItem::Text(text) => out.push(&self.text.clean(text)),
                ListItem::Nested { content, items } => {
                    out.push(&self.text.clean(content));
                    if !items.is_empty() {
                        self.render_items(style, items, out);
                    }
                }
            }
            out.push(&SafeHtml::from_trusted("</li>"));
        }
        out.push(&SafeHtml::from_trusted(format!("</{tag}>")));
    }
}

impl Validator for ListBlock {
    fn validate(&self, data: &Value) -> Validation {
        validate_with::<ListData, _>(data, |_, _| {}).prefixed(Self::TYPE)
    }
}

impl BlockRenderer for ListBlock {
    fn validator(&self) -> &dyn Validator {
        self
    }

    fn render(&self, data: &Value) -> Result<SafeHtml, RenderError> {
        let list: ListData = decode(Self::TYPE, data)?;
        let mut html = SafeHtml::new();
        self.render_items(list.style, &list.items, &mut html);
        Ok(html)
    }
}
