//! Checklist block.

use serde::Deserialize;
use serde_json::Value;

use super::{InlineText, decode};
use crate::error::RenderError;
use crate::html::SafeHtml;
use crate::registry::BlockRenderer;
use crate::validator::{Validation, Validator, validate_with};

#[derive(Deserialize)]
struct ChecklistItem {
    text: String,
    #[serde(default)]
    checked: bool,
}

#[derive(Deserialize)]
struct ChecklistData {
    items: Vec<ChecklistItem>,
}

/// `checklist`: `{ "items": [{ "text": "...", "checked": true }] }`.
#[derive(Clone, Debug, Default)]
pub struct ChecklistBlock {
    text: InlineText,
}

impl ChecklistBlock {
    pub const TYPE: &'static str = "checklist";

    pub(crate) fn new(text: InlineText) -> Self {
        Self { text }
    }
}

impl Validator for ChecklistBlock {
    fn validate(&self, data: &Value) -> Validation {
        validate_with::<ChecklistData, _>(data, |_, _| {}).prefixed(Self::TYPE)
    }
}

impl BlockRenderer for ChecklistBlock {
    fn validator(&self) -> &dyn Validator {
        self
    }

    fn render(&self, data: &Value) -> Result<SafeHtml, RenderError> {
        let checklist: ChecklistData = decode(Self::TYPE, data)?;
        let mut html = SafeHtml::from_trusted(r#"<ul class="checklist">"#);
        for item in &checklist.items {
            html.push(&SafeHtml::from_trusted(if item.checked {
                r#"<li class="checklist-item checklist-item--checked">"#
            } else {
                r#"<li class="checklist-item">"#
            }));
            html.push(&self.text.clean(&item.text));
            html.push(&SafeHtml::from_trusted("</li>"));
        }
        html.push(&SafeHtml::from_trusted("</ul>"));
        Ok(html)
    }
}
