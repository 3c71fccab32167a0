//! Delimiter block.

use serde_json::{Map, Value};

use crate::error::RenderError;
use crate::html::SafeHtml;
use crate::registry::BlockRenderer;
use crate::validator::{Validation, Validator, validate_with};

/// `delimiter`: no data, rendered as `<hr>`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DelimiterBlock;

impl DelimiterBlock {
    pub const TYPE: &'static str = "delimiter";
}

impl Validator for DelimiterBlock {
    fn validate(&self, data: &Value) -> Validation {
        validate_with::<Map<String, Value>, _>(data, |_, _| {}).prefixed(Self::TYPE)
    }
}

impl BlockRenderer for DelimiterBlock {
    fn validator(&self) -> &dyn Validator {
        self
    }

    fn render(&self, _data: &Value) -> Result<SafeHtml, RenderError> {
        Ok(SafeHtml::from_trusted("<hr>"))
    }
}
