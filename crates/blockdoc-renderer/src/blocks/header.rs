//! Header block.

use std::fmt::Write;
use std::ops::RangeInclusive;

use blockdoc_config::HeaderConfig;
use serde::Deserialize;
use serde_json::Value;

use super::{InlineText, decode};
use crate::error::RenderError;
use crate::html::SafeHtml;
use crate::registry::BlockRenderer;
use crate::validator::{Validation, Validator, validate_with};

/// Highest heading level HTML supports.
const MAX_LEVEL: u8 = 6;

#[derive(Deserialize)]
struct HeaderData {
    text: String,
    level: u8,
}

/// `header`: `{ "text": "...", "level": 2 }` rendered as `<h2>`.
///
/// Validation rejects levels outside the configured range; rendering clamps
/// them into it.
#[derive(Clone, Debug)]
pub struct HeaderBlock {
    text: InlineText,
    levels: RangeInclusive<u8>,
}

impl Default for HeaderBlock {
    fn default() -> Self {
        Self::new(InlineText::default(), &HeaderConfig::default())
    }
}

impl HeaderBlock {
    pub const TYPE: &'static str = "header";

    /// Build from header options.
    ///
    /// Levels are bounded to 1..=6; an empty range falls back to all levels,
    /// since the config may not have been validated.
    pub(crate) fn new(text: InlineText, config: &HeaderConfig) -> Self {
        let min = config.min_level.clamp(1, MAX_LEVEL);
        let max = config.max_level.clamp(1, MAX_LEVEL);
        let levels = if min <= max {
            min..=max
        } else {
            tracing::warn!(
                min_level = config.min_level,
                max_level = config.max_level,
                "Invalid header level range, allowing all levels"
            );
            1..=MAX_LEVEL
        };
        Self { text, levels }
    }

    fn clamp(&self, level: u8) -> u8 {
        level.clamp(*self.levels.start(), *self.levels.end())
    }
}

impl Validator for HeaderBlock {
    fn validate(&self, data: &Value) -> Validation {
        validate_with::<HeaderData, _>(data, |header, report| {
            report.ensure(self.levels.contains(&header.level), || {
                format!(
                    "level must be between {} and {}, got {}",
                    self.levels.start(),
                    self.levels.end(),
                    header.level
                )
            });
        })
        .prefixed(Self::TYPE)
    }
}

impl BlockRenderer for HeaderBlock {
    fn validator(&self) -> &dyn Validator {
        self
    }

    fn render(&self, data: &Value) -> Result<SafeHtml, RenderError> {
        let header: HeaderData = decode(Self::TYPE, data)?;
        let level = self.clamp(header.level);
        let mut out = String::new();
        write!(out, "<h{level}>{}</h{level}>", self.text.clean(&header.text)).unwrap();
        Ok(SafeHtml::from_trusted(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn restricted() -> HeaderBlock {
        HeaderBlock::new(
            InlineText::default(),
            &HeaderConfig {
                min_level: 2,
                max_level: 4,
            },
        )
    }

    #[test]
    fn test_render() {
        let html = HeaderBlock::default()
            .render(&json!({"text": "Title <i>x</i>", "level": 2}))
            .unwrap();
        assert_eq!(html.as_str(), "<h2>Title <i>x</i></h2>");
    }

    #[test]
    fn test_render_clamps_level() {
        let block = restricted();
        assert_eq!(
            block.render(&json!({"text": "a", "level": 1})).unwrap().as_str(),
            "<h2>a</h2>"
        );
        assert_eq!(
            block.render(&json!({"text": "a", "level": 6})).unwrap().as_str(),
            "<h4>a</h4>"
        );
    }

    #[test]
    fn test_validate_level_range() {
        let block = restricted();
        assert!(block.validate(&json!({"text": "a", "level": 3})).is_valid());

        let report = block.validate(&json!({"text": "a", "level": 5}));
        assert_eq!(
            report.errors(),
            ["header: level must be between 2 and 4, got 5".to_owned()]
        );
    }

    #[test]
    fn test_inverted_range_falls_back_to_all_levels() {
        let block = HeaderBlock::new(
            InlineText::default(),
            &HeaderConfig {
                min_level: 5,
                max_level: 2,
            },
        );
        assert_eq!(
            block.render(&json!({"text": "a", "level": 3})).unwrap().as_str(),
            "<h3>a</h3>"
        );
        assert!(block.validate(&json!({"text": "a", "level": 1})).is_valid());
    }

    #[test]
    fn test_out_of_bounds_range_is_bounded() {
        let block = HeaderBlock::new(
            InlineText::default(),
            &HeaderConfig {
                min_level: 0,
                max_level: 9,
            },
        );
        assert_eq!(
            block.render(&json!({"text": "x", "level": 0})).unwrap().as_str(),
            "<h1>x</h1>"
        );
        assert_eq!(
            block.render(&json!({"text": "x", "level": 9})).unwrap().as_str(),
            "<h6>x</h6>"
        );
        assert!(!block.validate(&json!({"text": "x", "level": 0})).is_valid());
    }

    #[test]
    fn test_validate_default_range() {
        let block = HeaderBlock::default();
        assert!(block.validate(&json!({"text": "a", "level": 1})).is_valid());
        assert!(block.validate(&json!({"text": "a", "level": 6})).is_valid());
        assert!(!block.validate(&json!({"text": "a", "level": 0})).is_valid());
        assert!(!block.validate(&json!({"text": "a", "level": 7})).is_valid());
    }

    #[test]
    fn test_validate_missing_level() {
        let report = HeaderBlock::default().validate(&json!({"text": "a"}));
        assert_eq!(report.errors(), ["header: missing field `level`".to_owned()]);
    }

    #[test]
    fn test_validate_level_type() {
        assert!(
            !HeaderBlock::default()
                .validate(&json!({"text": "a", "level": "2"}))
                .is_valid()
        );
        assert!(
            !HeaderBlock::default()
                .validate(&json!({"text": "a", "level": 300}))
                .is_valid()
        );
    }
}
