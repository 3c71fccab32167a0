//! Image block.

use std::fmt::Write;

use serde::Deserialize;
use serde_json::Value;

use super::{InlineText, checked_url, decode};
use crate::error::RenderError;
use crate::html::{SafeHtml, escape_html};
use crate::registry::BlockRenderer;
use crate::validator::{Validation, Validator, validate_with};

/// Schemes an image source may use.
const IMAGE_SCHEMES: &[&str] = &["http", "https"];

#[derive(Deserialize)]
struct ImageFile {
    url: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageData {
    #[serde(default)]
    file: Option<ImageFile>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    caption: String,
    #[serde(default)]
    with_border: bool,
    #[serde(default)]
    with_background: bool,
    #[serde(default)]
    stretched: bool,
}

impl ImageData {
    /// Image source: `file.url` as written by the image tool, or a bare `url`.
    fn source(&self) -> Option<&str> {
        self.file
            .as_ref()
            .map(|file| file.url.as_str())
            .or(self.url.as_deref())
    }

    fn class(&self) -> String {
        let mut class = String::from("image");
        for (enabled, modifier) in [
            (self.with_border, "image--bordered"),
            (self.with_background, "image--background"),
            (self.stretched, "image--stretched"),
        ] {
            if enabled {
                class.push(' ');
                class.push_str(modifier);
            }
        }
        class
    }
}

/// `image`: `{ "file": { "url": "..." }, "caption": "...", "withBorder": false, ... }`.
///
/// Only `http` and `https` sources are accepted.
#[derive(Clone, Debug, Default)]
pub struct ImageBlock {
    text: InlineText,
}

impl ImageBlock {
    pub const TYPE: &'static str = "image";

    pub(crate) fn new(text: InlineText) -> Self {
        Self { text }
    }
}

impl Validator for ImageBlock {
    fn validate(&self, data: &Value) -> Validation {
        validate_with::<ImageData, _>(data, |image, report| match image.source() {
            Some(source) => {
                if let Err(message) = checked_url(source, IMAGE_SCHEMES) {
                    report.push(message);
                }
            }
            None => report.push("file.url is required"),
        })
        .prefixed(Self::TYPE)
    }
}

impl BlockRenderer for ImageBlock {
    fn validator(&self) -> &dyn Validator {
        self
    }

    fn render(&self, data: &Value) -> Result<SafeHtml, RenderError> {
        let image: ImageData = decode(Self::TYPE, data)?;
        let rejected = |message: String| RenderError::Rejected {
            block_type: Self::TYPE,
            message,
        };
        let source = image
            .source()
            .ok_or_else(|| rejected("file.url is required".to_owned()))?;
        let url = checked_url(source, IMAGE_SCHEMES).map_err(rejected)?;

        let mut out = String::new();
        write!(
            out,
            r#"<figure class="{}"><img src="{}" alt="{}">"#,
            image.class(),
            escape_html(url.as_str()),
            escape_html(&InlineText::plain(&image.caption))
        )
        .unwrap();
        let mut html = SafeHtml::from_trusted(out);

        let caption = self.text.clean(&image.caption);
        if !caption.is_empty() {
            html.push(&SafeHtml::from_trusted("<figcaption>"));
            html.push(&caption);
            html.push(&SafeHtml::from_trusted("</figcaption>"));
        }
        html.push(&SafeHtml::from_trusted("</figure>"));
        Ok(html)
    }
}
