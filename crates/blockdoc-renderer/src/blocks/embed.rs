//! Embed block.
//!
//! Embeds become iframes, so the source must be an `https` URL on one of the
//! configured hosts.

use std::fmt::Write;

use blockdoc_config::EmbedConfig;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use super::{InlineText, checked_url, decode};
use crate::error::RenderError;
use crate::html::{SafeHtml, escape_html};
use crate::registry::BlockRenderer;
use crate::validator::{Validation, Validator, validate_with};

#[derive(Deserialize)]
struct EmbedData {
    service: String,
    embed: String,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
    #[serde(default)]
    caption: String,
}

/// `embed`: `{ "service": "youtube", "embed": "https://...", "width": 580, "height": 320 }`.
#[derive(Clone, Debug)]
pub struct EmbedBlock {
    text: InlineText,
    allowed_hosts: Vec<String>,
}

impl Default for EmbedBlock {
    fn default() -> Self {
        Self::new(InlineText::default(), &EmbedConfig::default())
    }
}

impl EmbedBlock {
    pub const TYPE: &'static str = "embed";

    pub(crate) fn new(text: InlineText, config: &EmbedConfig) -> Self {
        Self {
            text,
            allowed_hosts: config.allowed_hosts.clone(),
        }
    }

    fn source(&self, raw: &str) -> Result<Url, String> {
        let url = checked_url(raw, &["https"])?;
        let host = url.host_str().unwrap_or_default();
        if self
            .allowed_hosts
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(host))
        {
            Ok(url)
        } else {
            Err(format!("host `{host}` is not allowed"))
        }
    }
}

fn is_service_name(service: &str) -> bool {
    !service.is_empty()
        && service
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl Validator for EmbedBlock {
    fn validate(&self, data: &Value) -> Validation {
        validate_with::<EmbedData, _>(data, |embed, report| {
            report.ensure(is_service_name(&embed.service), || {
                format!("invalid service name: {:?}", embed.service)
            });
            if let Err(message) = self.source(&embed.embed) {
                report.push(message);
            }
        })
        .prefixed(Self::TYPE)
    }
}

impl BlockRenderer for EmbedBlock {
    fn validator(&self) -> &dyn Validator {
        self
    }

    fn render(&self, data: &Value) -> Result<SafeHtml, RenderError> {
        let embed: EmbedData = decode(Self::TYPE, data)?;
        let rejected = |message: String| RenderError::Rejected {
            block_type: Self::TYPE,
            message,
        };
        if !is_service_name(&embed.service) {
            return Err(rejected(format!("invalid service name: {:?}", embed.service)));
        }
        let url = self.source(&embed.embed).map_err(rejected)?;

        let mut out = String::new();
        write!(
            out,
            r#"<figure class="embed embed--{}"><iframe src="{}""#,
            embed.service,
            escape_html(url.as_str())
        )
        .unwrap();
        if let Some(width) = embed.width {
            write!(out, r#" width="{width}""#).unwrap();
        }
        if let Some(height) = embed.height {
            write!(out, r#" height="{height}""#).unwrap();
        }
        out.push_str(r#" frameborder="0" allowfullscreen></iframe>"#);
        let mut html = SafeHtml::from_trusted(out);

        let caption = self.text.clean(&embed.caption);
        if !caption.is_empty() {
            html.push(&SafeHtml::from_trusted("<figcaption>"));
            html.push(&caption);
            html.push(&SafeHtml::from_trusted("</figcaption>"));
        }
        html.push(&SafeHtml::from_trusted("</figure>"));
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const VIDEO: &str = "https://www.youtube.com/embed/dQw4w9WgXcQ";

    #[test]
    fn test_render() {
        let html = EmbedBlock::default()
            .render(&json!({
                "service": "youtube",
                "source": "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
                "embed": VIDEO,
                "width": 580,
                "height": 320,
                "caption": "Song"
            }))
            .unwrap();
        assert_eq!(
            html.as_str(),
            concat!(
                r#"<figure class="embed embed--youtube">"#,
                r#"<iframe src="https://www.youtube.com/embed/dQw4w9WgXcQ" width="580" height="320" frameborder="0" allowfullscreen></iframe>"#,
                "<figcaption>Song</figcaption></figure>"
            )
        );
    }

    #[test]
    fn test_render_rejects_unknown_host() {
        let err = EmbedBlock::default()
            .render(&json!({"service": "evil", "embed": "https://evil.test/frame"}))
            .unwrap_err();
        assert_eq!(err.to_string(), "embed: host `evil.test` is not allowed");
    }

    #[test]
    fn test_validate() {
        let block = EmbedBlock::default();
        assert!(block.validate(&json!({"service": "youtube", "embed": VIDEO})).is_valid());

        let report = block.validate(&json!({
            "service": "you tube",
            "embed": "http://www.youtube.com/embed/x"
        }));
        assert_eq!(
            report.errors(),
            [
                "embed: invalid service name: \"you tube\"".to_owned(),
                "embed: scheme `http` is not allowed".to_owned(),
            ]
        );
    }

    #[test]
    fn test_configured_hosts() {
        let config = EmbedConfig {
            allowed_hosts: vec!["Media.Example.com".to_owned()],
        };
        let block = EmbedBlock::new(InlineText::default(), &config);
        assert!(
            block
                .validate(&json!({"service": "media", "embed": "https://media.example.com/v/1"}))
                .is_valid()
        );
        assert!(!block.validate(&json!({"service": "youtube", "embed": VIDEO})).is_valid());
    }
}
