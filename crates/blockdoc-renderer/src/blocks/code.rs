//! Code block.

use std::fmt::Write;

use serde::Deserialize;
use serde_json::Value;

use super::decode;
use crate::error::RenderError;
use crate::html::{SafeHtml, escape_html};
use crate::registry::BlockRenderer;
use crate::validator::{Validation, Validator, validate_with};

#[derive(Deserialize)]
struct CodeData {
    code: String,
    #[serde(default)]
    language: Option<String>,
}

/// `code`: `{ "code": "...", "language": "rust" }` rendered as escaped
/// `<pre><code>`.
#[derive(Clone, Copy, Debug, Default)]
pub struct CodeBlock;

impl CodeBlock {
    pub const TYPE: &'static str = "code";
}

impl Validator for CodeBlock {
    fn validate(&self, data: &Value) -> Validation {
        validate_with::<CodeData, _>(data, |code, report| {
            if let Some(language) = &code.language {
                report.ensure(
                    language
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '#')),
                    || format!("invalid language name: {language:?}"),
                );
            }
        })
        .prefixed(Self::TYPE)
    }
}

impl BlockRenderer for CodeBlock {
    fn validator(&self) -> &dyn Validator {
        self
    }

    fn render(&self, data: &Value) -> Result<SafeHtml, RenderError> {
        let code: CodeData = decode(Self::TYPE, data)?;
        let mut out = String::new();
        match code.language.as_deref().filter(|lang| !lang.is_empty()) {
            Some(lang) => write!(
                out,
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                escape_html(lang),
                escape_html(&code.code)
            )
            .unwrap(),
            None => write!(out, "<pre><code>{}</code></pre>", escape_html(&code.code)).unwrap(),
        }
        Ok(SafeHtml::from_trusted(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_render_escapes() {
        let html = CodeBlock
            .render(&json!({"code": "if a < b && c > d {}", "language": "rust"}))
            .unwrap();
        assert_eq!(
            html.as_str(),
            r#"<pre><code class="language-rust">if a &lt; b &amp;&amp; c &gt; d {}</code></pre>"#
        );
    }

    #[test]
    fn test_render_without_language() {
        let html = CodeBlock.render(&json!({"code": "<script>"})).unwrap();
        assert_eq!(html.as_str(), "<pre><code>&lt;script&gt;</code></pre>");

        let html = CodeBlock.render(&json!({"code": "x", "language": ""})).unwrap();
        assert_eq!(html.as_str(), "<pre><code>x</code></pre>");
    }

    #[test]
    fn test_validate_language() {
        assert!(CodeBlock.validate(&json!({"code": "", "language": "c++"})).is_valid());
        assert!(CodeBlock.validate(&json!({"code": "", "language": "f#"})).is_valid());

        let report = CodeBlock.validate(&json!({"code": "", "language": "x\" onload=\"y"}));
        assert!(!report.is_valid());
        assert!(report.errors()[0].starts_with("code: invalid language name"));
    }

    #[test]
    fn test_validate_requires_code() {
        assert!(!CodeBlock.validate(&json!({"language": "rust"})).is_valid());
    }
}
