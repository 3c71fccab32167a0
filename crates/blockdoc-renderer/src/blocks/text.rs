//! Inline rich text cleaning.
//!
//! Editor.js stores inline formatting as HTML inside block text fields. Only
//! a small set of inline tags survives; links keep `href` for the schemes the
//! link policy allows.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use ammonia::Builder;
use regex::Regex;

use crate::entities::decode_char_refs;
use crate::html::SafeHtml;
use crate::sanitize::LinkPolicy;

/// Tags allowed inside block text.
const INLINE_TAGS: &[&str] = &[
    "a", "b", "br", "code", "em", "i", "mark", "s", "strong", "sub", "sup", "u",
];

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("invalid tag regex"));

/// Cleaner for inline rich text.
#[derive(Clone, Debug, Default)]
pub(crate) struct InlineText {
    policy: LinkPolicy,
}

impl InlineText {
    pub(crate) fn new(policy: LinkPolicy) -> Self {
        Self { policy }
    }

    fn builder(&self) -> Builder<'_> {
        let mut builder = Builder::default();
        builder
            .tags(INLINE_TAGS.iter().copied().collect())
            .generic_attributes(HashSet::new())
            .tag_attributes(HashMap::from([("a", HashSet::from(["href"]))]))
            .url_schemes(
                self.policy
                    .allowed_schemes()
                    .iter()
                    .map(String::as_str)
                    .collect(),
            );
        builder
    }

    /// Clean rich text into a trusted fragment.
    pub(crate) fn clean(&self, text: &str) -> SafeHtml {
        if text.is_empty() {
            return SafeHtml::new();
        }
        SafeHtml::from_trusted(self.builder().clean(text).to_string())
    }

    /// Plain-text rendition of rich text for attribute values such as `alt`.
    ///
    /// Tags are stripped and character references decoded; the result still
    /// needs escaping.
    pub(crate) fn plain(text: &str) -> String {
        let stripped = TAG_PATTERN.replace_all(text, "");
        decode_char_refs(&stripped).trim().to_owned()
    }
}
