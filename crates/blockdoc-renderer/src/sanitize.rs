//! Hyperlink sanitization for rendered HTML.
//!
//! The final pass over a rendered document. Every `<a>` element's `href` is
//! checked against a [`LinkPolicy`] and removed when it could execute script
//! or leave the allowed set of schemes. Everything else passes through the
//! streaming rewriter untouched, so the pass is idempotent.
//!
//! A link is kept when, after decoding character references and dropping
//! ASCII tab and newline characters:
//! - it does not start with `javascript:` or `data:` (any case, leading
//!   whitespace ignored),
//! - it contains no characters illegal in a URI reference,
//! - it is either relative (no scheme) or uses an allowed scheme and parses
//!   as an absolute URL.

use std::fmt;
use std::sync::LazyLock;

use blockdoc_config::LinksConfig;
use lol_html::html_content::Element;
use lol_html::{RewriteStrSettings, element, rewrite_str};
use regex::Regex;
use url::Url;

use crate::entities::decode_char_refs;
use crate::html::escape_html;

/// Schemes that execute content in the page's origin.
static SCRIPT_SCHEME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:javascript|data):").expect("invalid script scheme regex")
});

/// RFC 3986 scheme at the start of a URI.
static SCHEME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z0-9+.\-]*):").expect("invalid scheme regex")
});

/// Why an `href` was removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkRejection {
    /// `javascript:` or `data:` URL.
    ScriptScheme,
    /// Character that may not appear in a URI reference.
    IllegalCharacter(char),
    /// Malformed URI (bad percent-encoding or unparsable absolute URL).
    Unparsable,
    /// Explicit scheme outside the allowed set.
    DisallowedScheme(String),
}

impl fmt::Display for LinkRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ScriptScheme => f.write_str("script-capable scheme"),
            Self::IllegalCharacter(c) => write!(f, "illegal character {c:?}"),
            Self::Unparsable => f.write_str("unparsable URI"),
            Self::DisallowedScheme(scheme) => write!(f, "scheme {scheme:?} not allowed"),
        }
    }
}

/// Which hyperlink targets may survive sanitization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkPolicy {
    allowed_schemes: Vec<String>,
}

impl Default for LinkPolicy {
    fn default() -> Self {
        Self::from_config(&LinksConfig::default())
    }
}

impl LinkPolicy {
    /// Create a policy allowing the given schemes (compared case-insensitively).
    pub fn new<I, S>(allowed_schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            allowed_schemes: allowed_schemes
                .into_iter()
                .map(|s| s.as_ref().to_ascii_lowercase())
                .collect(),
        }
    }

    /// Create a policy from the `[links]` configuration section.
    #[must_use]
    pub fn from_config(config: &LinksConfig) -> Self {
        Self::new(&config.allowed_schemes)
    }

    /// Allowed schemes, lower-cased.
    #[must_use]
    pub fn allowed_schemes(&self) -> &[String] {
        &self.allowed_schemes
    }

    /// Whether `scheme` is in the allowed set.
    #[must_use]
    pub fn is_allowed_scheme(&self, scheme: &str) -> bool {
        self.allowed_schemes
            .iter()
            .any(|s| s.eq_ignore_ascii_case(scheme))
    }

    /// Whether an `href` value (as written in markup) may be kept.
    #[must_use]
    pub fn permits(&self, href: &str) -> bool {
        self.check(href).is_ok()
    }

    /// Check an `href` value (as written in markup).
    ///
    /// # Errors
    ///
    /// Returns the reason the link has to be removed.
    pub fn check(&self, href: &str) -> Result<(), LinkRejection> {
        let decoded = decode_char_refs(href);
        let normalized: String = decoded
            .chars()
            .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
            .collect();
        let trimmed = normalized.trim_matches(|c: char| c <= ' ');

        if SCRIPT_SCHEME_PATTERN.is_match(trimmed) {
            return Err(LinkRejection::ScriptScheme);
        }
        if let Some(c) = trimmed.chars().find(|&c| is_illegal_uri_char(c)) {
            return Err(LinkRejection::IllegalCharacter(c));
        }
        if !has_valid_percent_encoding(trimmed) {
            return Err(LinkRejection::Unparsable);
        }

        let Some(caps) = SCHEME_PATTERN.captures(trimmed) else {
            // Relative reference: path, query, fragment or protocol-relative.
            return Ok(());
        };
        if Url::parse(trimmed).is_err() {
            return Err(LinkRejection::Unparsable);
        }
        let scheme = &caps[1];
        if self.is_allowed_scheme(scheme) {
            Ok(())
        } else {
            Err(LinkRejection::DisallowedScheme(scheme.to_ascii_lowercase()))
        }
    }
}

/// Characters outside RFC 3986 that browsers would otherwise repair.
fn is_illegal_uri_char(c: char) -> bool {
    c.is_control() || matches!(c, ' ' | '<' | '>' | '"' | '{' | '}' | '|' | '\\' | '^' | '`')
}

/// Every `%` must start a `%XX` escape.
fn has_valid_percent_encoding(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
            if !valid {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}

/// Removes unsafe `href` attributes from anchors in an HTML fragment.
#[derive(Clone, Debug, Default)]
pub struct LinkSanitizer {
    policy: LinkPolicy,
}

impl LinkSanitizer {
    /// Create a sanitizer enforcing `policy`.
    #[must_use]
    pub fn new(policy: LinkPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn policy(&self) -> &LinkPolicy {
        &self.policy
    }

    /// Sanitize an HTML fragment.
    ///
    /// Empty input is returned unchanged. If the rewriter fails, the whole
    /// input is returned escaped as text.
    #[must_use]
    pub fn sanitize(&self, html: &str) -> String {
        if html.is_empty() {
            return String::new();
        }

        let result = rewrite_str(
            html,
            RewriteStrSettings {
                element_content_handlers: vec![element!("a[href]", |el| {
                    self.sanitize_anchor(el);
                    Ok(())
                })],
                ..RewriteStrSettings::new()
            },
        );

        result.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Link sanitization failed, escaping output");
            escape_html(html)
        })
    }

    /// Remove the anchor's `href` unless the policy accepts it.
    ///
    /// Only the first `href` is checked, as it is the one browsers use.
    /// Removing it drops every repeated `href` as well.
    fn sanitize_anchor(&self, el: &mut Element<'_, '_>) {
        let Some(href) = el.get_attribute("href") else {
            return;
        };
        if let Err(reason) = self.policy.check(&href) {
            tracing::trace!(href = %href, %reason, "Removing unsafe link");
            el.remove_attribute("href");
        }
    }
}

/// Sanitize links in `html` with the default policy (`http`, `https`, `mailto`).
#[must_use]
pub fn sanitize_links(html: &str) -> String {
    LinkSanitizer::default().sanitize(html)
}
