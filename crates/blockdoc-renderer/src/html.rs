//! Trusted HTML fragments.
//!
//! [`SafeHtml`] marks a string as already safe for insertion into a page.
//! Block renderers return it, and the document only concatenates values of
//! this type, so every untrusted string has to pass through
//! [`SafeHtml::escape`] (or an explicit [`SafeHtml::from_trusted`]) on its way
//! into the output.

use std::fmt;

/// HTML that is safe to emit without further escaping.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SafeHtml(String);

impl SafeHtml {
    /// Create an empty fragment.
    #[must_use]
    pub fn new() -> Self {
        Self(String::new())
    }

    /// Escape plain text into a fragment.
    #[must_use]
    pub fn escape(text: &str) -> Self {
        Self(escape_html(text))
    }

    /// Wrap markup the caller vouches for.
    ///
    /// Only use this for markup built from escaped or sanitized parts.
    #[must_use]
    pub fn from_trusted(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    /// Append another fragment.
    pub fn push(&mut self, other: &SafeHtml) {
        self.0.push_str(&other.0);
    }

    /// Append plain text, escaping it.
    pub fn push_escaped(&mut self, text: &str) {
        self.0.push_str(&escape_html(text));
    }

    /// Borrow the markup.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the markup.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for SafeHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SafeHtml {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<SafeHtml> for String {
    fn from(html: SafeHtml) -> Self {
        html.0
    }
}

/// Joins fragments verbatim, with no separator and no re-escaping.
impl FromIterator<SafeHtml> for SafeHtml {
    fn from_iter<I: IntoIterator<Item = SafeHtml>>(iter: I) -> Self {
        let mut out = Self::new();
        out.extend(iter);
        out
    }
}

impl Extend<SafeHtml> for SafeHtml {
    fn extend<I: IntoIterator<Item = SafeHtml>>(&mut self, iter: I) {
        for fragment in iter {
            self.0.push_str(&fragment.0);
        }
    }
}

/// Escape special HTML characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
