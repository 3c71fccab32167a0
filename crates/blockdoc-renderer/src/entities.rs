//! Character reference decoding for attribute values.
//!
//! The HTML rewriter hands attribute values over exactly as written, so
//! `&#106;avascript:` still carries its reference. Browsers decode references
//! before resolving a URL; the link policy has to look at the same text.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Numeric references (semicolon optional, as browsers accept) and named
/// references (semicolon required).
static REFERENCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#([0-9]+);?|#[xX]([0-9a-fA-F]+);?|([A-Za-z][A-Za-z0-9]*);)")
        .expect("invalid character reference regex")
});

/// Decode character references in an attribute value.
///
/// Unknown named references are preserved as-is. Numeric references to
/// NUL, surrogates or out-of-range code points decode to U+FFFD.
pub(crate) fn decode_char_refs(value: &str) -> Cow<'_, str> {
    if !value.contains('&') {
        return Cow::Borrowed(value);
    }
    REFERENCE_PATTERN.replace_all(value, |caps: &Captures| {
        if let Some(dec) = caps.get(1) {
            return numeric_to_char(dec.as_str().parse().ok()).to_string();
        }
        if let Some(hex) = caps.get(2) {
            return numeric_to_char(u32::from_str_radix(hex.as_str(), 16).ok()).to_string();
        }
        entity_to_unicode(&caps[3]).map_or_else(|| caps[0].to_owned(), String::from)
    })
}

fn numeric_to_char(code: Option<u32>) -> char {
    code.filter(|&c| c != 0)
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Map HTML entity name to Unicode character.
fn entity_to_unicode(name: &str) -> Option<&'static str> {
    Some(match name {
        // URL syntax
        "colon" => ":",
        "Tab" => "\t",
        "NewLine" => "\n",
        "sol" => "/",
        "bsol" => "\\",
        "period" => ".",
        "quest" => "?",
        "num" => "#",
        "percnt" => "%",
        "equals" => "=",
        "lpar" => "(",
        "rpar" => ")",
        "commat" => "@",

        // Markup
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",

        // Common entities
        "nbsp" => "\u{00a0}",
        "mdash" => "\u{2014}",
        "ndash" => "\u{2013}",
        "hellip" => "\u{2026}",

        _ => return None,
    })
}
