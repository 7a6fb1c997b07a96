//! Wishlist id derivation
//!
//! The id is derived once from the title at creation time and is not
//! checked for uniqueness: "My List" and "my list" share an id.

use once_cell::sync::Lazy;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;

static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("invalid whitespace regex"));

/// Bytes left untouched when encoding a URI component.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Derive a wishlist id from its title.
///
/// Trims, lower-cases, collapses each whitespace run into a single `-`
/// and percent-encodes the result so it can sit in a URL path segment.
///
/// ```
/// use wishlist_server::models::slugify;
///
/// assert_eq!(slugify("Birthday List"), "birthday-list");
/// assert_eq!(slugify("  Cars & Bikes "), "cars-%26-bikes");
/// ```
pub fn slugify(title: &str) -> String {
    let lowered = title.trim().to_lowercase();
    let hyphenated = WHITESPACE_RE.replace_all(&lowered, "-");
    encode_component(&hyphenated)
}

/// Percent-encode text for use as a single URL path segment.
///
/// Ids are already encoded once, so links to them encode again: the
/// router decodes one level and hands back the stored id.
pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, COMPONENT).to_string()
}
